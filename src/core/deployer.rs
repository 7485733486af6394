use crate::config::{DappConfig, ReceiptSettings};
use crate::core::abi::REQUIRED_FUNCTIONS;
use crate::core::artifact::ContractArtifact;
use crate::core::rpc::{HttpTransport, JsonRpcClient};
use crate::core::wallet::wait_for_receipt;
use crate::domain::model::TransactionRequest;
use crate::domain::ports::RpcTransport;
use crate::utils::error::{DappError, Result};
use alloy_primitives::{Address, Bytes, B256};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
}

pub struct ContractFactory<T> {
    client: Arc<JsonRpcClient<T>>,
    name: String,
    bytecode: Bytes,
    receipts: ReceiptSettings,
}

impl<T: RpcTransport> ContractFactory<T> {
    pub fn from_artifact(
        client: Arc<JsonRpcClient<T>>,
        artifact: &ContractArtifact,
        receipts: ReceiptSettings,
    ) -> Result<Self> {
        Ok(Self {
            client,
            name: artifact.contract_name.clone(),
            bytecode: artifact.creation_bytecode()?,
            receipts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 送出建立合約的交易並等待確認
    pub async fn deploy(&self, from: Address) -> Result<Deployment> {
        let request = TransactionRequest::create(from, self.bytecode.clone());
        let hash = self.client.send_transaction(&request).await?;
        tracing::info!("📤 Deploying {} in transaction {}", self.name, hash);

        let receipt = wait_for_receipt(&self.client, hash, &self.receipts).await?;
        let address = receipt
            .contract_address
            .ok_or_else(|| DappError::DeploymentError {
                message: format!("receipt for {} has no contract address", hash),
            })?;

        Ok(Deployment {
            address,
            transaction_hash: hash,
            block_number: receipt.block(),
        })
    }
}

/// 依名稱在產物目錄中建立合約工廠
pub fn get_contract_factory<T: RpcTransport>(
    client: Arc<JsonRpcClient<T>>,
    artifacts_dir: impl AsRef<Path>,
    name: &str,
    receipts: ReceiptSettings,
) -> Result<ContractFactory<T>> {
    let artifact = ContractArtifact::find(artifacts_dir, name)?;

    let missing = artifact.missing_functions(&REQUIRED_FUNCTIONS);
    if !missing.is_empty() {
        tracing::warn!("⚠️  {} does not declare: {}", name, missing.join(", "));
    }

    ContractFactory::from_artifact(client, &artifact, receipts)
}

/// 以設定檔中的節點與產物部署合約，使用節點的第一個帳戶
pub async fn run_deploy(config: &DappConfig) -> Result<Deployment> {
    let transport = HttpTransport::new(config.rpc_url(), config.request_timeout())?;
    let client = Arc::new(JsonRpcClient::new(transport));

    let factory = get_contract_factory(
        Arc::clone(&client),
        config.artifacts_dir(),
        config.contract_name(),
        config.receipt_settings(),
    )?;

    let deployer = client
        .accounts()
        .await?
        .into_iter()
        .next()
        .ok_or(DappError::NoAccountError)?;
    tracing::info!("👤 Deploying {} from account {}", factory.name(), deployer);

    factory.deploy(deployer).await
}
