use crate::config::ReceiptSettings;
use crate::core::rpc::JsonRpcClient;
use crate::domain::model::TransactionReceipt;
use crate::domain::ports::RpcTransport;
use crate::utils::error::{DappError, Result};
use alloy_primitives::{Address, B256};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// 提供帳戶與簽署的錢包（開發節點上已解鎖的帳戶）
pub struct Wallet<T> {
    client: Arc<JsonRpcClient<T>>,
}

impl<T> Clone for Wallet<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<T: RpcTransport + 'static> Wallet<T> {
    pub fn new(client: Arc<JsonRpcClient<T>>) -> Self {
        Self { client }
    }

    /// 以 `eth_chainId` 探測錢包
    pub async fn discover(client: Arc<JsonRpcClient<T>>) -> Result<Self> {
        match client.chain_id().await {
            Ok(chain_id) => {
                tracing::info!("🔌 Wallet provider at {} (chain id {})", client.endpoint(), chain_id);
                Ok(Self::new(client))
            }
            Err(e) => {
                tracing::debug!("eth_chainId failed: {}", e);
                Err(DappError::WalletUnavailableError {
                    url: client.endpoint().to_string(),
                })
            }
        }
    }

    /// 探測錢包是否存在；節點無法連線時回傳 None
    pub async fn detect(client: Arc<JsonRpcClient<T>>) -> Option<Self> {
        match Self::discover(client).await {
            Ok(wallet) => Some(wallet),
            Err(e) => {
                tracing::warn!("⚠️  {} ({:?})", e.user_friendly_message(), e.severity());
                None
            }
        }
    }

    pub fn client(&self) -> &Arc<JsonRpcClient<T>> {
        &self.client
    }

    pub async fn accounts(&self) -> Result<Vec<Address>> {
        self.client.accounts().await
    }

    pub async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.client.request_accounts().await
    }

    /// 定期輪詢 `eth_accounts`，帳戶清單改變時通知接收端。
    /// 所有接收端都被丟棄後輪詢就會結束。
    pub fn watch_accounts(
        &self,
        initial: Vec<Address>,
        interval: Duration,
    ) -> watch::Receiver<Vec<Address>> {
        let (tx, rx) = watch::channel(initial);
        let client = Arc::clone(&self.client);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }

                match client.accounts().await {
                    Ok(accounts) => {
                        tx.send_if_modified(|current| {
                            if *current != accounts {
                                tracing::debug!("accountsChanged: {:?}", accounts);
                                *current = accounts;
                                true
                            } else {
                                false
                            }
                        });
                    }
                    Err(e) => tracing::warn!("Failed to poll accounts: {}", e),
                }
            }
            tracing::debug!("Account watcher stopped");
        });

        rx
    }
}

/// 等待交易被打包，相當於 ethers.js 的 `tx.wait()`
pub async fn wait_for_receipt<T: RpcTransport>(
    client: &JsonRpcClient<T>,
    hash: B256,
    settings: &ReceiptSettings,
) -> Result<TransactionReceipt> {
    let poll = async {
        loop {
            if let Some(receipt) = client.transaction_receipt(hash).await? {
                if let Some(mined_at) = receipt.block().filter(|_| settings.confirmations > 1) {
                    let target = mined_at + settings.confirmations - 1;
                    while client.block_number().await? < target {
                        tokio::time::sleep(settings.poll_interval).await;
                    }
                }
                return Ok::<_, DappError>(receipt);
            }
            tokio::time::sleep(settings.poll_interval).await;
        }
    };

    let receipt = tokio::time::timeout(settings.timeout, poll)
        .await
        .map_err(|_| DappError::ReceiptTimeoutError {
            hash: hash.to_string(),
            seconds: settings.timeout.as_secs(),
        })??;

    if !receipt.succeeded() {
        return Err(DappError::TransactionRevertedError {
            hash: hash.to_string(),
        });
    }

    tracing::debug!("Transaction {} mined in block {:?}", hash, receipt.block());
    Ok(receipt)
}
