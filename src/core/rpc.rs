use crate::domain::model::{TransactionReceipt, TransactionRequest};
use crate::domain::ports::RpcTransport;
use crate::utils::error::{DappError, Result};
use alloy_primitives::{Address, Bytes, B256, U64};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// 透過 HTTP POST 傳送 JSON-RPC 請求
#[derive(Debug, Clone)]
pub struct HttpTransport {
    url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn send(&self, payload: Vec<u8>) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

fn no_params() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

pub struct JsonRpcClient<T> {
    transport: T,
    id: AtomicU64,
}

impl<T: RpcTransport> JsonRpcClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            id: AtomicU64::new(0),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    fn next_id(&self) -> u64 {
        self.id.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub async fn request<P, R>(&self, method: &str, params: P) -> Result<R>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id(),
            method,
            params,
        };
        let payload = serde_json::to_vec(&request)?;
        tracing::debug!("➡️  {} (id {}) to {}", method, request.id, self.endpoint());

        let body = self.transport.send(payload).await?;
        let response: JsonRpcResponse = serde_json::from_slice(&body)?;

        if response.jsonrpc != "2.0" {
            return Err(DappError::InvalidResponseError {
                message: format!("unexpected jsonrpc version '{}'", response.jsonrpc),
            });
        }
        if let Some(error) = response.error {
            tracing::debug!("⬅️  {} failed: {} ({})", method, error.message, error.code);
            return Err(DappError::RpcError {
                code: error.code,
                message: error.message,
            });
        }

        // null 結果可以反序列化為 Option::None
        let result = response.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(result).map_err(|e| DappError::InvalidResponseError {
            message: format!("{} returned an unexpected result: {}", method, e),
        })
    }

    pub async fn accounts(&self) -> Result<Vec<Address>> {
        self.request("eth_accounts", no_params()).await
    }

    pub async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.request("eth_requestAccounts", no_params()).await
    }

    pub async fn chain_id(&self) -> Result<u64> {
        let id: U64 = self.request("eth_chainId", no_params()).await?;
        Ok(id.to::<u64>())
    }

    pub async fn block_number(&self) -> Result<u64> {
        let number: U64 = self.request("eth_blockNumber", no_params()).await?;
        Ok(number.to::<u64>())
    }

    pub async fn call(&self, tx: &TransactionRequest) -> Result<Bytes> {
        self.request("eth_call", (tx, "latest")).await
    }

    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256> {
        self.request("eth_sendTransaction", [tx]).await
    }

    pub async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        self.request("eth_getTransactionReceipt", [hash]).await
    }
}
