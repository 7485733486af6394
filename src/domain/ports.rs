use crate::utils::error::Result;
use async_trait::async_trait;

/// 傳送序列化好的 JSON-RPC 請求並回傳原始回應內容
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn send(&self, payload: Vec<u8>) -> Result<Vec<u8>>;

    /// 用於日誌與錯誤訊息
    fn endpoint(&self) -> &str;
}
