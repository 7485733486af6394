use alloy_primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};

/// 合約 `getMemberDetails` 回傳的原始資料
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDetails {
    pub name: String,
    pub flat_number: U256,
    pub dues_paid: U256,
}

/// 顯示用的會員資料，會費以 ETH 表示
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberView {
    pub name: String,
    pub flat_number: String,
    pub dues_paid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
}

impl TransactionRequest {
    pub fn call(from: Address, to: Address, data: Bytes) -> Self {
        Self {
            from,
            to: Some(to),
            value: None,
            data: Some(data),
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    /// 沒有 `to` 的交易即為合約建立交易
    pub fn create(from: Address, bytecode: Bytes) -> Self {
        Self {
            from,
            to: None,
            value: None,
            data: Some(bytecode),
        }
    }
}

/// `eth_getTransactionReceipt` 的子集
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub contract_address: Option<Address>,
    #[serde(default)]
    pub status: Option<U64>,
}

impl TransactionReceipt {
    /// 沒有 status 欄位的舊節點（Byzantium 前）視為成功
    pub fn succeeded(&self) -> bool {
        self.status.map(|s| s != U64::ZERO).unwrap_or(true)
    }

    pub fn block(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }
}
