use crate::config::ReceiptSettings;
use crate::core::abi::{addMemberCall, getMemberDetailsCall, getSocietyBalanceCall, makePaymentCall};
use crate::core::rpc::JsonRpcClient;
use crate::core::wallet::wait_for_receipt;
use crate::domain::model::{MemberDetails, TransactionReceipt, TransactionRequest};
use crate::domain::ports::RpcTransport;
use crate::utils::error::Result;
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use std::sync::Arc;

/// 綁定合約地址與簽署帳戶的合約客戶端
pub struct SocietyContract<T> {
    client: Arc<JsonRpcClient<T>>,
    address: Address,
    signer: Address,
    receipts: ReceiptSettings,
}

impl<T: RpcTransport> SocietyContract<T> {
    pub fn new(
        client: Arc<JsonRpcClient<T>>,
        address: Address,
        signer: Address,
        receipts: ReceiptSettings,
    ) -> Self {
        Self {
            client,
            address,
            signer,
            receipts,
        }
    }

    async fn call<C: SolCall>(&self, call: &C) -> Result<C::Return> {
        let request = TransactionRequest::call(self.signer, self.address, Bytes::from(call.abi_encode()));
        let output = self.client.call(&request).await?;
        Ok(C::abi_decode_returns(&output)?)
    }

    async fn transact<C: SolCall>(&self, call: &C, value: Option<U256>) -> Result<TransactionReceipt> {
        let mut request =
            TransactionRequest::call(self.signer, self.address, Bytes::from(call.abi_encode()));
        if let Some(value) = value {
            request = request.with_value(value);
        }

        let hash = self.client.send_transaction(&request).await?;
        tracing::info!("📤 {} sent: {}", C::SIGNATURE, hash);
        wait_for_receipt(&self.client, hash, &self.receipts).await
    }

    pub async fn get_society_balance(&self) -> Result<U256> {
        self.call(&getSocietyBalanceCall {}).await
    }

    pub async fn add_member(
        &self,
        member: Address,
        name: &str,
        flat_number: U256,
    ) -> Result<TransactionReceipt> {
        let call = addMemberCall {
            member,
            name: name.to_string(),
            flatNumber: flat_number,
        };
        self.transact(&call, None).await
    }

    /// `value` 以 wei 計
    pub async fn make_payment(&self, value: U256) -> Result<TransactionReceipt> {
        self.transact(&makePaymentCall {}, Some(value)).await
    }

    pub async fn get_member_details(&self, member: Address) -> Result<MemberDetails> {
        let details = self.call(&getMemberDetailsCall { member }).await?;
        Ok(MemberDetails {
            name: details.name,
            flat_number: details.flatNumber,
            dues_paid: details.duesPaid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolValue;

    #[test]
    fn test_selectors_match_solidity_signatures() {
        assert_eq!(getSocietyBalanceCall::SIGNATURE, "getSocietyBalance()");
        assert_eq!(addMemberCall::SIGNATURE, "addMember(address,string,uint256)");
        assert_eq!(makePaymentCall::SIGNATURE, "makePayment()");
        assert_eq!(getMemberDetailsCall::SIGNATURE, "getMemberDetails(address)");
    }

    #[test]
    fn test_member_details_decoding() {
        let encoded = ("Asha".to_string(), U256::from(204), U256::from(10u64.pow(17))).abi_encode_params();
        let decoded = getMemberDetailsCall::abi_decode_returns(&encoded).unwrap();

        assert_eq!(decoded.name, "Asha");
        assert_eq!(decoded.flatNumber, U256::from(204));
        assert_eq!(decoded.duesPaid, U256::from(10u64.pow(17)));
    }
}
