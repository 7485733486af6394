use crate::config::ReceiptSettings;
use crate::core::contract::SocietyContract;
use crate::core::rpc::JsonRpcClient;
use crate::core::units::{format_ether, parse_ether};
use crate::core::wallet::Wallet;
use crate::domain::model::{MemberDetails, MemberView};
use crate::domain::ports::RpcTransport;
use crate::utils::error::{DappError, Result};
use crate::utils::validation::validate_address;
use alloy_primitives::{Address, U256};
use std::sync::Arc;

pub const WALLET_REQUIRED_ALERT: &str = "A wallet provider is required to connect";
pub const MEMBER_ADDED_ALERT: &str = "Member added successfully!";
pub const PAYMENT_MADE_ALERT: &str = "Payment made successfully!";

/// 表單欄位，空字串代表未填
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberForm {
    pub new_member_name: String,
    pub new_member_flat: String,
    /// 留空時使用目前帳戶
    pub new_member_address: String,
    pub payment_amount: String,
    /// 查詢會員資料的地址，留空時使用目前帳戶
    pub lookup_address: String,
}

/// 一個使用者工作階段的狀態：錢包、帳戶、合約客戶端與畫面資料。
///
/// 每個操作都只送出一個請求並等待結果；失敗只會記錄到日誌，
/// 回傳值表示操作是否完成。
pub struct Dapp<T> {
    wallet: Option<Wallet<T>>,
    account: Option<Address>,
    contract: Option<SocietyContract<T>>,
    contract_address: Address,
    receipts: ReceiptSettings,
    balance: Option<String>,
    member_details: Option<MemberView>,
    alerts: Vec<String>,
    pub form: MemberForm,
}

impl<T: RpcTransport + 'static> Dapp<T> {
    pub fn new(wallet: Option<Wallet<T>>, contract_address: Address, receipts: ReceiptSettings) -> Self {
        Self {
            wallet,
            account: None,
            contract: None,
            contract_address,
            receipts,
            balance: None,
            member_details: None,
            alerts: Vec::new(),
            form: MemberForm::default(),
        }
    }

    /// 探測錢包後建立工作階段
    pub async fn connect(
        client: Arc<JsonRpcClient<T>>,
        contract_address: Address,
        receipts: ReceiptSettings,
    ) -> Self {
        let wallet = Wallet::detect(client).await;
        Self::new(wallet, contract_address, receipts)
    }

    pub fn wallet(&self) -> Option<&Wallet<T>> {
        self.wallet.as_ref()
    }

    pub fn has_wallet(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn has_contract(&self) -> bool {
        self.contract.is_some()
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    pub fn balance(&self) -> Option<&str> {
        self.balance.as_deref()
    }

    pub fn member_details(&self) -> Option<&MemberView> {
        self.member_details.as_ref()
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    fn alert(&mut self, message: &str) {
        tracing::info!("🔔 {}", message);
        self.alerts.push(message.to_string());
    }

    /// 讀取已授權的帳戶（不會跳出授權請求）
    pub async fn init(&mut self) -> bool {
        let Some(wallet) = &self.wallet else {
            tracing::warn!("Please install a wallet provider!");
            return false;
        };

        match wallet.accounts().await {
            Ok(accounts) => {
                self.handle_accounts(&accounts);
                true
            }
            Err(e) => {
                tracing::error!("Error fetching accounts: {}", e);
                false
            }
        }
    }

    pub async fn connect_account(&mut self) -> bool {
        let Some(wallet) = &self.wallet else {
            self.alert(WALLET_REQUIRED_ALERT);
            return false;
        };

        match wallet.request_accounts().await {
            Ok(accounts) => {
                self.handle_accounts(&accounts);
                self.account.is_some()
            }
            Err(e) => {
                tracing::error!("Error connecting account: {}", e);
                false
            }
        }
    }

    /// 空清單不會改變目前帳戶
    pub fn handle_accounts(&mut self, accounts: &[Address]) {
        if let Some(first) = accounts.first() {
            self.set_account(*first);
        }
    }

    pub fn handle_accounts_changed(&mut self, accounts: &[Address]) {
        match accounts.first() {
            None => tracing::info!("Please connect to your wallet."),
            Some(first) => self.set_account(*first),
        }
    }

    fn set_account(&mut self, account: Address) {
        if self.account == Some(account) && self.contract.is_some() {
            return;
        }
        tracing::info!("👤 Active account: {}", account);
        if self.account.is_some() {
            self.member_details = None;
        }
        self.account = Some(account);
        self.refresh_contract();
    }

    /// 錢包與帳戶都存在時重建合約客戶端
    fn refresh_contract(&mut self) {
        self.contract = match (&self.wallet, self.account) {
            (Some(wallet), Some(account)) => Some(SocietyContract::new(
                Arc::clone(wallet.client()),
                self.contract_address,
                account,
                self.receipts,
            )),
            _ => None,
        };
    }

    pub async fn get_balance(&mut self) -> bool {
        let Some(contract) = &self.contract else {
            return false;
        };

        match contract.get_society_balance().await {
            Ok(balance) => {
                self.balance = Some(format_ether(balance));
                true
            }
            Err(e) => {
                tracing::error!("Error fetching balance: {}", e);
                false
            }
        }
    }

    pub async fn add_member(&mut self) -> bool {
        let Some(contract) = &self.contract else {
            return false;
        };
        if self.form.new_member_name.trim().is_empty() || self.form.new_member_flat.trim().is_empty() {
            tracing::debug!("Member name and flat number are required");
            return false;
        }

        let result = submit_member(contract, &self.form, self.account).await;
        match result {
            Ok(()) => {
                self.alert(MEMBER_ADDED_ALERT);
                self.form.new_member_name.clear();
                self.form.new_member_flat.clear();
                self.form.new_member_address.clear();
                true
            }
            Err(e) => {
                tracing::error!("Error adding member: {}", e);
                false
            }
        }
    }

    pub async fn make_payment(&mut self) -> bool {
        let Some(contract) = &self.contract else {
            return false;
        };
        if self.form.payment_amount.trim().is_empty() {
            return false;
        }

        let result = pay_dues(contract, &self.form.payment_amount).await;

        match result {
            Ok(()) => {
                self.alert(PAYMENT_MADE_ALERT);
                self.form.payment_amount.clear();
                self.get_balance().await;
                true
            }
            Err(e) => {
                tracing::error!("Error making payment: {}", e);
                false
            }
        }
    }

    pub async fn get_member_details(&mut self) -> bool {
        let Some(contract) = &self.contract else {
            return false;
        };

        let result = fetch_member(contract, &self.form.lookup_address, self.account).await;

        match result {
            Ok(details) => {
                self.member_details = Some(MemberView {
                    name: details.name,
                    flat_number: details.flat_number.to_string(),
                    dues_paid: format_ether(details.dues_paid),
                });
                true
            }
            Err(e) => {
                tracing::error!("Error fetching member details: {}", e);
                false
            }
        }
    }

    /// 首次顯示時自動讀取餘額，再輸出畫面
    pub async fn view(&mut self) -> String {
        if self.account.is_some() && self.balance.is_none() {
            self.get_balance().await;
        }
        super::view::render(self)
    }
}

async fn submit_member<T: RpcTransport>(
    contract: &SocietyContract<T>,
    form: &MemberForm,
    account: Option<Address>,
) -> Result<()> {
    let member = resolve_member(&form.new_member_address, account)?;
    let flat_number = parse_flat_number(&form.new_member_flat)?;
    contract
        .add_member(member, form.new_member_name.trim(), flat_number)
        .await?;
    Ok(())
}

async fn pay_dues<T: RpcTransport>(contract: &SocietyContract<T>, amount: &str) -> Result<()> {
    let amount_in_wei = parse_ether(amount)?;
    tracing::debug!("Paying {} wei", amount_in_wei);
    contract.make_payment(amount_in_wei).await?;
    Ok(())
}

async fn fetch_member<T: RpcTransport>(
    contract: &SocietyContract<T>,
    lookup: &str,
    account: Option<Address>,
) -> Result<MemberDetails> {
    let member = resolve_member(lookup, account)?;
    contract.get_member_details(member).await
}

fn resolve_member(input: &str, account: Option<Address>) -> Result<Address> {
    if input.trim().is_empty() {
        account.ok_or(DappError::NoAccountError)
    } else {
        validate_address("member_address", input)
    }
}

pub fn parse_flat_number(input: &str) -> Result<U256> {
    input
        .trim()
        .parse::<u64>()
        .map(U256::from)
        .map_err(|e| DappError::ValidationError {
            message: format!("flat number '{}' is not a whole number: {}", input, e),
        })
}
