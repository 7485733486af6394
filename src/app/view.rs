use crate::app::dapp::Dapp;
use crate::domain::ports::RpcTransport;
use std::fmt::Write;

pub const INSTALL_WALLET_MESSAGE: &str = "Please install a wallet provider in order to use this Dapp.";
pub const CONNECT_WALLET_PROMPT: &str = "[Connect Wallet]  (run `society connect`)";

/// 以純文字輸出目前的畫面
pub fn render<T: RpcTransport + 'static>(dapp: &Dapp<T>) -> String {
    let mut out = String::from("=== Society Management Dapp ===\n");

    if !dapp.has_wallet() {
        out.push_str(INSTALL_WALLET_MESSAGE);
        out.push('\n');
        return out;
    }

    let Some(account) = dapp.account() else {
        out.push_str(CONNECT_WALLET_PROMPT);
        out.push('\n');
        return out;
    };

    // 寫入 String 不會失敗
    let _ = writeln!(out, "Account: {}", account);
    let _ = writeln!(out, "Contract: {}", dapp.contract_address());
    let _ = writeln!(out, "Contract Balance: {} ETH", dapp.balance().unwrap_or("-"));

    let form = &dapp.form;
    out.push_str("\n--- Add a New Member ---\n");
    let _ = writeln!(out, "Name: {}", form.new_member_name);
    let _ = writeln!(out, "Flat Number: {}", form.new_member_flat);

    out.push_str("\n--- Make a Payment ---\n");
    let _ = writeln!(out, "Amount (ETH): {}", form.payment_amount);

    out.push_str("\n--- Member Details ---\n");
    match dapp.member_details() {
        Some(details) if !details.name.is_empty() => {
            let _ = writeln!(out, "Name: {}", details.name);
            let _ = writeln!(out, "Flat Number: {}", details.flat_number);
            let _ = writeln!(out, "Dues Paid: {} ETH", details.dues_paid);
        }
        _ => out.push_str("(not loaded)\n"),
    }

    out
}
