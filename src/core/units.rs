use crate::utils::error::{DappError, Result};
use alloy_primitives::utils;
use alloy_primitives::U256;

const ETHER_DECIMALS: usize = 18;

fn invalid(value: &str, reason: &str) -> DappError {
    DappError::InvalidAmountError {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// 將十進位的 ETH 字串（例如 "0.05"）轉成 wei
pub fn parse_ether(value: &str) -> Result<U256> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(value, "amount is empty"));
    }
    if trimmed.starts_with('-') {
        return Err(invalid(value, "amount cannot be negative"));
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid(value, "amount has no digits"));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid(value, "amount must be a decimal number"));
    }
    if fraction.len() > ETHER_DECIMALS {
        return Err(invalid(value, "amount has more than 18 decimal places"));
    }

    let normalized = match (whole.is_empty(), fraction.is_empty()) {
        (true, _) => format!("0.{}", fraction),
        (false, true) => whole.to_string(),
        (false, false) => format!("{}.{}", whole, fraction),
    };
    utils::parse_ether(&normalized).map_err(|e| invalid(value, &e.to_string()))
}

/// 以 ethers.js `formatEther` 的格式輸出：去掉尾端的 0，但至少保留一位小數
pub fn format_ether(wei: U256) -> String {
    let formatted = utils::format_ether(wei);
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{}.0", whole)
            } else {
                format!("{}.{}", whole, fraction)
            }
        }
        None => format!("{}.0", formatted),
    }
}
