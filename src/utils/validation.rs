use crate::utils::error::{DappError, Result};
use alloy_primitives::Address;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DappError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DappError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DappError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// 驗證 0x 開頭的 20 位元組地址
pub fn validate_address(field_name: &str, value: &str) -> Result<Address> {
    let trimmed = value.trim();
    if !trimmed.starts_with("0x") && !trimmed.starts_with("0X") {
        return Err(DappError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Address must start with 0x".to_string(),
        });
    }

    trimmed
        .parse::<Address>()
        .map_err(|e| DappError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Invalid address: {}", e),
        })
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(DappError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DappError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DappError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("network.rpc_url", "http://127.0.0.1:8545").is_ok());
        assert!(validate_url("network.rpc_url", "https://rpc.example.com").is_ok());
        assert!(validate_url("network.rpc_url", "").is_err());
        assert!(validate_url("network.rpc_url", "invalid-url").is_err());
        assert!(validate_url("network.rpc_url", "ws://127.0.0.1:8546").is_err());
    }

    #[test]
    fn test_validate_address() {
        let address = validate_address(
            "contract.address",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        )
        .unwrap();
        assert_eq!(
            format!("{:?}", address),
            "0x5fbdb2315678afecb367f032d93f642f64180aa3"
        );

        assert!(validate_address("contract.address", "5FbDB2315678afecb367f032d93F642f64180aa3").is_err());
        assert!(validate_address("contract.address", "0x1234").is_err());
        assert!(validate_address("contract.address", "").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("transactions.confirmations", 1, 1).is_ok());
        assert!(validate_positive_number("transactions.confirmations", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("port", 8545, 1, 65535).is_ok());
        assert!(validate_range("port", 0, 1, 65535).is_err());
    }
}
