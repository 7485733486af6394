use crate::utils::error::{DappError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
/// Hardhat 本地鏈第一個部署的合約地址
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const DEFAULT_CONTRACT_NAME: &str = "SocietyManagement";
pub const DEFAULT_ARTIFACTS_DIR: &str = "./artifacts";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DappConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub transactions: TransactionConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractConfig {
    pub name: Option<String>,
    pub address: Option<String>,
    pub artifacts_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionConfig {
    pub poll_interval_ms: Option<u64>,
    pub receipt_timeout_seconds: Option<u64>,
    pub confirmations: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletConfig {
    pub watch_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

/// 等待交易收據時使用的參數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptSettings {
    pub poll_interval: Duration,
    pub timeout: Duration,
    pub confirmations: u64,
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            timeout: Duration::from_secs(120),
            confirmations: 1,
        }
    }
}

impl DappConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DappError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DappError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SOCIETY_RPC_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DappError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn rpc_url(&self) -> &str {
        self.network.rpc_url.as_deref().unwrap_or(DEFAULT_RPC_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.network.request_timeout_seconds.unwrap_or(30))
    }

    pub fn contract_name(&self) -> &str {
        self.contract.name.as_deref().unwrap_or(DEFAULT_CONTRACT_NAME)
    }

    pub fn contract_address(&self) -> Result<Address> {
        let raw = self
            .contract
            .address
            .as_deref()
            .unwrap_or(DEFAULT_CONTRACT_ADDRESS);
        validation::validate_address("contract.address", raw)
    }

    pub fn artifacts_dir(&self) -> &str {
        self.contract
            .artifacts_dir
            .as_deref()
            .unwrap_or(DEFAULT_ARTIFACTS_DIR)
    }

    pub fn receipt_settings(&self) -> ReceiptSettings {
        let defaults = ReceiptSettings::default();
        ReceiptSettings {
            poll_interval: self
                .transactions
                .poll_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            timeout: self
                .transactions
                .receipt_timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            confirmations: self
                .transactions
                .confirmations
                .unwrap_or(defaults.confirmations),
        }
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.wallet.watch_interval_ms.unwrap_or(1000))
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or("info")
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.format.unwrap_or_default()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("network.rpc_url", self.rpc_url())?;
        self.contract_address()?;
        validation::validate_non_empty_string("contract.name", self.contract_name())?;
        validation::validate_non_empty_string("contract.artifacts_dir", self.artifacts_dir())?;

        if let Some(timeout) = self.network.request_timeout_seconds {
            validation::validate_positive_number("network.request_timeout_seconds", timeout, 1)?;
        }
        if let Some(interval) = self.transactions.poll_interval_ms {
            validation::validate_positive_number("transactions.poll_interval_ms", interval, 1)?;
        }
        if let Some(timeout) = self.transactions.receipt_timeout_seconds {
            validation::validate_positive_number(
                "transactions.receipt_timeout_seconds",
                timeout,
                1,
            )?;
        }
        if let Some(confirmations) = self.transactions.confirmations {
            validation::validate_range("transactions.confirmations", confirmations, 1, 64)?;
        }
        if let Some(interval) = self.wallet.watch_interval_ms {
            validation::validate_positive_number("wallet.watch_interval_ms", interval, 1)?;
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level()) {
            return Err(DappError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.log_level().to_string(),
                reason: format!("Valid levels: {}", valid_levels.join(", ")),
            });
        }

        Ok(())
    }
}

impl Validate for DappConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
