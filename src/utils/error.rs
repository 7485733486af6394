use thiserror::Error;

#[derive(Error, Debug)]
pub enum DappError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("JSON-RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    #[error("Invalid JSON-RPC response: {message}")]
    InvalidResponseError { message: String },

    #[error("No wallet provider reachable at {url}")]
    WalletUnavailableError { url: String },

    #[error("No active account; connect a wallet first")]
    NoAccountError,

    #[error("ABI decoding failed: {0}")]
    AbiError(#[from] alloy_sol_types::Error),

    #[error("Invalid ETH amount '{value}': {reason}")]
    InvalidAmountError { value: String, reason: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Artifact for contract '{name}' not found under {dir}")]
    ArtifactNotFoundError { name: String, dir: String },

    #[error("Invalid artifact {path}: {message}")]
    InvalidArtifactError { path: String, message: String },

    #[error("Transaction {hash} reverted")]
    TransactionRevertedError { hash: String },

    #[error("Timed out after {seconds}s waiting for transaction {hash}")]
    ReceiptTimeoutError { hash: String, seconds: u64 },

    #[error("Deployment failed: {message}")]
    DeploymentError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Wallet,
    Contract,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DappError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DappError::HttpError(_)
            | DappError::RpcError { .. }
            | DappError::InvalidResponseError { .. }
            | DappError::ReceiptTimeoutError { .. } => ErrorCategory::Network,
            DappError::WalletUnavailableError { .. } | DappError::NoAccountError => {
                ErrorCategory::Wallet
            }
            DappError::AbiError(_)
            | DappError::TransactionRevertedError { .. }
            | DappError::DeploymentError { .. }
            | DappError::ArtifactNotFoundError { .. }
            | DappError::InvalidArtifactError { .. } => ErrorCategory::Contract,
            DappError::ConfigValidationError { .. } | DappError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            DappError::InvalidAmountError { .. } | DappError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            DappError::IoError(_) | DappError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Wallet => ErrorSeverity::Medium,
            ErrorCategory::Contract | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DappError::HttpError(_) | DappError::WalletUnavailableError { .. } => {
                "Make sure the node is running and --rpc-url points at it"
            }
            DappError::RpcError { .. } => "Check the node logs for the rejected request",
            DappError::NoAccountError => "Unlock an account on the node and run `connect`",
            DappError::TransactionRevertedError { .. } => {
                "The contract rejected the call; check membership and the amount sent"
            }
            DappError::ReceiptTimeoutError { .. } => {
                "Increase transactions.receipt_timeout_seconds or check that the node is mining"
            }
            DappError::ArtifactNotFoundError { .. } | DappError::InvalidArtifactError { .. } => {
                "Compile the contracts first so the artifacts directory is populated"
            }
            DappError::InvalidAmountError { .. } => "Enter the amount in ETH, e.g. 0.05",
            DappError::ConfigValidationError { .. } | DappError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and retry"
            }
            _ => "Re-run with --verbose for details",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not talk to the node: {}", self),
            ErrorCategory::Wallet => format!("Wallet problem: {}", self),
            ErrorCategory::Contract => format!("Contract call failed: {}", self),
            ErrorCategory::Configuration => format!("Bad configuration: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::System => format!("Unexpected error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, DappError>;
