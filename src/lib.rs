pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, DeployArgs};

pub use app::{Dapp, MemberForm};
pub use config::{DappConfig, ReceiptSettings};
pub use crate::core::contract::SocietyContract;
pub use crate::core::deployer::{get_contract_factory, run_deploy, ContractFactory, Deployment};
pub use crate::core::rpc::{HttpTransport, JsonRpcClient};
pub use crate::core::wallet::Wallet;
pub use utils::error::{DappError, Result};
