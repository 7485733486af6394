pub mod abi;
pub mod artifact;
pub mod contract;
pub mod deployer;
pub mod rpc;
pub mod units;
pub mod wallet;

pub use crate::domain::model::{MemberDetails, MemberView, TransactionReceipt, TransactionRequest};
pub use crate::domain::ports::RpcTransport;
pub use crate::utils::error::Result;
