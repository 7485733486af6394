pub mod dapp;
pub mod view;

pub use dapp::{Dapp, MemberForm};
pub use view::render;
