//! Solidity interface of the deployed `SocietyManagement` contract.

use alloy_sol_types::sol;

sol! {
    function getSocietyBalance() external view returns (uint256);

    function addMember(address member, string name, uint256 flatNumber) external;

    function makePayment() external payable;

    function getMemberDetails(address member)
        external
        view
        returns (string name, uint256 flatNumber, uint256 duesPaid);
}

/// 合約必須提供的函式，用於檢查編譯產物
pub const REQUIRED_FUNCTIONS: [&str; 4] = [
    "getSocietyBalance",
    "addMember",
    "makePayment",
    "getMemberDetails",
];
