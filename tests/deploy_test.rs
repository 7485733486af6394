use alloy_primitives::{Address, B256};
use anyhow::Result;
use httpmock::prelude::*;
use society_dapp::{run_deploy, DappConfig, DappError};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const DEPLOYER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
const DEPLOYED: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
const TX_HASH: &str = "0xefefefefefefefefefefefefefefefefefefefefefefefefefefefefefefefef";
const BYTECODE: &str = "0x6080604052348015600f57600080fd5b50";

fn write_artifact(root: &Path) {
    let dir = root.join("contracts").join("SocietyOz.sol");
    std::fs::create_dir_all(&dir).unwrap();
    let artifact = serde_json::json!({
        "_format": "hh-sol-artifact-1",
        "contractName": "SocietyManagement",
        "sourceName": "contracts/SocietyOz.sol",
        "abi": [
            {"type": "function", "name": "getSocietyBalance", "stateMutability": "view", "inputs": [], "outputs": []},
            {"type": "function", "name": "addMember", "stateMutability": "nonpayable", "inputs": [], "outputs": []},
            {"type": "function", "name": "makePayment", "stateMutability": "payable", "inputs": [], "outputs": []},
            {"type": "function", "name": "getMemberDetails", "stateMutability": "view", "inputs": [], "outputs": []}
        ],
        "bytecode": BYTECODE,
        "deployedBytecode": "0x"
    });
    std::fs::write(dir.join("SocietyManagement.json"), artifact.to_string()).unwrap();
}

fn mock_node(server: &MockServer, contract_address: serde_json::Value) {
    server.mock(|when, then| {
        when.method(POST).path("/").body_contains("\"method\":\"eth_accounts\"");
        then.status(200)
            .json_body(serde_json::json!({"jsonrpc": "2.0", "id": 1, "result": [DEPLOYER]}));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_contains("\"method\":\"eth_sendTransaction\"")
            .body_contains(BYTECODE);
        then.status(200)
            .json_body(serde_json::json!({"jsonrpc": "2.0", "id": 1, "result": TX_HASH}));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_contains("\"method\":\"eth_getTransactionReceipt\"");
        then.status(200).json_body(serde_json::json!({
            "jsonrpc": "2.0", "id": 1,
            "result": {
                "transactionHash": TX_HASH,
                "blockNumber": "0x1",
                "contractAddress": contract_address,
                "status": "0x1"
            }
        }));
    });
}

fn config_for(server: &MockServer, artifacts: &Path) -> Result<DappConfig> {
    let toml = format!(
        r#"
[network]
rpc_url = "{}"

[contract]
artifacts_dir = "{}"

[transactions]
poll_interval_ms = 10
receipt_timeout_seconds = 2
"#,
        server.base_url(),
        artifacts.display().to_string().replace('\\', "/")
    );
    Ok(DappConfig::from_toml_str(&toml)?)
}

#[tokio::test]
async fn test_run_deploy_returns_contract_address() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_artifact(temp_dir.path());

    let server = MockServer::start();
    mock_node(&server, serde_json::json!(DEPLOYED));

    let config = config_for(&server, temp_dir.path())?;
    let deployment = run_deploy(&config).await?;

    assert_eq!(deployment.address, DEPLOYED.parse::<Address>()?);
    assert_eq!(deployment.block_number, Some(1));
    assert_eq!(deployment.transaction_hash, TX_HASH.parse::<B256>()?);
    Ok(())
}

#[tokio::test]
async fn test_receipt_without_contract_address_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_artifact(temp_dir.path());

    let server = MockServer::start();
    mock_node(&server, serde_json::Value::Null);

    let config = config_for(&server, temp_dir.path())?;
    let result = run_deploy(&config).await;

    assert!(matches!(result, Err(DappError::DeploymentError { .. })));
    Ok(())
}

#[tokio::test]
async fn test_unknown_contract_name_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_artifact(temp_dir.path());

    let server = MockServer::start();
    let mut config = config_for(&server, temp_dir.path())?;
    config.contract.name = Some("Treasury".to_string());

    let result = run_deploy(&config).await;
    assert!(matches!(result, Err(DappError::ArtifactNotFoundError { .. })));
    Ok(())
}

#[test]
fn test_deploy_binary_prints_address_and_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    write_artifact(temp_dir.path());

    let server = MockServer::start();
    mock_node(&server, serde_json::json!(DEPLOYED));

    let output = Command::new(env!("CARGO_BIN_EXE_deploy"))
        .args([
            "--rpc-url",
            &server.base_url(),
            "--artifacts-dir",
            temp_dir.path().to_str().unwrap(),
        ])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains(&format!(
        "Society Management Contract deployed to localhost Chain [Address]: {}",
        DEPLOYED
    )));
}

#[test]
fn test_deploy_binary_exits_one_on_error() {
    let temp_dir = TempDir::new().unwrap();
    // 沒有產物檔案

    let server = MockServer::start();

    let output = Command::new(env!("CARGO_BIN_EXE_deploy"))
        .args([
            "--rpc-url",
            &server.base_url(),
            "--artifacts-dir",
            temp_dir.path().to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("SocietyManagement"));
}
