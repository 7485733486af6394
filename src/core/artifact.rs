use crate::utils::error::{DappError, Result};
use alloy_primitives::{hex, Bytes};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Hardhat 編譯產物 (`artifacts/contracts/<Source>.sol/<Name>.json`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub abi: Vec<AbiItem>,
    pub bytecode: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl ContractArtifact {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| DappError::InvalidArtifactError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 在產物目錄中依合約名稱尋找，相當於 `getContractFactory(name)` 的查找
    pub fn find<P: AsRef<Path>>(artifacts_dir: P, name: &str) -> Result<Self> {
        let dir = artifacts_dir.as_ref();
        let file_name = format!("{}.json", name);

        let mut candidates = collect_files(dir, &file_name)?;
        candidates.sort();

        for path in candidates {
            let artifact = Self::load(&path)?;
            if artifact.contract_name == name {
                tracing::debug!("Found artifact for {} at {}", name, path.display());
                return Ok(artifact);
            }
        }

        Err(DappError::ArtifactNotFoundError {
            name: name.to_string(),
            dir: dir.display().to_string(),
        })
    }

    /// 部署用的 creation bytecode；介面或抽象合約沒有 bytecode
    pub fn creation_bytecode(&self) -> Result<Bytes> {
        let code = hex::decode(self.bytecode.trim()).map_err(|e| DappError::InvalidArtifactError {
            path: self.contract_name.clone(),
            message: format!("bytecode is not valid hex: {}", e),
        })?;
        if code.is_empty() {
            return Err(DappError::InvalidArtifactError {
                path: self.contract_name.clone(),
                message: "contract has no bytecode (interface or abstract contract?)".to_string(),
            });
        }
        Ok(Bytes::from(code))
    }

    pub fn function_names(&self) -> Vec<&str> {
        self.abi
            .iter()
            .filter(|item| item.kind == "function")
            .filter_map(|item| item.name.as_deref())
            .collect()
    }

    pub fn missing_functions<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        let present = self.function_names();
        required
            .iter()
            .copied()
            .filter(|name| !present.contains(name))
            .collect()
    }
}

/// 不跟隨符號連結，避免目錄迴圈
fn collect_files(dir: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && entry.file_name().to_str() == Some(file_name) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::abi::REQUIRED_FUNCTIONS;
    use tempfile::TempDir;

    fn write_artifact(root: &Path, source: &str, name: &str, bytecode: &str) {
        let dir = root.join("contracts").join(source);
        fs::create_dir_all(&dir).unwrap();
        let artifact = serde_json::json!({
            "_format": "hh-sol-artifact-1",
            "contractName": name,
            "sourceName": format!("contracts/{}", source),
            "abi": [
                {"type": "function", "name": "getSocietyBalance", "stateMutability": "view", "inputs": [], "outputs": []},
                {"type": "function", "name": "makePayment", "stateMutability": "payable", "inputs": [], "outputs": []},
                {"type": "event", "name": "PaymentReceived", "inputs": []}
            ],
            "bytecode": bytecode,
            "deployedBytecode": "0x"
        });
        fs::write(dir.join(format!("{}.json", name)), artifact.to_string()).unwrap();
        fs::write(dir.join(format!("{}.dbg.json", name)), "{}").unwrap();
    }

    #[test]
    fn test_find_artifact_by_name() {
        let temp_dir = TempDir::new().unwrap();
        write_artifact(temp_dir.path(), "SocietyOz.sol", "SocietyManagement", "0x6080604052");

        let artifact = ContractArtifact::find(temp_dir.path(), "SocietyManagement").unwrap();
        assert_eq!(artifact.contract_name, "SocietyManagement");
        assert_eq!(artifact.source_name.as_deref(), Some("contracts/SocietyOz.sol"));
        assert_eq!(
            artifact.creation_bytecode().unwrap(),
            Bytes::from_static(&[0x60, 0x80, 0x60, 0x40, 0x52])
        );
    }

    #[test]
    fn test_missing_artifact() {
        let temp_dir = TempDir::new().unwrap();
        write_artifact(temp_dir.path(), "SocietyOz.sol", "SocietyManagement", "0x6080");

        let result = ContractArtifact::find(temp_dir.path(), "Treasury");
        assert!(matches!(result, Err(DappError::ArtifactNotFoundError { .. })));

        let result = ContractArtifact::find(temp_dir.path().join("nope"), "SocietyManagement");
        assert!(matches!(result, Err(DappError::ArtifactNotFoundError { .. })));
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        let temp_dir = TempDir::new().unwrap();
        write_artifact(temp_dir.path(), "ISociety.sol", "ISociety", "0x");

        let artifact = ContractArtifact::find(temp_dir.path(), "ISociety").unwrap();
        assert!(matches!(
            artifact.creation_bytecode(),
            Err(DappError::InvalidArtifactError { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_find_ignores_symlink_loops() {
        let temp_dir = TempDir::new().unwrap();
        write_artifact(temp_dir.path(), "SocietyOz.sol", "SocietyManagement", "0x6080");

        let contracts = temp_dir.path().join("contracts");
        std::os::unix::fs::symlink("..", contracts.join("a")).unwrap();
        std::os::unix::fs::symlink("..", contracts.join("b")).unwrap();

        let (tx, rx) = std::sync::mpsc::channel();
        let root = temp_dir.path().to_path_buf();
        std::thread::spawn(move || {
            let _ = tx.send(ContractArtifact::find(&root, "SocietyManagement"));
        });

        let artifact = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("artifact lookup did not finish")
            .unwrap();
        assert_eq!(artifact.contract_name, "SocietyManagement");

        let result = ContractArtifact::find(temp_dir.path(), "Treasury");
        assert!(matches!(result, Err(DappError::ArtifactNotFoundError { .. })));
    }

    #[test]
    fn test_missing_functions() {
        let temp_dir = TempDir::new().unwrap();
        write_artifact(temp_dir.path(), "SocietyOz.sol", "SocietyManagement", "0x6080");

        let artifact = ContractArtifact::find(temp_dir.path(), "SocietyManagement").unwrap();
        assert_eq!(
            artifact.function_names(),
            vec!["getSocietyBalance", "makePayment"]
        );
        assert_eq!(
            artifact.missing_functions(&REQUIRED_FUNCTIONS),
            vec!["addMember", "getMemberDetails"]
        );
    }
}
