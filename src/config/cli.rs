use crate::config::toml_config::DappConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

/// 未指定 --config 時，若目前目錄有此檔案就自動載入
pub const DEFAULT_CONFIG_FILE: &str = "society.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "society")]
#[command(about = "Society dues management dapp client")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// JSON-RPC endpoint of the wallet provider (overrides config)
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Deployed SocietyManagement contract address (overrides config)
    #[arg(long)]
    pub contract_address: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the dapp view for the active account
    Status,
    /// Request accounts from the wallet provider
    Connect,
    /// Read the society balance
    Balance,
    /// Register a member
    AddMember {
        #[arg(long)]
        name: String,
        #[arg(long)]
        flat: String,
        /// Member address, defaults to the active account
        #[arg(long)]
        address: Option<String>,
    },
    /// Pay dues, amount in ETH
    Pay {
        #[arg(long)]
        amount: String,
    },
    /// Read member details, defaults to the active account
    Member {
        #[arg(long)]
        address: Option<String>,
    },
    /// Follow account changes reported by the wallet provider
    Watch,
    /// Interactive form
    Shell,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "deploy")]
#[command(about = "Deploy the society management contract")]
pub struct DeployArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Directory holding compiled contract artifacts
    #[arg(long)]
    pub artifacts_dir: Option<String>,

    /// Contract name to look up in the artifacts
    #[arg(long)]
    pub contract: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

fn load_base_config(path: Option<&str>) -> Result<DappConfig> {
    match path {
        Some(path) => DappConfig::from_file(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => DappConfig::from_file(DEFAULT_CONFIG_FILE),
        None => Ok(DappConfig::default()),
    }
}

impl CliConfig {
    /// 合併檔案配置與命令列覆蓋設定（命令列優先）
    pub fn resolve(&self) -> Result<DappConfig> {
        let mut config = load_base_config(self.config.as_deref())?;

        if let Some(rpc_url) = &self.rpc_url {
            config.network.rpc_url = Some(rpc_url.clone());
        }
        if let Some(address) = &self.contract_address {
            config.contract.address = Some(address.clone());
        }

        Ok(config)
    }
}

impl DeployArgs {
    pub fn resolve(&self) -> Result<DappConfig> {
        let mut config = load_base_config(self.config.as_deref())?;

        if let Some(rpc_url) = &self.rpc_url {
            config.network.rpc_url = Some(rpc_url.clone());
        }
        if let Some(dir) = &self.artifacts_dir {
            config.contract.artifacts_dir = Some(dir.clone());
        }
        if let Some(name) = &self.contract {
            config.contract.name = Some(name.clone());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_overrides_file_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[network]\nrpc_url = \"http://file-node:8545\"\n\n[contract]\naddress = \"0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512\""
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from([
            "society",
            "--config",
            &path,
            "--rpc-url",
            "http://cli-node:8545",
            "balance",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.rpc_url(), "http://cli-node:8545");
        assert_eq!(
            config.contract.address.as_deref(),
            Some("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512")
        );
        assert!(matches!(cli.command, Command::Balance));
    }

    #[test]
    fn test_parse_add_member_command() {
        let cli = CliConfig::parse_from(["society", "add-member", "--name", "Asha", "--flat", "204"]);
        match cli.command {
            Command::AddMember {
                name,
                flat,
                address,
            } => {
                assert_eq!(name, "Asha");
                assert_eq!(flat, "204");
                assert!(address.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_deploy_args_override_contract_lookup() {
        let args = DeployArgs::parse_from([
            "deploy",
            "--config",
            "/nonexistent/society.toml",
        ]);
        assert!(args.resolve().is_err());

        let args = DeployArgs::parse_from([
            "deploy",
            "--artifacts-dir",
            "./out",
            "--contract",
            "SocietyV2",
        ]);
        let config = args.resolve().unwrap();
        assert_eq!(config.artifacts_dir(), "./out");
        assert_eq!(config.contract_name(), "SocietyV2");
    }
}
