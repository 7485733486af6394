use clap::Parser;
use society_dapp::utils::logger::{self, LogFormat};
use society_dapp::utils::validation::Validate;
use society_dapp::{CliConfig, Command, Dapp, DappError, HttpTransport, JsonRpcClient};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

const SHELL_HELP: &str = "\
Commands:
  name <text>       set the new member name
  flat <number>     set the new member flat number
  address <0x..>    set the new member address (blank = your account)
  add               add the member
  amount <eth>      set the payment amount in ETH
  pay               pay dues
  lookup <0x..>     set the address for member details (blank = your account)
  details           load member details
  balance           refresh the society balance
  connect           request accounts from the wallet
  view              show the dapp
  help              show this help
  quit              exit";

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let log_format = if cli.json_logs {
        LogFormat::Json
    } else {
        config.log_format()
    };
    logger::init_cli_logger(cli.verbose, config.log_level(), log_format);
    tracing::debug!("CLI config: {:?}", cli);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report_error(&e);
        std::process::exit(1);
    }

    let setup = config.contract_address().and_then(|address| {
        HttpTransport::new(config.rpc_url(), config.request_timeout())
            .map(|transport| (address, transport))
    });
    let (contract_address, transport) = match setup {
        Ok(setup) => setup,
        Err(e) => {
            report_error(&e);
            std::process::exit(1);
        }
    };

    let client = Arc::new(JsonRpcClient::new(transport));
    let mut dapp = Dapp::connect(client, contract_address, config.receipt_settings()).await;
    dapp.init().await;

    let interactive = matches!(cli.command, Command::Watch | Command::Shell);
    let completed = match cli.command {
        Command::Status => dapp.has_wallet(),
        Command::Connect => dapp.connect_account().await,
        Command::Balance => ensure_account(&mut dapp).await && dapp.get_balance().await,
        Command::AddMember {
            name,
            flat,
            address,
        } => {
            dapp.form.new_member_name = name;
            dapp.form.new_member_flat = flat;
            dapp.form.new_member_address = address.unwrap_or_default();
            ensure_account(&mut dapp).await && dapp.add_member().await
        }
        Command::Pay { amount } => {
            dapp.form.payment_amount = amount;
            ensure_account(&mut dapp).await && dapp.make_payment().await
        }
        Command::Member { address } => {
            dapp.form.lookup_address = address.unwrap_or_default();
            ensure_account(&mut dapp).await && dapp.get_member_details().await
        }
        Command::Watch => {
            watch(&mut dapp, config.watch_interval(), tokio::signal::ctrl_c()).await
        }
        Command::Shell => shell(&mut dapp, config.watch_interval()).await,
    };

    print_alerts(&mut dapp);
    if !interactive {
        println!("{}", dapp.view().await);
    }

    if !completed {
        std::process::exit(1);
    }
}

fn report_error(e: &DappError) {
    eprintln!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e.user_friendly_message(),
        e.category(),
        e.severity()
    );
    eprintln!("💡 {}", e.recovery_suggestion());
}

/// 一次性指令在沒有帳戶時自動要求連線
async fn ensure_account(dapp: &mut Dapp<HttpTransport>) -> bool {
    if dapp.account().is_some() {
        return true;
    }
    dapp.connect_account().await
}

fn print_alerts(dapp: &mut Dapp<HttpTransport>) {
    for alert in dapp.take_alerts() {
        println!("🔔 {}", alert);
    }
}

/// 監看帳戶變化直到 `shutdown` 完成
async fn watch<F: Future>(dapp: &mut Dapp<HttpTransport>, interval: Duration, shutdown: F) -> bool {
    let Some(wallet) = dapp.wallet().cloned() else {
        dapp.connect_account().await;
        return false;
    };

    let initial = wallet.accounts().await.unwrap_or_default();
    let mut changes = wallet.watch_accounts(initial, interval);
    println!("👀 Watching accounts on {} (Ctrl-C to stop)", wallet.client().endpoint());

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let accounts = changes.borrow_and_update().clone();
                dapp.handle_accounts_changed(&accounts);
                match dapp.account() {
                    Some(account) if !accounts.is_empty() => println!("👤 Active account: {}", account),
                    _ => println!("⚠️  No accounts exposed; please connect to your wallet."),
                }
            }
            _ = &mut shutdown => break,
        }
    }
    true
}

enum ShellAction {
    Continue,
    Quit,
}

async fn shell(dapp: &mut Dapp<HttpTransport>, interval: Duration) -> bool {
    println!("{}", dapp.view().await);
    println!("{}", SHELL_HELP);

    let mut changes = match dapp.wallet().cloned() {
        Some(wallet) => {
            let initial = wallet.accounts().await.unwrap_or_default();
            Some(wallet.watch_accounts(initial, interval))
        }
        None => None,
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!("Failed to read input: {}", e);
                        break;
                    }
                };
                let action = run_shell_line(dapp, line.trim()).await;
                print_alerts(dapp);
                if let ShellAction::Quit = action {
                    break;
                }
            }
            changed = async { changes.as_mut()?.changed().await.ok() }, if changes.is_some() => {
                match changed {
                    Some(()) => {
                        if let Some(rx) = changes.as_mut() {
                            let accounts = rx.borrow_and_update().clone();
                            dapp.handle_accounts_changed(&accounts);
                            println!("{}", dapp.view().await);
                        }
                    }
                    None => changes = None,
                }
            }
        }
    }
    true
}

async fn run_shell_line(dapp: &mut Dapp<HttpTransport>, line: &str) -> ShellAction {
    let (command, arg) = match line.split_once(' ') {
        Some((command, arg)) => (command, arg.trim().to_string()),
        None => (line, String::new()),
    };

    match command {
        "" => {}
        "name" => dapp.form.new_member_name = arg,
        "flat" => dapp.form.new_member_flat = arg,
        "address" => dapp.form.new_member_address = arg,
        "amount" => dapp.form.payment_amount = arg,
        "lookup" => dapp.form.lookup_address = arg,
        "add" => {
            dapp.add_member().await;
        }
        "pay" => {
            dapp.make_payment().await;
        }
        "details" => {
            dapp.get_member_details().await;
        }
        "balance" => {
            dapp.get_balance().await;
        }
        "connect" => {
            dapp.connect_account().await;
        }
        "view" => println!("{}", dapp.view().await),
        "help" => println!("{}", SHELL_HELP),
        "quit" | "exit" => return ShellAction::Quit,
        other => println!("Unknown command '{}'; type `help`", other),
    }
    ShellAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use society_dapp::{ReceiptSettings, Wallet};

    fn offline_dapp(with_wallet: bool) -> Dapp<HttpTransport> {
        let transport = HttpTransport::new("http://127.0.0.1:1", Duration::from_millis(200)).unwrap();
        let client = Arc::new(JsonRpcClient::new(transport));
        let wallet = with_wallet.then(|| Wallet::new(client));
        Dapp::new(wallet, alloy_primitives::Address::ZERO, ReceiptSettings::default())
    }

    #[tokio::test]
    async fn test_watch_stops_on_shutdown() {
        let mut dapp = offline_dapp(true);

        let stopped = tokio::time::timeout(
            Duration::from_secs(2),
            watch(&mut dapp, Duration::from_millis(20), std::future::ready(())),
        )
        .await;
        assert!(stopped.unwrap());
    }

    #[tokio::test]
    async fn test_watch_without_wallet_fails() {
        let mut dapp = offline_dapp(false);

        let completed = watch(&mut dapp, Duration::from_millis(20), std::future::pending::<()>()).await;
        assert!(!completed);
        assert_eq!(dapp.take_alerts().len(), 1);
    }
}
