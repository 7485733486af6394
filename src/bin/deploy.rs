use anyhow::Context;
use clap::Parser;
use society_dapp::utils::{logger, validation::Validate};
use society_dapp::{run_deploy, DappError, DeployArgs};

#[tokio::main]
async fn main() {
    let args = DeployArgs::parse();

    match deploy(&args).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("❌ {:#}", e);
            if let Some(dapp_error) = e.downcast_ref::<DappError>() {
                tracing::error!(
                    "Deployment failed (Category: {:?}, Severity: {:?})",
                    dapp_error.category(),
                    dapp_error.severity()
                );
                eprintln!("💡 {}", dapp_error.recovery_suggestion());
            }
            std::process::exit(1);
        }
    }
}

async fn deploy(args: &DeployArgs) -> anyhow::Result<()> {
    let config = args.resolve().context("failed to load configuration")?;

    logger::init_cli_logger(args.verbose, config.log_level(), config.log_format());
    config.validate()?;

    tracing::info!(
        "🚀 Deploying {} from {} via {}",
        config.contract_name(),
        config.artifacts_dir(),
        config.rpc_url()
    );

    let deployment = run_deploy(&config).await?;
    tracing::info!(
        "✅ Deployed in block {:?}, transaction {}",
        deployment.block_number,
        deployment.transaction_hash
    );

    println!(
        "Society Management Contract deployed to localhost Chain [Address]: {}",
        deployment.address
    );
    Ok(())
}
