//! Operator CLI for deploying and driving the xxUSD program.

use std::time::{
    Duration,
    SystemTime,
    UNIX_EPOCH,
};

use anyhow::Context;
use clap::Parser;
use client::{
    config::{
        default_wallet_path,
        jupsol,
        ProgramIdentity,
        XxusdConfig,
    },
    logs::{
        log_info,
        log_success,
        log_warning,
    },
    pretty::state::{
        PrettyController,
        PrettyHedgingStrategy,
        PrettyLockManager,
    },
    print_kv,
    transactions::SendTransactionConfig,
    XxusdClient,
    XxusdClientError,
};
use solana_sdk::{
    signature::Signature,
    signer::Signer,
};
use units::UiAmount;
use xxusd_interface::instructions::{
    SchemaError,
    XxusdInstruction,
};

use crate::args::{
    CallArgs,
    Cli,
    Command,
    HedgeDirection,
};

mod args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let identity = ProgramIdentity::load_or_create(&cli.program_id_file)
        .with_context(|| format!("Couldn't load {}", cli.program_id_file.display()))?;
    let program_id = identity.program_id()?;

    if let Command::ProgramId = cli.command {
        println!("{program_id}");
        return Ok(());
    }

    let wallet_path = match cli.wallet.clone() {
        Some(path) => path,
        None => default_wallet_path()?,
    };
    let send = SendTransactionConfig {
        commitment: cli.commitment,
        confirm_timeout: Duration::from_secs(cli.confirm_timeout),
        ..Default::default()
    };
    let mut config = XxusdConfig::new(program_id, wallet_path)
        .with_rpc_url(cli.url.clone())
        .with_send_config(send);
    config.mint_test_xxusd = cli.mint_test_xxusd;

    if let Command::Addresses = cli.command {
        print_addresses(&config)?;
        return Ok(());
    }

    let client = XxusdClient::new(config).context("Couldn't create the xxUSD client")?;
    run(&client, cli.command).await
}

fn print_addresses(config: &XxusdConfig) -> anyhow::Result<()> {
    let addresses = client::pda::XxusdAddresses::derive(config.program_id)?;
    print_kv!("program", addresses.program_id);
    print_kv!("controller", addresses.controller());
    print_kv!("lock_manager", addresses.lock_manager());
    print_kv!("hedging_strategy", addresses.hedging_strategy());
    print_kv!("kamino_depository", addresses.kamino_depository());
    print_kv!(
        "hedging_vault",
        addresses.hedging_vault(&config.collateral_mint)
    );
    Ok(())
}

async fn run(client: &XxusdClient, command: Command) -> anyhow::Result<()> {
    let xxusd_decimals = client.config().xxusd_decimals;

    match command {
        Command::ProgramId | Command::Addresses => {}
        Command::Init {
            redeemable_decimals,
        } => {
            let deployment = client
                .create_xxusd_mint_and_initialize(redeemable_decimals)
                .await
                .context("Failed to create the xxUSD mint and initialize the controller")?;
            if let Some(test_data) = deployment.test_data {
                print_kv!(
                    "test xxUSD",
                    UiAmount::new(test_data.xxusd_amount, xxusd_decimals)
                );
            }
        }
        Command::InitializeController {
            xxusd_mint,
            redeemable_decimals,
        } => {
            let (signature, redeemable_mint) = client
                .initialize_controller(&xxusd_mint, redeemable_decimals)
                .await
                .context("Failed to initialize the controller")?;
            log_success("Controller initialized", signature);
            print_kv!("redeemable mint", redeemable_mint);
        }
        Command::Mint(amount) => {
            let native = amount.to_native(jupsol::DECIMALS)?;
            let signature = client.mint(native).await.context("Mint failed")?;
            log_success("Minted", signature);
        }
        Command::Redeem(amount) => {
            let native = amount.to_native(xxusd_decimals)?;
            let signature = client.redeem(native).await.context("Redeem failed")?;
            log_success("Redeemed", signature);
        }
        Command::Lock { amount, period } => {
            let native = amount.to_native(xxusd_decimals)?;
            let signature = client
                .lock_xxusd(native, period)
                .await
                .context("Lock failed")?;
            log_success(
                format!("Locked {}", UiAmount::new(native, xxusd_decimals)),
                signature,
            );
        }
        Command::Release => {
            let signature = client.release_xxusd().await.context("Release failed")?;
            log_success("Released", signature);
        }
        Command::SetPrice { product_id, price } => {
            let signature = client
                .set_product_price(product_id, price)
                .await
                .context("Setting the price failed")?;
            log_success(format!("Price of product {product_id}"), signature);
        }
        Command::GetPrice { product_id } => match client.get_product_price(product_id).await? {
            Some(price) => print_kv!(format!("product {product_id}"), price),
            None => log_warning("No price set for product", product_id),
        },
        Command::Hedge { direction } => {
            let signature = match direction {
                HedgeDirection::Deposit(amount) => {
                    client
                        .deposit_to_hedging_strategy(amount.to_native(jupsol::DECIMALS)?)
                        .await
                }
                HedgeDirection::Withdraw(amount) => {
                    client
                        .withdraw_from_hedging_strategy(amount.to_native(jupsol::DECIMALS)?)
                        .await
                }
            }
            .context("Hedging strategy update failed")?;
            log_success("Hedging strategy updated", signature);
        }
        Command::Show => show(client).await?,
        Command::Call(call) => {
            let signature = send_call(client, &call)
                .await
                .with_context(|| format!("{} failed", call.method))?;
            log_success(call.method, signature);
        }
        Command::Airdrop { to } => {
            let to = to.unwrap_or_else(|| client.wallet().pubkey());
            let signature = client.rpc().fund_account(&to).await?;
            log_success(format!("Funded {to}"), signature);
        }
    }

    Ok(())
}

async fn send_call(client: &XxusdClient, call: &CallArgs) -> anyhow::Result<Signature> {
    let schema = XxusdInstruction::lookup(&call.method)
        .ok_or_else(|| SchemaError::UnknownMethod(call.method.clone()))?
        .schema();
    let args = call.arg_values(schema)?;

    let mut roles = call.accounts.clone();
    for role in schema.accounts {
        if roles.iter().any(|(name, _)| name == role.name) {
            continue;
        }
        let filled = client
            .context()
            .known_account(role.name)
            .or_else(|| role.is_signer.then(|| client.wallet().pubkey()));
        if let Some(key) = filled {
            roles.push((role.name.to_string(), key));
        }
    }

    Ok(client.call(&call.method, &args, &roles, &[]).await?)
}

async fn show(client: &XxusdClient) -> anyhow::Result<()> {
    let decimals = client.config().xxusd_decimals;

    match client.fetch_controller().await {
        Ok(controller) => print!(
            "{}",
            PrettyController {
                controller: &controller,
                decimals,
            }
        ),
        Err(XxusdClientError::AccountNotFound(address)) => {
            log_warning("Controller not initialized", address);
            return Ok(());
        }
        Err(e) => return Err(e).context("Couldn't fetch the controller"),
    }

    match client.fetch_lock_manager().await {
        Ok(lock_manager) => {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("System clock is before the unix epoch")?
                .as_secs() as i64;
            print!(
                "{}",
                PrettyLockManager {
                    lock_manager: &lock_manager,
                    decimals,
                    now,
                }
            );
        }
        Err(XxusdClientError::AccountNotFound(_)) => log_info("LockManager", "none"),
        Err(e) => return Err(e).context("Couldn't fetch the lock manager"),
    }

    match client.fetch_hedging_strategy().await {
        Ok(hedging_strategy) => print!(
            "{}",
            PrettyHedgingStrategy {
                hedging_strategy: &hedging_strategy,
                decimals: jupsol::DECIMALS,
            }
        ),
        Err(XxusdClientError::AccountNotFound(_)) => log_info("HedgingStrategy", "none"),
        Err(e) => return Err(e).context("Couldn't fetch the hedging strategy"),
    }

    Ok(())
}
