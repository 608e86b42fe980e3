use std::path::PathBuf;

use anyhow::{
    bail,
    Context,
};
use clap::{
    Args,
    Parser,
    Subcommand,
};
use client::{
    config::{
        env_flag,
        DEFAULT_PROGRAM_ID_FILE,
        DEVNET_URL,
        MINT_TEST_XXUSD_ENV,
        WALLET_PATH_ENV,
    },
    rpc::Commitment,
};
use solana_sdk::pubkey::Pubkey;
use xxusd_interface::instructions::schema::{
    ArgValue,
    InstructionSchema,
};

#[derive(Parser, Debug)]
#[command(name = "xxusd", version, about = "Deploy and operate the xxUSD program")]
pub struct Cli {
    /// RPC endpoint.
    #[arg(long, global = true, default_value = DEVNET_URL)]
    pub url: String,

    /// Wallet keypair file. Defaults to ~/.config/solana/new_id.json.
    #[arg(long, global = true, env = WALLET_PATH_ENV)]
    pub wallet: Option<PathBuf>,

    /// Program identity file, created on first use.
    #[arg(long, global = true, default_value = DEFAULT_PROGRAM_ID_FILE)]
    pub program_id_file: PathBuf,

    /// processed | confirmed | finalized
    #[arg(long, global = true, default_value_t = Commitment::Confirmed)]
    pub commitment: Commitment,

    /// Seconds to wait for confirmation before reporting the outcome as unknown.
    #[arg(long, global = true, default_value_t = 60)]
    pub confirm_timeout: u64,

    /// Mint mock collateral and test xxUSD after `init`. The env var takes `1`, `true`, `yes`
    /// or `on`.
    #[arg(long, global = true, env = MINT_TEST_XXUSD_ENV, value_parser = parse_flag)]
    pub mint_test_xxusd: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the program id, creating the identity file if needed.
    ProgramId,

    /// Print the program's derived addresses.
    Addresses,

    /// Create the xxUSD mint and initialize the controller in one transaction.
    Init {
        #[arg(long, default_value_t = 6)]
        redeemable_decimals: u8,
    },

    /// Initialize the controller for an existing xxUSD mint.
    InitializeController {
        #[arg(long)]
        xxusd_mint: Pubkey,
        #[arg(long, default_value_t = 6)]
        redeemable_decimals: u8,
    },

    /// Deposit collateral and mint the redeemable token.
    Mint(AmountArgs),

    /// Burn redeemable tokens for collateral.
    Redeem(AmountArgs),

    /// Lock xxUSD for a period.
    Lock {
        #[command(flatten)]
        amount: AmountArgs,
        /// Lock period in seconds.
        #[arg(long)]
        period: i64,
    },

    /// Release the vested part of the first open lock.
    Release,

    /// Set a product price (native units).
    SetPrice { product_id: u64, price: u64 },

    /// Read a product price from the controller.
    GetPrice { product_id: u64 },

    /// Move collateral into or out of the hedging strategy.
    Hedge {
        #[command(subcommand)]
        direction: HedgeDirection,
    },

    /// Print the controller, lock manager, and hedging strategy accounts.
    Show,

    /// Send any published instruction by name.
    Call(CallArgs),

    /// Airdrop SOL to the wallet (devnet and localnet only).
    Airdrop {
        #[arg(long)]
        to: Option<Pubkey>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HedgeDirection {
    Deposit(AmountArgs),
    Withdraw(AmountArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AmountArgs {
    /// UI amount, e.g. `1.5`.
    pub amount: String,
    /// Treat `amount` as native units instead.
    #[arg(long)]
    pub native: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CallArgs {
    /// Instruction name, e.g. `manage_product_price`.
    pub method: String,
    /// `name=value`, once per instruction argument.
    #[arg(long = "arg", value_parser = parse_assignment)]
    pub args: Vec<(String, String)>,
    /// `role=pubkey`. The program's PDAs, program ids, sysvars and the wallet's signer roles
    /// are filled in when omitted.
    #[arg(long = "account", value_parser = parse_account)]
    pub accounts: Vec<(String, Pubkey)>,
}

impl CallArgs {
    /// The argument values in schema order, each parsed as its declared type.
    pub fn arg_values(&self, schema: &InstructionSchema) -> anyhow::Result<Vec<ArgValue>> {
        if let Some((name, _)) = self
            .args
            .iter()
            .find(|(name, _)| !schema.args.iter().any(|arg| arg.name == name))
        {
            bail!("{} has no argument `{name}`", schema.name);
        }

        schema
            .args
            .iter()
            .map(|arg| {
                let (_, raw) = self
                    .args
                    .iter()
                    .find(|(name, _)| name == arg.name)
                    .with_context(|| format!("missing --arg {}=<{}>", arg.name, arg.ty))?;
                ArgValue::parse(arg.ty, raw)
                    .with_context(|| format!("`{raw}` is not a valid {} for {}", arg.ty, arg.name))
            })
            .collect()
    }
}

fn parse_assignment(input: &str) -> Result<(String, String), String> {
    input
        .split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .ok_or_else(|| format!("expected name=value, got `{input}`"))
}

fn parse_account(input: &str) -> Result<(String, Pubkey), String> {
    let (role, key) = parse_assignment(input)?;
    let key = key.parse().map_err(|e| format!("{role}: {e}"))?;
    Ok((role, key))
}

fn parse_flag(value: &str) -> Result<bool, std::convert::Infallible> {
    Ok(env_flag(value))
}

impl AmountArgs {
    pub fn to_native(&self, decimals: u8) -> Result<u64, units::UnitsError> {
        match self.native {
            true => self
                .amount
                .trim()
                .parse()
                .map_err(|_| units::UnitsError::InvalidAmount(self.amount.clone())),
            false => units::parse_ui_amount(&self.amount, decimals),
        }
    }
}
