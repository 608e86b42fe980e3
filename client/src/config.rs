//! Process-wide configuration: the program identity file, the wallet, and [`XxusdConfig`].
//!
//! All of it is loaded once at startup into an immutable [`XxusdConfig`] that callers pass around
//! explicitly.

use std::{
    fs,
    io::Write,
    path::{
        Path,
        PathBuf,
    },
    str::FromStr,
};

use serde::{
    Deserialize,
    Serialize,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
};

use crate::{
    error::XxusdClientError,
    logs::log_info,
    transactions::SendTransactionConfig,
};

pub const DEVNET_URL: &str = "https://api.devnet.solana.com";
pub const LOCALNET_URL: &str = "http://127.0.0.1:8899";
pub const DEFAULT_PROGRAM_ID_FILE: &str = "program-id.json";
pub const WALLET_PATH_ENV: &str = "SOLANA_WALLET_PATH";
pub const MINT_TEST_XXUSD_ENV: &str = "MINT_TEST_XXUSD";

pub const XXUSD_DECIMALS: u8 = 6;

/// Devnet jupSOL, the collateral the program mints against.
pub mod jupsol {
    use solana_sdk::pubkey::Pubkey;

    pub const MINT: Pubkey = Pubkey::from_str_const("7eS55f4LP5xj4jqRp24uv5aPFak4gzue8jwb5949KDzP");
    pub const DECIMALS: u8 = 9;
}

/// Devnet USDC.
pub mod usdc {
    use solana_sdk::pubkey::Pubkey;

    pub const MINT: Pubkey = Pubkey::from_str_const("EneKhgmdLQgfLtqC9aE52B1bMcFtjob6qMkDc5Q3mHx7");
    pub const DECIMALS: u8 = 6;
}

/// The on-disk record of the deployed program's id and, when this machine created it, the
/// program keypair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramIdentity {
    pub program_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<Vec<u8>>,
}

impl ProgramIdentity {
    pub fn generate() -> Self {
        let keypair = Keypair::new();
        Self {
            program_id: keypair.pubkey().to_string(),
            secret_key: Some(keypair.to_bytes().to_vec()),
        }
    }

    pub fn program_id(&self) -> Result<Pubkey, XxusdClientError> {
        Pubkey::from_str(&self.program_id).map_err(|e| {
            XxusdClientError::Configuration(format!(
                "invalid program id `{}`: {e}",
                self.program_id
            ))
        })
    }

    pub fn keypair(&self) -> Result<Option<Keypair>, XxusdClientError> {
        let Some(bytes) = &self.secret_key else {
            return Ok(None);
        };
        let keypair = keypair_from_bytes(bytes)?;
        if keypair.pubkey() != self.program_id()? {
            return Err(XxusdClientError::Configuration(format!(
                "secret key belongs to {}, not program {}",
                keypair.pubkey(),
                self.program_id
            )));
        }
        Ok(Some(keypair))
    }

    pub fn load(path: &Path) -> Result<Self, XxusdClientError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            XxusdClientError::Configuration(format!("couldn't read {}: {e}", path.display()))
        })?;
        let identity: Self = serde_json::from_str(&contents).map_err(|e| {
            XxusdClientError::Configuration(format!("malformed {}: {e}", path.display()))
        })?;
        identity.program_id()?;
        Ok(identity)
    }

    /// Reads the identity at `path`, creating it with a fresh keypair if the file doesn't exist.
    pub fn load_or_create(path: &Path) -> Result<Self, XxusdClientError> {
        if path.exists() {
            return Self::load(path);
        }

        let identity = Self::generate();
        let json = serde_json::to_string_pretty(&identity)
            .map_err(|e| XxusdClientError::Configuration(e.to_string()))?;
        write_private(path, &json).map_err(|e| {
            XxusdClientError::Configuration(format!("couldn't write {}: {e}", path.display()))
        })?;
        log_info("Created program identity", &identity.program_id);
        Ok(identity)
    }
}

/// Creates `path` readable only by the owner, since it may hold the program's secret key.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)?.write_all(contents.as_bytes())
}

fn keypair_from_bytes(bytes: &[u8]) -> Result<Keypair, XxusdClientError> {
    Keypair::try_from(bytes)
        .map_err(|e| XxusdClientError::Configuration(format!("invalid secret key: {e}")))
}

/// `$SOLANA_WALLET_PATH`, falling back to `~/.config/solana/new_id.json`.
pub fn default_wallet_path() -> Result<PathBuf, XxusdClientError> {
    if let Ok(path) = std::env::var(WALLET_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    home::home_dir()
        .map(|home| home.join(".config").join("solana").join("new_id.json"))
        .ok_or_else(|| {
            XxusdClientError::Configuration(format!(
                "no home directory; set {WALLET_PATH_ENV} to the wallet file"
            ))
        })
}

/// Loads a keypair from a JSON array of secret key bytes, the Solana CLI's wallet format.
pub fn load_wallet(path: &Path) -> Result<Keypair, XxusdClientError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        XxusdClientError::Configuration(format!("couldn't read wallet {}: {e}", path.display()))
    })?;
    let bytes: Vec<u8> = serde_json::from_str(&contents).map_err(|e| {
        XxusdClientError::Configuration(format!("malformed wallet {}: {e}", path.display()))
    })?;
    keypair_from_bytes(&bytes)
}

/// Truthy values accepted for boolean environment flags.
pub fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Everything an [`crate::XxusdClient`] needs, fixed at construction.
#[derive(Clone, Debug)]
pub struct XxusdConfig {
    pub program_id: Pubkey,
    pub rpc_url: String,
    pub wallet_path: PathBuf,
    pub send: SendTransactionConfig,
    /// Mint mock collateral and 1000 xxUSD to the wallet after initializing.
    pub mint_test_xxusd: bool,
    pub collateral_mint: Pubkey,
    pub xxusd_decimals: u8,
}

impl XxusdConfig {
    pub fn new(program_id: Pubkey, wallet_path: PathBuf) -> Self {
        Self {
            program_id,
            rpc_url: DEVNET_URL.to_string(),
            wallet_path,
            send: SendTransactionConfig::default(),
            mint_test_xxusd: false,
            collateral_mint: jupsol::MINT,
            xxusd_decimals: XXUSD_DECIMALS,
        }
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    pub fn with_send_config(mut self, send: SendTransactionConfig) -> Self {
        self.send = send;
        self
    }

    pub fn load_wallet(&self) -> Result<Keypair, XxusdClientError> {
        load_wallet(&self.wallet_path)
    }
}
