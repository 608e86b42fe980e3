use solana_client::client_error::ClientError;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Signature,
};
use solana_transaction_error::TransactionError;
use units::UnitsError;
use xxusd_interface::{
    error::XxusdError,
    instructions::SchemaError,
    state::AccountDecodeError,
};

use crate::pda::AddressDerivationError;

/// Every way an xxUSD client operation can fail.
///
/// `Submission` and `TimedOut` are the only variants worth retrying, and only `Submission` with a
/// fresh checkpoint; a `TimedOut` transaction must be re-queried by signature first.
#[derive(Debug, thiserror::Error)]
pub enum XxusdClientError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    AddressDerivation(#[from] AddressDerivationError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("signing failed: {0}")]
    Signing(String),
    #[error("submission failed: {0}")]
    Submission(String),
    #[error("transaction {signature} failed: {error}")]
    ExecutionFailure {
        signature: Signature,
        /// The ledger's error, unmodified.
        error: TransactionError,
        logs: Vec<String>,
        program_error: Option<XxusdError>,
    },
    #[error("transaction {signature} was not confirmed in time; query it before resubmitting")]
    TimedOut { signature: Signature },
    #[error(transparent)]
    AccountDecode(#[from] AccountDecodeError),
    #[error("account {0} does not exist")]
    AccountNotFound(Pubkey),
    #[error(transparent)]
    Units(#[from] UnitsError),
    #[error("rpc request failed: {0}")]
    Rpc(#[from] Box<ClientError>),
}

impl From<ClientError> for XxusdClientError {
    fn from(error: ClientError) -> Self {
        Self::Rpc(Box::new(error))
    }
}

impl XxusdClientError {
    /// Whether resubmitting the same intent (with a fresh checkpoint) is reasonable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Submission(_))
    }

    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Self::ExecutionFailure { signature, .. } | Self::TimedOut { signature } => {
                Some(signature)
            }
            _ => None,
        }
    }
}
