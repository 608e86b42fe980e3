//! Account layouts owned by the xxUSD program.
//!
//! Each account is stored as an 8-byte discriminator (`sha256("account:<Name>")[..8]`) followed
//! by the Borsh encoding of its fields. Accounts are allocated with spare room, so trailing bytes
//! after the encoded fields are expected and ignored.

use borsh::BorshDeserialize;

pub mod controller;
pub mod hedging_strategy;
pub mod kamino_depository;
pub mod lock_manager;

pub use controller::*;
pub use hedging_strategy::*;
pub use kamino_depository::*;
pub use lock_manager::*;

pub const DISCRIMINATOR_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AccountDecodeError {
    #[error("{account} data is {len} bytes, shorter than its discriminator")]
    TooShort { account: &'static str, len: usize },
    #[error("account data is not a {account}: discriminator {found:?}")]
    DiscriminatorMismatch {
        account: &'static str,
        found: [u8; DISCRIMINATOR_LEN],
    },
    #[error("{account} fields failed to decode: {reason}")]
    Malformed {
        account: &'static str,
        reason: String,
    },
}

/// A program account with an Anchor-style discriminator prefix.
pub trait AnchorAccount: BorshDeserialize {
    const NAME: &'static str;
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN];

    fn try_from_account_data(data: &[u8]) -> Result<Self, AccountDecodeError> {
        let (discriminator, mut fields) = data
            .split_first_chunk::<DISCRIMINATOR_LEN>()
            .ok_or(AccountDecodeError::TooShort {
                account: Self::NAME,
                len: data.len(),
            })?;
        if *discriminator != Self::DISCRIMINATOR {
            return Err(AccountDecodeError::DiscriminatorMismatch {
                account: Self::NAME,
                found: *discriminator,
            });
        }
        Self::deserialize(&mut fields).map_err(|e| AccountDecodeError::Malformed {
            account: Self::NAME,
            reason: e.to_string(),
        })
    }
}
