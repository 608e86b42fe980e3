//! PDA helpers for deriving xxUSD program addresses.

use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account_interface::address::get_associated_token_address;
use xxusd_interface::seeds::{
    CONTROLLER_SEED,
    HEDGING_STRATEGY_SEED,
    KAMINO_DEPOSITORY_SEED,
    LOCK_MANAGER_SEED,
    MAX_SEEDS,
    MAX_SEED_LEN,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddressDerivationError {
    #[error("{0} seeds given, at most {MAX_SEEDS} are allowed")]
    TooManySeeds(usize),
    #[error("seed {index} is {len} bytes, at most {MAX_SEED_LEN} are allowed")]
    SeedTooLong { index: usize, len: usize },
    #[error("no bump in 0..=255 yields an off-curve address for program {program_id}")]
    NoValidBump { program_id: Pubkey },
}

/// Derives the program address and bump for `seeds`, searching bumps from 255 down to 0.
pub fn derive_address(
    program_id: &Pubkey,
    seeds: &[&[u8]],
) -> Result<(Pubkey, u8), AddressDerivationError> {
    // One slot is reserved for the bump.
    if seeds.len() >= MAX_SEEDS {
        return Err(AddressDerivationError::TooManySeeds(seeds.len()));
    }
    if let Some((index, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(AddressDerivationError::SeedTooLong {
            index,
            len: seed.len(),
        });
    }

    Pubkey::try_find_program_address(seeds, program_id).ok_or(
        AddressDerivationError::NoValidBump {
            program_id: *program_id,
        },
    )
}

pub fn find_controller_address(program_id: &Pubkey) -> Result<(Pubkey, u8), AddressDerivationError> {
    derive_address(program_id, &[CONTROLLER_SEED])
}

pub fn find_lock_manager_address(
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), AddressDerivationError> {
    derive_address(program_id, &[LOCK_MANAGER_SEED])
}

pub fn find_hedging_strategy_address(
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), AddressDerivationError> {
    derive_address(program_id, &[HEDGING_STRATEGY_SEED])
}

pub fn find_kamino_depository_address(
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), AddressDerivationError> {
    derive_address(program_id, &[KAMINO_DEPOSITORY_SEED])
}

/// Every singleton PDA of one program deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XxusdAddresses {
    pub program_id: Pubkey,
    pub controller: (Pubkey, u8),
    pub lock_manager: (Pubkey, u8),
    pub hedging_strategy: (Pubkey, u8),
    pub kamino_depository: (Pubkey, u8),
}

impl XxusdAddresses {
    pub fn derive(program_id: Pubkey) -> Result<Self, AddressDerivationError> {
        Ok(Self {
            program_id,
            controller: find_controller_address(&program_id)?,
            lock_manager: find_lock_manager_address(&program_id)?,
            hedging_strategy: find_hedging_strategy_address(&program_id)?,
            kamino_depository: find_kamino_depository_address(&program_id)?,
        })
    }

    pub fn controller(&self) -> Pubkey {
        self.controller.0
    }

    pub fn lock_manager(&self) -> Pubkey {
        self.lock_manager.0
    }

    pub fn hedging_strategy(&self) -> Pubkey {
        self.hedging_strategy.0
    }

    pub fn kamino_depository(&self) -> Pubkey {
        self.kamino_depository.0
    }

    /// The xxUSD token account that holds locked balances, owned by the lock manager.
    pub fn lock_vault(&self, xxusd_mint: &Pubkey) -> Pubkey {
        get_associated_token_address(&self.lock_manager(), xxusd_mint)
    }

    /// The hedging strategy's token account for `mint`.
    pub fn hedging_vault(&self, mint: &Pubkey) -> Pubkey {
        get_associated_token_address(&self.hedging_strategy(), mint)
    }
}
