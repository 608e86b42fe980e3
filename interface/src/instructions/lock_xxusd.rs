use borsh::{
    BorshDeserialize,
    BorshSerialize,
};
use solana_sdk::pubkey::Pubkey;

use super::{
    schema::ArgValue,
    InstructionAccounts,
    InstructionArgs,
    XxusdInstruction,
};
use crate::program_ids::SPL_TOKEN_ID;

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct LockXxusdArgs {
    /// Native xxUSD units to lock.
    pub amount: u64,
    /// Lock duration in seconds.
    pub lock_period: i64,
}

impl InstructionArgs for LockXxusdArgs {
    const INSTRUCTION: XxusdInstruction = XxusdInstruction::LockXxusd;

    fn arg_values(&self) -> Vec<ArgValue> {
        vec![ArgValue::U64(self.amount), ArgValue::I64(self.lock_period)]
    }
}

/// `release_xxusd` takes no arguments. It pays out the vested part of the first open lock in the
/// shared lock manager; see [`crate::state::LockManager::releasable_amount`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ReleaseXxusdArgs;

impl InstructionArgs for ReleaseXxusdArgs {
    const INSTRUCTION: XxusdInstruction = XxusdInstruction::ReleaseXxusd;

    fn arg_values(&self) -> Vec<ArgValue> {
        vec![]
    }
}

/// Accounts shared by `lock_xxusd` and `release_xxusd`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockAccounts {
    pub user: Pubkey,
    pub controller: Pubkey,
    pub lock_manager: Pubkey,
    pub user_xxusd: Pubkey,
    pub lock_vault: Pubkey,
}

impl InstructionAccounts for LockAccounts {
    fn roles(&self) -> Vec<(&'static str, Pubkey)> {
        vec![
            ("user", self.user),
            ("controller", self.controller),
            ("lock_manager", self.lock_manager),
            ("user_xxusd", self.user_xxusd),
            ("lock_vault", self.lock_vault),
            ("token_program", SPL_TOKEN_ID),
        ]
    }
}
