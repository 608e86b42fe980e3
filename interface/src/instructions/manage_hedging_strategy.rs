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

/// Moves funds into (`is_deposit`) or out of the hedging strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ManageHedgingStrategyArgs {
    pub amount: u64,
    pub is_deposit: bool,
}

impl InstructionArgs for ManageHedgingStrategyArgs {
    const INSTRUCTION: XxusdInstruction = XxusdInstruction::ManageHedgingStrategy;

    fn arg_values(&self) -> Vec<ArgValue> {
        vec![ArgValue::U64(self.amount), ArgValue::Bool(self.is_deposit)]
    }
}

/// For a deposit the source is the authority's token account and the destination the strategy's
/// vault; a withdrawal swaps them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManageHedgingStrategyAccounts {
    pub authority: Pubkey,
    pub controller: Pubkey,
    pub hedging_strategy: Pubkey,
    pub source_account: Pubkey,
    pub destination_account: Pubkey,
}

impl InstructionAccounts for ManageHedgingStrategyAccounts {
    fn roles(&self) -> Vec<(&'static str, Pubkey)> {
        vec![
            ("authority", self.authority),
            ("controller", self.controller),
            ("hedging_strategy", self.hedging_strategy),
            ("source_account", self.source_account),
            ("destination_account", self.destination_account),
            ("token_program", SPL_TOKEN_ID),
        ]
    }
}
