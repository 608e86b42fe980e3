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
use crate::program_ids::{
    RENT_SYSVAR_ID,
    SPL_TOKEN_ID,
    SYSTEM_PROGRAM_ID,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct InitializeControllerArgs {
    /// Decimals of the redeemable mint the program creates.
    pub redeemable_mint_decimals: u8,
}

impl InstructionArgs for InitializeControllerArgs {
    const INSTRUCTION: XxusdInstruction = XxusdInstruction::InitializeController;

    fn arg_values(&self) -> Vec<ArgValue> {
        vec![ArgValue::U8(self.redeemable_mint_decimals)]
    }
}

/// The `redeemable_mint` is a fresh keypair the program initializes, so it must co-sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeControllerAccounts {
    pub authority: Pubkey,
    pub controller: Pubkey,
    pub redeemable_mint: Pubkey,
    pub xxusd_mint: Pubkey,
}

impl InstructionAccounts for InitializeControllerAccounts {
    fn roles(&self) -> Vec<(&'static str, Pubkey)> {
        vec![
            ("authority", self.authority),
            ("controller", self.controller),
            ("redeemable_mint", self.redeemable_mint),
            ("xxusd_mint", self.xxusd_mint),
            ("system_program", SYSTEM_PROGRAM_ID),
            ("token_program", SPL_TOKEN_ID),
            ("rent", RENT_SYSVAR_ID),
        ]
    }
}
