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
    SPL_ASSOCIATED_TOKEN_ACCOUNT_ID,
    SPL_TOKEN_ID,
    SYSTEM_PROGRAM_ID,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MintArgs {
    /// Native collateral units deposited.
    pub collateral_amount: u64,
}

impl InstructionArgs for MintArgs {
    const INSTRUCTION: XxusdInstruction = XxusdInstruction::Mint;

    fn arg_values(&self) -> Vec<ArgValue> {
        vec![ArgValue::U64(self.collateral_amount)]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct RedeemArgs {
    /// Native redeemable units burned.
    pub redeemable_amount: u64,
}

impl InstructionArgs for RedeemArgs {
    const INSTRUCTION: XxusdInstruction = XxusdInstruction::Redeem;

    fn arg_values(&self) -> Vec<ArgValue> {
        vec![ArgValue::U64(self.redeemable_amount)]
    }
}

/// Accounts shared by `mint` and `redeem`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollateralAccounts {
    pub user: Pubkey,
    pub payer: Pubkey,
    pub controller: Pubkey,
    pub redeemable_mint: Pubkey,
    pub collateral_mint: Pubkey,
    pub user_redeemable: Pubkey,
    pub user_collateral: Pubkey,
    pub kamino_depository: Pubkey,
}

impl InstructionAccounts for CollateralAccounts {
    fn roles(&self) -> Vec<(&'static str, Pubkey)> {
        vec![
            ("user", self.user),
            ("payer", self.payer),
            ("controller", self.controller),
            ("redeemable_mint", self.redeemable_mint),
            ("collateral_mint", self.collateral_mint),
            ("user_redeemable", self.user_redeemable),
            ("user_collateral", self.user_collateral),
            ("kamino_depository", self.kamino_depository),
            ("system_program", SYSTEM_PROGRAM_ID),
            ("token_program", SPL_TOKEN_ID),
            ("associated_token_program", SPL_ASSOCIATED_TOKEN_ACCOUNT_ID),
            ("rent", RENT_SYSVAR_ID),
        ]
    }
}
