//! The published interface of the xxUSD on-chain program: its id, PDA seeds, the instruction
//! schema table and encoder, account layouts, and error codes.
//!
//! Nothing in this crate talks to the network.

pub mod error;
pub mod instructions;
pub mod seeds;
pub mod state;

pub mod program {
    use solana_sdk::pubkey::Pubkey;

    /// The program id the xxUSD program was published under.
    pub const ID: Pubkey = Pubkey::from_str_const("Cpsquy1RbEb4N3FXDKBzrWMKTLLvBp1BBSvp899EHhCb");
}

/// Exports common program ID pubkeys referenced by xxUSD instructions.
pub mod program_ids {
    use solana_sdk::pubkey::Pubkey;

    pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::from_str_const("11111111111111111111111111111111");
    pub const SPL_TOKEN_ID: Pubkey =
        Pubkey::from_str_const("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
    pub const SPL_ASSOCIATED_TOKEN_ACCOUNT_ID: Pubkey =
        Pubkey::from_str_const("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
    pub const COMPUTE_BUDGET_ID: Pubkey =
        Pubkey::from_str_const("ComputeBudget111111111111111111111111111111");
    pub const RENT_SYSVAR_ID: Pubkey =
        Pubkey::from_str_const("SysvarRent111111111111111111111111111111111");
}
