//! Token-level context containing mint metadata and helpers for deriving associated token accounts
//! and building token instructions.

use solana_instruction::Instruction;
use solana_sdk::{
    program_pack::Pack,
    pubkey::Pubkey,
};
use solana_system_interface::instruction::create_account;
use spl_associated_token_account_interface::{
    address::get_associated_token_address,
    instruction::create_associated_token_account_idempotent,
};
use spl_token_interface::{
    instruction::{
        initialize_mint2,
        mint_to_checked,
    },
    state::Mint,
};
use xxusd_interface::program_ids::SPL_TOKEN_ID;

use crate::error::XxusdClientError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenContext {
    pub mint_authority: Option<Pubkey>,
    pub mint_address: Pubkey,
    pub mint_decimals: u8,
}

impl TokenContext {
    pub const fn new(mint_authority: Option<Pubkey>, mint_address: Pubkey, mint_decimals: u8) -> Self {
        Self {
            mint_authority,
            mint_address,
            mint_decimals,
        }
    }

    pub fn get_ata_for(&self, owner: &Pubkey) -> Pubkey {
        get_associated_token_address(owner, &self.mint_address)
    }

    /// Builds the `create_account` + `initialize_mint2` pair for this mint, funded by `funder`.
    pub fn create_mint_instructions(
        &self,
        funder: &Pubkey,
        rent_lamports: u64,
    ) -> Result<Vec<Instruction>, XxusdClientError> {
        let mint_authority = self.require_mint_authority()?;
        let initialize = initialize_mint2(
            &SPL_TOKEN_ID,
            &self.mint_address,
            &mint_authority,
            None,
            self.mint_decimals,
        )
        .map_err(|e| XxusdClientError::Configuration(e.to_string()))?;

        Ok(vec![
            create_account(
                funder,
                &self.mint_address,
                rent_lamports,
                Mint::LEN as u64,
                &SPL_TOKEN_ID,
            ),
            initialize,
        ])
    }

    /// Builds an idempotent create-ATA instruction for the given `owner`, funded by `funder`.
    pub fn create_ata_idempotent(&self, funder: &Pubkey, owner: &Pubkey) -> Instruction {
        create_associated_token_account_idempotent(
            funder,
            owner,
            &self.mint_address,
            &SPL_TOKEN_ID,
        )
    }

    /// Builds a `mint_to_checked` instruction that mints `amount` tokens to the `owner`'s
    /// associated token account.
    ///
    /// To mint directly to an associated token account, use [TokenContext::mint_to_ata]
    pub fn mint_to_owner(&self, owner: &Pubkey, amount: u64) -> Result<Instruction, XxusdClientError> {
        self.mint_to_ata(&self.get_ata_for(owner), amount)
    }

    /// Builds a `mint_to_checked` instruction that mints `amount` tokens to `destination_ata`.
    pub fn mint_to_ata(
        &self,
        destination_ata: &Pubkey,
        amount: u64,
    ) -> Result<Instruction, XxusdClientError> {
        let mint_authority = self.require_mint_authority()?;
        mint_to_checked(
            &SPL_TOKEN_ID,
            &self.mint_address,
            destination_ata,
            &mint_authority,
            &[],
            amount,
            self.mint_decimals,
        )
        .map_err(|e| XxusdClientError::Configuration(e.to_string()))
    }

    fn require_mint_authority(&self) -> Result<Pubkey, XxusdClientError> {
        self.mint_authority.ok_or_else(|| {
            XxusdClientError::Configuration(format!(
                "mint {} has no mint authority",
                self.mint_address
            ))
        })
    }
}
