//! The program's instruction set.
//!
//! [`INSTRUCTION_SCHEMAS`] is the statically typed form of the program's published interface:
//! every method name, its discriminator, its ordered argument types, and its ordered account
//! roles. Both the typed argument structs and the dynamic [`encode_instruction`] path are checked
//! against it.

use core::str::FromStr;

mod encode;
pub mod initialize_controller;
pub mod lock_xxusd;
pub mod manage_hedging_strategy;
pub mod manage_product_price;
pub mod mint;
pub mod schema;

use borsh::BorshSerialize;
pub use encode::*;
use schema::{
    xxusd_instructions,
    ArgValue,
    InstructionSchema,
};
use solana_sdk::pubkey::Pubkey;

xxusd_instructions! {
    InitializeController = "initialize_controller", [137, 255, 100, 190, 201, 247, 241, 81],
        args: ["redeemable_mint_decimals": U8],
        accounts: [
            "authority" => signer,
            "controller" => writable,
            "redeemable_mint" => signer,
            "xxusd_mint" => readonly,
            "system_program" => readonly,
            "token_program" => readonly,
            "rent" => readonly,
        ];
    LockXxusd = "lock_xxusd", [169, 253, 142, 139, 205, 67, 141, 252],
        args: ["amount": U64, "lock_period": I64],
        accounts: [
            "user" => signer,
            "controller" => writable,
            "lock_manager" => writable,
            "user_xxusd" => writable,
            "lock_vault" => writable,
            "token_program" => readonly,
        ];
    ReleaseXxusd = "release_xxusd", [188, 88, 136, 227, 192, 124, 233, 98],
        args: [],
        accounts: [
            "user" => signer,
            "controller" => writable,
            "lock_manager" => writable,
            "user_xxusd" => writable,
            "lock_vault" => writable,
            "token_program" => readonly,
        ];
    Mint = "mint", [51, 57, 225, 47, 182, 146, 137, 166],
        args: ["collateral_amount": U64],
        accounts: [
            "user" => signer,
            "payer" => signer,
            "controller" => writable,
            "redeemable_mint" => writable,
            "collateral_mint" => readonly,
            "user_redeemable" => writable,
            "user_collateral" => writable,
            "kamino_depository" => writable,
            "system_program" => readonly,
            "token_program" => readonly,
            "associated_token_program" => readonly,
            "rent" => readonly,
        ];
    Redeem = "redeem", [184, 12, 86, 149, 70, 196, 97, 225],
        args: ["redeemable_amount": U64],
        accounts: [
            "user" => signer,
            "payer" => signer,
            "controller" => writable,
            "redeemable_mint" => writable,
            "collateral_mint" => readonly,
            "user_redeemable" => writable,
            "user_collateral" => writable,
            "kamino_depository" => writable,
            "system_program" => readonly,
            "token_program" => readonly,
            "associated_token_program" => readonly,
            "rent" => readonly,
        ];
    ManageProductPrice = "manage_product_price", [254, 158, 196, 121, 138, 35, 242, 191],
        args: ["product_id": U64, "price": U64],
        accounts: [
            "authority" => signer,
            "controller" => writable,
        ];
    ManageHedgingStrategy = "manage_hedging_strategy", [71, 98, 166, 232, 92, 237, 55, 81],
        args: ["amount": U64, "is_deposit": Bool],
        accounts: [
            "authority" => signer,
            "controller" => writable,
            "hedging_strategy" => writable,
            "source_account" => writable,
            "destination_account" => writable,
            "token_program" => readonly,
        ];
}

impl XxusdInstruction {
    pub fn schema(self) -> &'static InstructionSchema {
        &INSTRUCTION_SCHEMAS[self as usize]
    }

    pub fn lookup(method: &str) -> Option<Self> {
        Self::from_str(method).ok()
    }

    /// Identifies the instruction from the leading discriminator of its data.
    pub fn from_instruction_data(data: &[u8]) -> Option<Self> {
        let discriminator = data.get(..8)?;
        INSTRUCTION_SCHEMAS
            .iter()
            .position(|schema| schema.discriminator == discriminator)
            .and_then(|index| <Self as strum::IntoEnumIterator>::iter().nth(index))
    }
}

/// Typed arguments of a single instruction.
pub trait InstructionArgs: BorshSerialize {
    const INSTRUCTION: XxusdInstruction;

    /// The argument values in schema order.
    fn arg_values(&self) -> Vec<ArgValue>;

    /// The discriminator followed by the Borsh encoding of `self`.
    fn borsh_data(&self) -> borsh::io::Result<Vec<u8>> {
        let schema = Self::INSTRUCTION.schema();
        let mut data = Vec::with_capacity(schema.data_len());
        data.extend_from_slice(&schema.discriminator);
        self.serialize(&mut data)?;
        Ok(data)
    }
}

/// Typed account addresses of a single instruction, keyed by schema role name.
pub trait InstructionAccounts {
    fn roles(&self) -> Vec<(&'static str, Pubkey)>;
}
