//! Builds every xxUSD program instruction for one deployment.

use solana_instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account_interface::address::get_associated_token_address;
use xxusd_interface::instructions::{
    encode_instruction,
    encode_typed,
    initialize_controller::{
        InitializeControllerAccounts,
        InitializeControllerArgs,
    },
    lock_xxusd::{
        LockAccounts,
        LockXxusdArgs,
        ReleaseXxusdArgs,
    },
    manage_hedging_strategy::{
        ManageHedgingStrategyAccounts,
        ManageHedgingStrategyArgs,
    },
    manage_product_price::{
        ManageProductPriceAccounts,
        ManageProductPriceArgs,
    },
    mint::{
        CollateralAccounts,
        MintArgs,
        RedeemArgs,
    },
    schema::ArgValue,
    SchemaError,
};
use xxusd_interface::program_ids::{
    RENT_SYSVAR_ID,
    SPL_ASSOCIATED_TOKEN_ACCOUNT_ID,
    SPL_TOKEN_ID,
    SYSTEM_PROGRAM_ID,
};

use crate::pda::{
    AddressDerivationError,
    XxusdAddresses,
};

/// The mints an xxUSD deployment works with. `redeemable` is created by `initialize_controller`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XxusdMints {
    pub redeemable: Pubkey,
    pub xxusd: Pubkey,
    pub collateral: Pubkey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XxusdContext {
    pub addresses: XxusdAddresses,
}

impl XxusdContext {
    pub fn new(program_id: Pubkey) -> Result<Self, AddressDerivationError> {
        Ok(Self {
            addresses: XxusdAddresses::derive(program_id)?,
        })
    }

    pub fn program_id(&self) -> Pubkey {
        self.addresses.program_id
    }

    pub fn initialize_controller(
        &self,
        authority: Pubkey,
        redeemable_mint: Pubkey,
        xxusd_mint: Pubkey,
        redeemable_mint_decimals: u8,
    ) -> Result<Instruction, SchemaError> {
        encode_typed(
            &self.program_id(),
            &InitializeControllerArgs {
                redeemable_mint_decimals,
            },
            &InitializeControllerAccounts {
                authority,
                controller: self.addresses.controller(),
                redeemable_mint,
                xxusd_mint,
            },
        )
    }

    fn collateral_accounts(&self, user: Pubkey, payer: Pubkey, mints: &XxusdMints) -> CollateralAccounts {
        CollateralAccounts {
            user,
            payer,
            controller: self.addresses.controller(),
            redeemable_mint: mints.redeemable,
            collateral_mint: mints.collateral,
            user_redeemable: get_associated_token_address(&user, &mints.redeemable),
            user_collateral: get_associated_token_address(&user, &mints.collateral),
            kamino_depository: self.addresses.kamino_depository(),
        }
    }

    pub fn mint(
        &self,
        user: Pubkey,
        payer: Pubkey,
        mints: &XxusdMints,
        collateral_amount: u64,
    ) -> Result<Instruction, SchemaError> {
        encode_typed(
            &self.program_id(),
            &MintArgs { collateral_amount },
            &self.collateral_accounts(user, payer, mints),
        )
    }

    pub fn redeem(
        &self,
        user: Pubkey,
        payer: Pubkey,
        mints: &XxusdMints,
        redeemable_amount: u64,
    ) -> Result<Instruction, SchemaError> {
        encode_typed(
            &self.program_id(),
            &RedeemArgs { redeemable_amount },
            &self.collateral_accounts(user, payer, mints),
        )
    }

    fn lock_accounts(&self, user: Pubkey, xxusd_mint: &Pubkey) -> LockAccounts {
        LockAccounts {
            user,
            controller: self.addresses.controller(),
            lock_manager: self.addresses.lock_manager(),
            user_xxusd: get_associated_token_address(&user, xxusd_mint),
            lock_vault: self.addresses.lock_vault(xxusd_mint),
        }
    }

    pub fn lock_xxusd(
        &self,
        user: Pubkey,
        xxusd_mint: &Pubkey,
        amount: u64,
        lock_period: i64,
    ) -> Result<Instruction, SchemaError> {
        encode_typed(
            &self.program_id(),
            &LockXxusdArgs {
                amount,
                lock_period,
            },
            &self.lock_accounts(user, xxusd_mint),
        )
    }

    pub fn release_xxusd(&self, user: Pubkey, xxusd_mint: &Pubkey) -> Result<Instruction, SchemaError> {
        encode_typed(
            &self.program_id(),
            &ReleaseXxusdArgs,
            &self.lock_accounts(user, xxusd_mint),
        )
    }

    pub fn manage_product_price(
        &self,
        authority: Pubkey,
        product_id: u64,
        price: u64,
    ) -> Result<Instruction, SchemaError> {
        encode_typed(
            &self.program_id(),
            &ManageProductPriceArgs { product_id, price },
            &ManageProductPriceAccounts {
                authority,
                controller: self.addresses.controller(),
            },
        )
    }

    /// Moves `amount` of `mint` between the authority's token account and the hedging strategy's.
    pub fn manage_hedging_strategy(
        &self,
        authority: Pubkey,
        mint: &Pubkey,
        amount: u64,
        is_deposit: bool,
    ) -> Result<Instruction, SchemaError> {
        let authority_account = get_associated_token_address(&authority, mint);
        let strategy_account = self.addresses.hedging_vault(mint);
        let (source_account, destination_account) = match is_deposit {
            true => (authority_account, strategy_account),
            false => (strategy_account, authority_account),
        };

        encode_typed(
            &self.program_id(),
            &ManageHedgingStrategyArgs { amount, is_deposit },
            &ManageHedgingStrategyAccounts {
                authority,
                controller: self.addresses.controller(),
                hedging_strategy: self.addresses.hedging_strategy(),
                source_account,
                destination_account,
            },
        )
    }

    /// The address of a role that is the same for every caller: the program's PDAs and the
    /// programs and sysvars it invokes.
    pub fn known_account(&self, role: &str) -> Option<Pubkey> {
        Some(match role {
            "controller" => self.addresses.controller(),
            "lock_manager" => self.addresses.lock_manager(),
            "hedging_strategy" => self.addresses.hedging_strategy(),
            "kamino_depository" => self.addresses.kamino_depository(),
            "system_program" => SYSTEM_PROGRAM_ID,
            "token_program" => SPL_TOKEN_ID,
            "associated_token_program" => SPL_ASSOCIATED_TOKEN_ACCOUNT_ID,
            "rent" => RENT_SYSVAR_ID,
            _ => return None,
        })
    }

    /// Encodes an arbitrary method by name, checked against the schema table.
    pub fn call<S: AsRef<str>>(
        &self,
        method: &str,
        args: &[ArgValue],
        roles: &[(S, Pubkey)],
    ) -> Result<Instruction, SchemaError> {
        encode_instruction(&self.program_id(), method, args, roles)
    }
}

#[cfg(test)]
mod tests {
    use xxusd_interface::instructions::XxusdInstruction;

    use super::*;

    fn context() -> XxusdContext {
        XxusdContext::new(xxusd_interface::program::ID).unwrap()
    }

    #[test]
    fn hedging_direction_swaps_accounts() {
        let context = context();
        let authority = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let deposit = context
            .manage_hedging_strategy(authority, &mint, 10, true)
            .unwrap();
        let withdraw = context
            .manage_hedging_strategy(authority, &mint, 10, false)
            .unwrap();

        assert_eq!(deposit.accounts[3].pubkey, withdraw.accounts[4].pubkey);
        assert_eq!(deposit.accounts[4].pubkey, withdraw.accounts[3].pubkey);
        assert_eq!(
            deposit.accounts[4].pubkey,
            get_associated_token_address(&context.addresses.hedging_strategy(), &mint)
        );
        assert_ne!(deposit.data, withdraw.data);
    }

    #[test]
    fn every_builder_targets_the_program() {
        let context = context();
        let user = Pubkey::new_unique();
        let mints = XxusdMints {
            redeemable: Pubkey::new_unique(),
            xxusd: Pubkey::new_unique(),
            collateral: Pubkey::new_unique(),
        };
        let built = [
            (
                XxusdInstruction::InitializeController,
                context.initialize_controller(user, mints.redeemable, mints.xxusd, 6),
            ),
            (XxusdInstruction::Mint, context.mint(user, user, &mints, 1)),
            (XxusdInstruction::Redeem, context.redeem(user, user, &mints, 1)),
            (
                XxusdInstruction::LockXxusd,
                context.lock_xxusd(user, &mints.xxusd, 1, 60),
            ),
            (
                XxusdInstruction::ReleaseXxusd,
                context.release_xxusd(user, &mints.xxusd),
            ),
            (
                XxusdInstruction::ManageProductPrice,
                context.manage_product_price(user, 1, 2),
            ),
            (
                XxusdInstruction::ManageHedgingStrategy,
                context.manage_hedging_strategy(user, &mints.collateral, 1, true),
            ),
        ];

        for (expected, instruction) in built {
            let instruction = instruction.unwrap();
            assert_eq!(instruction.program_id, xxusd_interface::program::ID);
            assert_eq!(
                XxusdInstruction::from_instruction_data(&instruction.data),
                Some(expected)
            );
            assert_eq!(instruction.accounts[1].pubkey, match expected {
                XxusdInstruction::Mint | XxusdInstruction::Redeem => user,
                _ => context.addresses.controller(),
            });
        }
    }

    #[test]
    fn known_accounts_match_the_typed_builders() {
        let context = context();
        let user = Pubkey::new_unique();
        let mints = XxusdMints {
            redeemable: Pubkey::new_unique(),
            xxusd: Pubkey::new_unique(),
            collateral: Pubkey::new_unique(),
        };
        let typed = context.mint(user, user, &mints, 1).unwrap();
        let schema = XxusdInstruction::Mint.schema();

        for (role, meta) in schema.accounts.iter().zip(&typed.accounts) {
            if let Some(known) = context.known_account(role.name) {
                assert_eq!(known, meta.pubkey, "{}", role.name);
            }
        }
        assert_eq!(context.known_account("user"), None);
        assert_eq!(context.known_account("lock_vault"), None);
    }

    #[test]
    fn lock_vault_belongs_to_lock_manager() {
        let context = context();
        let xxusd_mint = Pubkey::new_unique();
        let ix = context
            .lock_xxusd(Pubkey::new_unique(), &xxusd_mint, 5, 3600)
            .unwrap();
        assert_eq!(ix.accounts[2].pubkey, context.addresses.lock_manager());
        assert_eq!(
            ix.accounts[4].pubkey,
            get_associated_token_address(&context.addresses.lock_manager(), &xxusd_mint)
        );
    }
}
