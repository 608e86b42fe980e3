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

/// Sets the price of a product in the controller's price table. Authority only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ManageProductPriceArgs {
    pub product_id: u64,
    pub price: u64,
}

impl InstructionArgs for ManageProductPriceArgs {
    const INSTRUCTION: XxusdInstruction = XxusdInstruction::ManageProductPrice;

    fn arg_values(&self) -> Vec<ArgValue> {
        vec![ArgValue::U64(self.product_id), ArgValue::U64(self.price)]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManageProductPriceAccounts {
    pub authority: Pubkey,
    pub controller: Pubkey,
}

impl InstructionAccounts for ManageProductPriceAccounts {
    fn roles(&self) -> Vec<(&'static str, Pubkey)> {
        vec![("authority", self.authority), ("controller", self.controller)]
    }
}
