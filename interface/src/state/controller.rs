use borsh::{
    BorshDeserialize,
    BorshSerialize,
};
use solana_sdk::pubkey::Pubkey;

use super::AnchorAccount;

/// The program's global state, a PDA of [`crate::seeds::CONTROLLER_SEED`].
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Controller {
    pub bump: u8,
    pub authority: Pubkey,
    pub redeemable_mint: Pubkey,
    pub xxusd_mint: Pubkey,
    pub redeemable_circulating_supply: u64,
    pub kamino_depository: Pubkey,
    pub kamino_depository_weight_bps: u16,
    pub is_frozen: bool,
    pub product_prices: Vec<ProductPrice>,
    pub locked_xxusd_supply: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ProductPrice {
    pub product_id: u64,
    pub price: u64,
}

impl AnchorAccount for Controller {
    const NAME: &'static str = "Controller";
    const DISCRIMINATOR: [u8; 8] = [184, 79, 171, 0, 183, 43, 113, 110];
}

impl Controller {
    /// The price the authority last set for `product_id`, if any.
    pub fn product_price(&self, product_id: u64) -> Option<u64> {
        self.product_prices
            .iter()
            .find(|entry| entry.product_id == product_id)
            .map(|entry| entry.price)
    }
}
