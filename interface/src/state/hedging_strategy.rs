use borsh::{
    BorshDeserialize,
    BorshSerialize,
};
use solana_sdk::pubkey::Pubkey;
use static_assertions::const_assert_eq;

use super::{
    AnchorAccount,
    DISCRIMINATOR_LEN,
};

#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct HedgingStrategy {
    pub bump: u8,
    pub controller: Pubkey,
    pub deposited_amount: u64,
}

impl HedgingStrategy {
    pub const LEN: usize = DISCRIMINATOR_LEN + 1 + 32 + 8;
}

const_assert_eq!(HedgingStrategy::LEN, 49);

impl AnchorAccount for HedgingStrategy {
    const NAME: &'static str = "HedgingStrategy";
    const DISCRIMINATOR: [u8; 8] = [171, 206, 149, 28, 184, 243, 79, 100];
}
