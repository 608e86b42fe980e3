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

/// Collateral depository the controller mints against.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct KaminoDepository {
    pub bump: u8,
    pub controller: Pubkey,
    pub collateral_mint: Pubkey,
    pub redeemable_amount_under_management: u128,
    pub redeemable_amount_under_management_cap: u128,
    pub minting_fee_in_bps: u16,
    pub redeeming_fee_in_bps: u16,
}

impl KaminoDepository {
    pub const LEN: usize = DISCRIMINATOR_LEN + 1 + 32 + 32 + 16 + 16 + 2 + 2;

    /// Remaining redeemable capacity before the cap is hit.
    pub fn remaining_capacity(&self) -> u128 {
        self.redeemable_amount_under_management_cap
            .saturating_sub(self.redeemable_amount_under_management)
    }
}

const_assert_eq!(KaminoDepository::LEN, 109);

impl AnchorAccount for KaminoDepository {
    const NAME: &'static str = "KaminoDepository";
    const DISCRIMINATOR: [u8; 8] = [119, 152, 39, 228, 36, 4, 198, 33];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_layout_length() {
        let depository = KaminoDepository {
            bump: 1,
            controller: Pubkey::new_unique(),
            collateral_mint: Pubkey::new_unique(),
            redeemable_amount_under_management: 10,
            redeemable_amount_under_management_cap: 25,
            minting_fee_in_bps: 5,
            redeeming_fee_in_bps: 7,
        };
        let encoded = borsh::to_vec(&depository).unwrap();
        assert_eq!(DISCRIMINATOR_LEN + encoded.len(), KaminoDepository::LEN);
        assert_eq!(depository.remaining_capacity(), 15);
    }
}
