//! Predefined deterministic keypairs for local testing.

use std::sync::LazyLock;

use solana_sdk::signature::Keypair;

/// A keypair whose secret key is `seed` repeated. Stable across runs and machines.
pub fn deterministic_keypair(seed: u8) -> Keypair {
    Keypair::new_from_array([seed; 32])
}

/// Controller authority and fee payer.
pub static AUTHORITY: LazyLock<Keypair> = LazyLock::new(|| deterministic_keypair(1));

pub static USER_1: LazyLock<Keypair> = LazyLock::new(|| deterministic_keypair(2));

pub static USER_2: LazyLock<Keypair> = LazyLock::new(|| deterministic_keypair(3));

/// Keypair for the redeemable mint created by `initialize_controller`.
pub static REDEEMABLE_MINT: LazyLock<Keypair> = LazyLock::new(|| deterministic_keypair(4));

#[test]
fn check_test_keys() {
    use solana_sdk::signer::Signer;

    let keys = [
        AUTHORITY.pubkey(),
        USER_1.pubkey(),
        USER_2.pubkey(),
        REDEEMABLE_MINT.pubkey(),
    ];
    for (i, key) in keys.iter().enumerate() {
        assert!(!keys[i + 1..].contains(key));
    }
    assert_eq!(deterministic_keypair(2).pubkey(), USER_1.pubkey());
}
