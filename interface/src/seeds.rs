//! PDA seeds. These must match the program byte for byte.

pub const CONTROLLER_SEED: &[u8] = b"controller";
pub const LOCK_MANAGER_SEED: &[u8] = b"lock_manager";
pub const HEDGING_STRATEGY_SEED: &[u8] = b"hedging_strategy";
pub const KAMINO_DEPOSITORY_SEED: &[u8] = b"kamino_depository";

/// Max number of seeds accepted by program address derivation.
pub const MAX_SEEDS: usize = 16;
/// Max length in bytes of a single seed.
pub const MAX_SEED_LEN: usize = 32;
