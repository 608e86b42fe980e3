//! Instruction builders bound to a deployment: the SPL token helpers and the xxUSD program.

pub mod token;
pub mod xxusd;
