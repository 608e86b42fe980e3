//! Helpers for pretty-printing xxUSD errors and account state in a readable, colorized format.

pub mod instruction_error;
pub mod state;
