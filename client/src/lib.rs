//! Client-side utilities for interacting with the xxUSD program.
//!
//! Includes configuration loading, PDA derivations, the transaction submission pipeline,
//! instruction contexts, and the high-level [`XxusdClient`].

pub mod config;
pub mod context;
pub mod error;
pub mod logs;
pub mod pda;
pub mod pretty;
pub mod rpc;
pub mod test_accounts;
pub mod transactions;
pub mod xxusd_client;

pub use error::XxusdClientError;
pub use logs::LogColor;
pub use xxusd_client::XxusdClient;
