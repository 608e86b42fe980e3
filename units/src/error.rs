#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitsError {
    #[error("decimals {0} exceeds the maximum of {max}", max = crate::MAX_DECIMALS)]
    InvalidDecimals(u8),
    #[error("amount {0} is negative")]
    NegativeAmount(String),
    #[error("amount {0} does not fit in a native u64 amount")]
    ArithmeticOverflow(String),
    #[error("couldn't parse {0:?} as a decimal amount")]
    InvalidAmount(String),
}
