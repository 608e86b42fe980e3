//! Fixed-point conversion between UI amounts (decimal quantities shown to users) and native
//! amounts (the integer smallest-unit representation stored on-chain).
//!
//! Native amounts are always exact integers. UI amounts use [`Decimal`] so the conversion never
//! goes through floating point; fractional native units are floored away.

use std::{
    fmt::{
        self,
        Display,
    },
    str::FromStr,
};

use rust_decimal::{
    Decimal,
    RoundingStrategy,
};

mod error;
mod macros;

pub use error::UnitsError;

/// The largest decimals count whose scale factor, `10^decimals`, fits in a `u64`.
pub const MAX_DECIMALS: u8 = 18;

/// Returns `10^decimals`.
pub fn scale_factor(decimals: u8) -> Result<u64, UnitsError> {
    Ok(pow10_u64!(decimals, UnitsError::InvalidDecimals(decimals)))
}

/// Converts a UI amount to its native amount: `floor(amount * 10^decimals)`.
pub fn ui_to_native(amount: Decimal, decimals: u8) -> Result<u64, UnitsError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(UnitsError::NegativeAmount(amount.to_string()));
    }
    let scale = Decimal::from(scale_factor(decimals)?);

    let scaled = amount
        .checked_mul(scale)
        .ok_or_else(|| UnitsError::ArithmeticOverflow(amount.to_string()))?
        .round_dp_with_strategy(0, RoundingStrategy::ToZero);

    u64::try_from(scaled).map_err(|_| UnitsError::ArithmeticOverflow(amount.to_string()))
}

/// Converts a native amount to its UI amount: `amount / 10^decimals`. Exact for every `u64`.
pub fn native_to_ui(amount: u64, decimals: u8) -> Result<Decimal, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::InvalidDecimals(decimals));
    }
    // `Decimal` holds 96-bit mantissas, so any `u64` at any scale up to 28 is representable.
    Ok(Decimal::from_i128_with_scale(amount as i128, decimals as u32).normalize())
}

/// Parses user input such as `"12.5"` and converts it to a native amount.
pub fn parse_ui_amount(input: &str, decimals: u8) -> Result<u64, UnitsError> {
    let amount = Decimal::from_str(input.trim())
        .or_else(|_| Decimal::from_scientific(input.trim()))
        .map_err(|_| UnitsError::InvalidAmount(input.to_string()))?;
    ui_to_native(amount, decimals)
}

/// A native amount tagged with the decimals of the mint it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiAmount {
    pub native: u64,
    pub decimals: u8,
}

impl UiAmount {
    pub const fn new(native: u64, decimals: u8) -> Self {
        Self { native, decimals }
    }

    pub fn from_ui(amount: Decimal, decimals: u8) -> Result<Self, UnitsError> {
        Ok(Self::new(ui_to_native(amount, decimals)?, decimals))
    }

    pub fn ui(&self) -> Result<Decimal, UnitsError> {
        native_to_ui(self.native, self.decimals)
    }
}

impl Display for UiAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ui() {
            Ok(ui) => write!(f, "{ui}"),
            Err(_) => write!(f, "{} (raw, {} decimals)", self.native, self.decimals),
        }
    }
}
