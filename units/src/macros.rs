/// Returns `10^decimals` as a `u64`, or an early `return Err($err)` from the surrounding function
/// when the exponent is out of the supported `0..=18` range.
///
/// # Example
///
/// ```
/// fn scale(decimals: u8) -> Result<u64, ()> {
///     Ok(units::pow10_u64!(decimals, ()))
/// }
///
/// assert_eq!(scale(6), Ok(1_000_000));
/// assert_eq!(scale(19), Err(()));
/// ```
#[macro_export]
#[rustfmt::skip]
macro_rules! pow10_u64 {
    ($decimals:expr, $err:expr) => {{
        match $decimals {
            0  => 1u64,
            1  => 10,
            2  => 100,
            3  => 1_000,
            4  => 10_000,
            5  => 100_000,
            6  => 1_000_000,
            7  => 10_000_000,
            8  => 100_000_000,
            9  => 1_000_000_000,
            10 => 10_000_000_000,
            11 => 100_000_000_000,
            12 => 1_000_000_000_000,
            13 => 10_000_000_000_000,
            14 => 100_000_000_000_000,
            15 => 1_000_000_000_000_000,
            16 => 10_000_000_000_000_000,
            17 => 100_000_000_000_000_000,
            18 => 1_000_000_000_000_000_000,
            _ => return Err($err),
        }
    }};
}
