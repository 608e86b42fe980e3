/// Anchor numbers user-defined program errors starting at this offset.
pub const ERROR_CODE_OFFSET: u32 = 6000;

/// The program's custom errors, in declaration order. The on-chain code for a variant is
/// `ERROR_CODE_OFFSET + variant as u32`.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::FromRepr, strum_macros::EnumIter)]
pub enum XxusdError {
    ProgramFrozen,
    InvalidCollateralAmount,
    InsufficientCollateralBalance,
    InvalidRedeemableAmount,
    InsufficientRedeemableBalance,
    InvalidDepository,
    InvalidRedeemableMint,
    InvalidCollateralMint,
    InvalidOwner,
    InvalidController,
    Overflow,
    InvalidRedeemableMintDecimals,
    InvalidLockPeriod,
    LockPeriodNotEnded,
    InvalidProductPrice,
    InvalidHedgingStrategy,
    ProductNotFound,
    MathOverflow,
    InsufficientFunds,
    InvalidMint,
    LockNotFound,
    InsufficientCollateral,
    InvalidProductId,
    MaxProductsReached,
    InvalidAmount,
    InsufficientReleasableAmount,
    InsufficientBalance,
}

impl XxusdError {
    /// Maps a custom instruction error code back to the program error, if it is one.
    pub fn from_code(code: u32) -> Option<Self> {
        code.checked_sub(ERROR_CODE_OFFSET).and_then(Self::from_repr)
    }

    pub const fn code(self) -> u32 {
        ERROR_CODE_OFFSET + self as u32
    }
}

impl From<XxusdError> for &'static str {
    fn from(value: XxusdError) -> Self {
        match value {
            XxusdError::ProgramFrozen => "The program is frozen",
            XxusdError::InvalidCollateralAmount => "Invalid collateral amount",
            XxusdError::InsufficientCollateralBalance => "Insufficient collateral balance",
            XxusdError::InvalidRedeemableAmount => "Invalid redeemable amount",
            XxusdError::InsufficientRedeemableBalance => "Insufficient redeemable balance",
            XxusdError::InvalidDepository => "Invalid depository",
            XxusdError::InvalidRedeemableMint => "Invalid redeemable mint",
            XxusdError::InvalidCollateralMint => "Invalid collateral mint",
            XxusdError::InvalidOwner => "Invalid owner",
            XxusdError::InvalidController => "Invalid controller",
            XxusdError::Overflow => "Overflow",
            XxusdError::InvalidRedeemableMintDecimals => "Invalid redeemable mint decimals",
            XxusdError::InvalidLockPeriod => "Invalid lock period",
            XxusdError::LockPeriodNotEnded => "Lock period not ended",
            XxusdError::InvalidProductPrice => "Invalid product price",
            XxusdError::InvalidHedgingStrategy => "Invalid hedging strategy",
            XxusdError::ProductNotFound => "Product not found",
            XxusdError::MathOverflow => "Math overflow",
            XxusdError::InsufficientFunds => "Insufficient funds",
            XxusdError::InvalidMint => "Invalid mint",
            XxusdError::LockNotFound => "Lock not found",
            XxusdError::InsufficientCollateral => "Insufficient collateral",
            XxusdError::InvalidProductId => "Invalid product ID",
            XxusdError::MaxProductsReached => "Maximum number of products reached",
            XxusdError::InvalidAmount => "Invalid amount",
            XxusdError::InsufficientReleasableAmount => "Insufficient releasable amount",
            XxusdError::InsufficientBalance => "Insufficient Balance",
        }
    }
}

impl core::fmt::Display for XxusdError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg: &'static str = (*self).into();
        write!(f, "{:?} ({}): {msg}", self, self.code())
    }
}
