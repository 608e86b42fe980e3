use core::fmt;

/// The argument types used by the program's instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArgType {
    U8,
    U64,
    I64,
    Bool,
}

/// A single instruction argument value, encoded little-endian as Borsh does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgValue {
    U8(u8),
    U64(u64),
    I64(i64),
    Bool(bool),
}

impl ArgValue {
    pub const fn ty(&self) -> ArgType {
        match self {
            ArgValue::U8(_) => ArgType::U8,
            ArgValue::U64(_) => ArgType::U64,
            ArgValue::I64(_) => ArgType::I64,
            ArgValue::Bool(_) => ArgType::Bool,
        }
    }

    pub(crate) fn write_le(&self, dst: &mut Vec<u8>) {
        match self {
            ArgValue::U8(v) => dst.push(*v),
            ArgValue::U64(v) => dst.extend_from_slice(&v.to_le_bytes()),
            ArgValue::I64(v) => dst.extend_from_slice(&v.to_le_bytes()),
            ArgValue::Bool(v) => dst.push(*v as u8),
        }
    }

    /// Parses operator input as a value of the given type.
    pub fn parse(ty: ArgType, input: &str) -> Option<Self> {
        let input = input.trim();
        match ty {
            ArgType::U8 => input.parse().ok().map(ArgValue::U8),
            ArgType::U64 => input.parse().ok().map(ArgValue::U64),
            ArgType::I64 => input.parse().ok().map(ArgValue::I64),
            ArgType::Bool => input.parse().ok().map(ArgValue::Bool),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::U8(v) => write!(f, "{v}u8"),
            ArgValue::U64(v) => write!(f, "{v}u64"),
            ArgValue::I64(v) => write!(f, "{v}i64"),
            ArgValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArgSchema {
    pub name: &'static str,
    pub ty: ArgType,
}

/// A named account slot of an instruction and the access it requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountRole {
    pub name: &'static str,
    pub is_writable: bool,
    pub is_signer: bool,
}

impl AccountRole {
    pub const fn readonly(name: &'static str) -> Self {
        Self {
            name,
            is_writable: false,
            is_signer: false,
        }
    }

    pub const fn writable(name: &'static str) -> Self {
        Self {
            name,
            is_writable: true,
            is_signer: false,
        }
    }

    pub const fn signer(name: &'static str) -> Self {
        Self {
            name,
            is_writable: true,
            is_signer: true,
        }
    }
}

/// One entry of the instruction schema table.
#[derive(Debug, PartialEq, Eq)]
pub struct InstructionSchema {
    pub name: &'static str,
    /// First 8 bytes of `sha256("global:<name>")`.
    pub discriminator: [u8; 8],
    pub args: &'static [ArgSchema],
    pub accounts: &'static [AccountRole],
}

impl InstructionSchema {
    pub fn account(&self, name: &str) -> Option<&AccountRole> {
        self.accounts.iter().find(|role| role.name == name)
    }

    /// The length of the encoded instruction data.
    pub fn data_len(&self) -> usize {
        8 + self
            .args
            .iter()
            .map(|arg| match arg.ty {
                ArgType::U8 | ArgType::Bool => 1,
                ArgType::U64 | ArgType::I64 => 8,
            })
            .sum::<usize>()
    }
}

/// Declares the program's instructions: generates the [`super::XxusdInstruction`] enum and the
/// schema table it indexes into, in declaration order.
macro_rules! xxusd_instructions {
    ($(
        $(#[$meta:meta])*
        $variant:ident = $name:literal, $discriminator:expr,
        args: [$($arg:literal: $ty:ident),* $(,)?],
        accounts: [$($role:literal => $access:ident),* $(,)?];
    )*) => {
        /// The instructions published by the xxUSD program.
        #[repr(u8)]
        #[derive(
            Clone,
            Copy,
            Debug,
            PartialEq,
            Eq,
            Hash,
            strum_macros::Display,
            strum_macros::EnumString,
            strum_macros::EnumIter,
            strum_macros::IntoStaticStr,
        )]
        pub enum XxusdInstruction {
            $(
                $(#[$meta])*
                #[strum(serialize = $name)]
                $variant,
            )*
        }

        /// The schema of every instruction the program publishes.
        pub static INSTRUCTION_SCHEMAS: &[$crate::instructions::schema::InstructionSchema] = &[
            $(
                $crate::instructions::schema::InstructionSchema {
                    name: $name,
                    discriminator: $discriminator,
                    args: &[$(
                        $crate::instructions::schema::ArgSchema {
                            name: $arg,
                            ty: $crate::instructions::schema::ArgType::$ty,
                        },
                    )*],
                    accounts: &[$(
                        $crate::instructions::schema::AccountRole::$access($role),
                    )*],
                },
            )*
        ];
    };
}

pub(crate) use xxusd_instructions;
