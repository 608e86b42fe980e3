use solana_instruction::{
    AccountMeta,
    Instruction,
};
use solana_sdk::pubkey::Pubkey;

use super::{
    schema::{
        ArgType,
        ArgValue,
        InstructionSchema,
    },
    InstructionAccounts,
    InstructionArgs,
    XxusdInstruction,
};

/// A call that doesn't match the program's published interface.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("unknown method `{0}`")]
    UnknownMethod(String),
    #[error("`{method}` takes {expected} argument(s), got {actual}")]
    ArgCount {
        method: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("`{method}` argument `{arg}` must be {expected}, got {actual}")]
    ArgType {
        method: &'static str,
        arg: &'static str,
        expected: ArgType,
        actual: ArgType,
    },
    #[error("`{method}` is missing account `{role}`")]
    MissingAccount {
        method: &'static str,
        role: &'static str,
    },
    #[error("`{method}` has no account named `{role}`")]
    UnknownAccount { method: &'static str, role: String },
    #[error("`{method}` account `{role}` was passed more than once")]
    DuplicateAccount { method: &'static str, role: String },
}

/// Encodes a call by method name, validating it against the schema table first.
pub fn encode_instruction<S: AsRef<str>>(
    program_id: &Pubkey,
    method: &str,
    args: &[ArgValue],
    roles: &[(S, Pubkey)],
) -> Result<Instruction, SchemaError> {
    let instruction = XxusdInstruction::lookup(method)
        .ok_or_else(|| SchemaError::UnknownMethod(method.to_string()))?;
    encode_with_schema(program_id, instruction.schema(), args, roles)
}

/// Encodes a typed call. The types guarantee the shape; the schema check still runs so a typed
/// struct that drifts from the table fails loudly instead of producing bad data.
pub fn encode_typed<A: InstructionArgs, C: InstructionAccounts>(
    program_id: &Pubkey,
    args: &A,
    accounts: &C,
) -> Result<Instruction, SchemaError> {
    encode_with_schema(
        program_id,
        A::INSTRUCTION.schema(),
        &args.arg_values(),
        &accounts.roles(),
    )
}

fn encode_with_schema<S: AsRef<str>>(
    program_id: &Pubkey,
    schema: &'static InstructionSchema,
    args: &[ArgValue],
    roles: &[(S, Pubkey)],
) -> Result<Instruction, SchemaError> {
    let data = encode_data(schema, args)?;

    for (i, (role, _)) in roles.iter().enumerate() {
        let role = role.as_ref();
        if schema.account(role).is_none() {
            return Err(SchemaError::UnknownAccount {
                method: schema.name,
                role: role.to_string(),
            });
        }
        if roles[..i].iter().any(|(prev, _)| prev.as_ref() == role) {
            return Err(SchemaError::DuplicateAccount {
                method: schema.name,
                role: role.to_string(),
            });
        }
    }

    let accounts = schema
        .accounts
        .iter()
        .map(|account_role| {
            let (_, address) = roles
                .iter()
                .find(|(role, _)| role.as_ref() == account_role.name)
                .ok_or(SchemaError::MissingAccount {
                    method: schema.name,
                    role: account_role.name,
                })?;
            Ok(match account_role.is_writable {
                true => AccountMeta::new(*address, account_role.is_signer),
                false => AccountMeta::new_readonly(*address, account_role.is_signer),
            })
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;

    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data,
    })
}

fn encode_data(schema: &'static InstructionSchema, args: &[ArgValue]) -> Result<Vec<u8>, SchemaError> {
    if args.len() != schema.args.len() {
        return Err(SchemaError::ArgCount {
            method: schema.name,
            expected: schema.args.len(),
            actual: args.len(),
        });
    }

    let mut data = Vec::with_capacity(schema.data_len());
    data.extend_from_slice(&schema.discriminator);
    for (arg, value) in schema.args.iter().zip(args) {
        if arg.ty != value.ty() {
            return Err(SchemaError::ArgType {
                method: schema.name,
                arg: arg.name,
                expected: arg.ty,
                actual: value.ty(),
            });
        }
        value.write_le(&mut data);
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::manage_product_price::{
        ManageProductPriceAccounts,
        ManageProductPriceArgs,
    };

    fn price_roles() -> Vec<(&'static str, Pubkey)> {
        vec![
            ("authority", Pubkey::new_unique()),
            ("controller", Pubkey::new_unique()),
        ]
    }

    #[test]
    fn encodes_discriminator_then_le_args() {
        let program_id = Pubkey::new_unique();
        let roles = price_roles();
        let ix = encode_instruction(
            &program_id,
            "manage_product_price",
            &[ArgValue::U64(7), ArgValue::U64(1_500_000)],
            &roles,
        )
        .unwrap();

        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.data.len(), 8 + 8 + 8);
        assert_eq!(ix.data[..8], [254, 158, 196, 121, 138, 35, 242, 191]);
        assert_eq!(ix.data[8..16], 7u64.to_le_bytes());
        assert_eq!(ix.data[16..], 1_500_000u64.to_le_bytes());

        assert_eq!(ix.accounts.len(), 2);
        assert_eq!(ix.accounts[0], AccountMeta::new(roles[0].1, true));
        assert_eq!(ix.accounts[1], AccountMeta::new(roles[1].1, false));
    }

    #[test]
    fn account_order_follows_schema_not_caller() {
        let program_id = Pubkey::new_unique();
        let mut roles = price_roles();
        let expected = [roles[0].1, roles[1].1];
        roles.reverse();

        let ix = encode_instruction(
            &program_id,
            "manage_product_price",
            &[ArgValue::U64(1), ArgValue::U64(2)],
            &roles,
        )
        .unwrap();
        let order: Vec<Pubkey> = ix.accounts.iter().map(|meta| meta.pubkey).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn unknown_method() {
        let err = encode_instruction(
            &Pubkey::new_unique(),
            "update_hedging_strategy_parameters",
            &[ArgValue::U64(1)],
            &price_roles(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownMethod("update_hedging_strategy_parameters".into())
        );
    }

    #[test]
    fn arg_count_and_type_mismatches() {
        let program_id = Pubkey::new_unique();
        let roles = price_roles();

        assert_eq!(
            encode_instruction(&program_id, "manage_product_price", &[ArgValue::U64(1)], &roles),
            Err(SchemaError::ArgCount {
                method: "manage_product_price",
                expected: 2,
                actual: 1,
            })
        );
        assert_eq!(
            encode_instruction(
                &program_id,
                "manage_product_price",
                &[ArgValue::U64(1), ArgValue::I64(2)],
                &roles
            ),
            Err(SchemaError::ArgType {
                method: "manage_product_price",
                arg: "price",
                expected: ArgType::U64,
                actual: ArgType::I64,
            })
        );
    }

    #[test]
    fn account_role_mismatches() {
        let program_id = Pubkey::new_unique();
        let args = [ArgValue::U64(1), ArgValue::U64(2)];

        let missing = [("authority", Pubkey::new_unique())];
        assert_eq!(
            encode_instruction(&program_id, "manage_product_price", &args, &missing),
            Err(SchemaError::MissingAccount {
                method: "manage_product_price",
                role: "controller",
            })
        );

        let mut unknown = price_roles();
        unknown.push(("vault", Pubkey::new_unique()));
        assert!(matches!(
            encode_instruction(&program_id, "manage_product_price", &args, &unknown),
            Err(SchemaError::UnknownAccount { role, .. }) if role == "vault"
        ));

        let mut duplicate = price_roles();
        duplicate.push(("controller", Pubkey::new_unique()));
        assert!(matches!(
            encode_instruction(&program_id, "manage_product_price", &args, &duplicate),
            Err(SchemaError::DuplicateAccount { role, .. }) if role == "controller"
        ));
    }

    #[test]
    fn typed_and_dynamic_paths_agree() {
        let program_id = Pubkey::new_unique();
        let accounts = ManageProductPriceAccounts {
            authority: Pubkey::new_unique(),
            controller: Pubkey::new_unique(),
        };
        let typed = encode_typed(
            &program_id,
            &ManageProductPriceArgs {
                product_id: 3,
                price: 990_000,
            },
            &accounts,
        )
        .unwrap();
        let dynamic = encode_instruction(
            &program_id,
            "manage_product_price",
            &[ArgValue::U64(3), ArgValue::U64(990_000)],
            &accounts.roles(),
        )
        .unwrap();
        assert_eq!(typed, dynamic);
    }
}
