//! Interprets ledger execution failures into readable xxUSD/Solana instruction error messages.

use std::fmt::Display;

use solana_instruction_error::InstructionError;
use solana_sdk::{
    message::Message,
    pubkey::Pubkey,
};
use solana_transaction_error::TransactionError;
use xxusd_interface::{
    error::XxusdError,
    instructions::XxusdInstruction,
};

use crate::{
    error::XxusdClientError,
    fmt_kv,
    LogColor,
};

/// Decodes a custom error code raised by `program_id`. Codes raised by any other program, and
/// codes outside the program's error enum, decode to `None`.
pub fn decode_program_error(
    error: &TransactionError,
    message: &Message,
    program_id: &Pubkey,
) -> Option<XxusdError> {
    let TransactionError::InstructionError(index, InstructionError::Custom(code)) = error else {
        return None;
    };
    let instruction = message.instructions.get(*index as usize)?;
    let failing_program = message
        .account_keys
        .get(instruction.program_id_index as usize)?;
    (failing_program == program_id)
        .then(|| XxusdError::from_code(*code))
        .flatten()
}

/// Display wrapper for an [`XxusdClientError::ExecutionFailure`].
pub struct PrettyExecutionFailure<'a> {
    error: &'a TransactionError,
    program_error: Option<XxusdError>,
    logs: &'a [String],
    instruction: Option<String>,
}

impl<'a> PrettyExecutionFailure<'a> {
    pub fn new(error: &'a XxusdClientError) -> Option<Self> {
        match error {
            XxusdClientError::ExecutionFailure {
                error,
                logs,
                program_error,
                ..
            } => Some(Self {
                error,
                program_error: *program_error,
                logs,
                instruction: None,
            }),
            _ => None,
        }
    }

    /// Names the failing instruction of `message`.
    pub fn in_message(mut self, message: &Message) -> Self {
        if let TransactionError::InstructionError(index, _) = self.error {
            self.instruction = message
                .instructions
                .get(*index as usize)
                .map(|instruction| format!("#{index} {}", instruction_label(&instruction.data)));
        }
        self
    }
}

impl Display for PrettyExecutionFailure<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (error_type, message) = match self.program_error {
            Some(program_error) => ("XxusdError", program_error.to_string()),
            None => ("TransactionError", self.error.to_string()),
        };
        writeln!(f, "{}", fmt_kv!(error_type, message, LogColor::Error))?;
        if let Some(instruction) = &self.instruction {
            writeln!(f, "  {}", fmt_kv!("instruction", instruction, LogColor::FadedGray))?;
        }
        if self.program_error.is_some() {
            writeln!(f, "  {}", fmt_kv!("ledger", self.error, LogColor::FadedGray))?;
        }
        for log in self.logs {
            writeln!(f, "  {}", fmt_kv!("log", log, LogColor::FadedGray))?;
        }
        Ok(())
    }
}

/// Names the xxUSD instruction an instruction's data encodes, or its first byte otherwise.
pub fn instruction_label(data: &[u8]) -> String {
    match XxusdInstruction::from_instruction_data(data) {
        Some(instruction) => instruction.to_string(),
        None => data
            .first()
            .map_or_else(|| "<empty>".to_string(), |tag| format!("tag {tag}")),
    }
}
