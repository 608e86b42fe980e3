//! The transaction submission pipeline.
//!
//! A transaction moves through [`BuiltTransaction`] → [`SignedTransaction`] →
//! [`SubmittedTransaction`] and ends as a confirmed [`Signature`] or an [`XxusdClientError`]. Each
//! step consumes the previous state, so a transaction can't be signed twice or confirmed before
//! it was sent.

use std::time::Duration;

use solana_client::{
    client_error::{
        ClientError,
        ClientErrorKind,
    },
    nonblocking::rpc_client::RpcClient,
    rpc_config::RpcSendTransactionConfig,
    rpc_request::{
        RpcError,
        RpcResponseErrorData,
    },
    rpc_response::RpcSimulateTransactionResult,
};
use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_instruction::Instruction;
use solana_sdk::{
    hash::Hash,
    message::Message,
    pubkey::Pubkey,
    signature::Signature,
    signer::Signer,
    transaction::Transaction,
};
use solana_transaction_error::TransactionError;

use crate::{
    error::XxusdClientError,
    logs::{
        log_error,
        log_info,
        log_success,
        log_warning,
    },
    pretty::instruction_error::{
        decode_program_error,
        PrettyExecutionFailure,
    },
    rpc::{
        Commitment,
        LedgerRpc,
    },
};

pub const DEFAULT_FUND_AMOUNT: u64 = 10_000_000_000;

#[derive(Clone, Debug)]
pub struct SendTransactionConfig {
    /// Prepends compute budget instructions with this unit limit.
    pub compute_budget: Option<u32>,
    pub debug_logs: Option<bool>,
    /// Target commitment for both preflight and confirmation.
    pub commitment: Commitment,
    pub skip_preflight: bool,
    /// Bound on fetching a fresh checkpoint.
    pub checkpoint_timeout: Duration,
    /// Bound on polling for confirmation.
    pub confirm_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for SendTransactionConfig {
    fn default() -> Self {
        SendTransactionConfig {
            compute_budget: Default::default(),
            debug_logs: Some(true),
            commitment: Commitment::Confirmed,
            skip_preflight: false,
            checkpoint_timeout: Duration::from_secs(10),
            confirm_timeout: Duration::from_secs(60),
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl SendTransactionConfig {
    fn debug(&self) -> bool {
        matches!(self.debug_logs, Some(true))
    }

    fn log_state(&self, state: TransactionState, signature: &Signature) {
        if self.debug() {
            log_info(state, signature);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum TransactionState {
    Built,
    Signed,
    Submitted,
    Confirmed,
    Failed,
    TimedOut,
}

/// An unsigned message bound to a fresh checkpoint.
#[derive(Clone, Debug)]
pub struct BuiltTransaction {
    message: Message,
    checkpoint: Hash,
}

impl BuiltTransaction {
    /// Fetches a fresh checkpoint and compiles `instructions` with `fee_payer` paying.
    pub async fn build<R: LedgerRpc>(
        rpc: &R,
        fee_payer: &Pubkey,
        instructions: &[Instruction],
        config: &SendTransactionConfig,
    ) -> Result<Self, XxusdClientError> {
        let (checkpoint, _last_valid_block_height) =
            tokio::time::timeout(config.checkpoint_timeout, rpc.latest_checkpoint(config.commitment))
                .await
                .map_err(|_| {
                    XxusdClientError::Submission(format!(
                        "no checkpoint within {:?}",
                        config.checkpoint_timeout
                    ))
                })?
                .map_err(|e| XxusdClientError::Submission(format!("checkpoint lookup: {e}")))?;

        Ok(Self::with_checkpoint(fee_payer, instructions, config, checkpoint))
    }

    /// Compiles the message against a checkpoint the caller already has.
    pub fn with_checkpoint(
        fee_payer: &Pubkey,
        instructions: &[Instruction],
        config: &SendTransactionConfig,
        checkpoint: Hash,
    ) -> Self {
        let instructions = [
            config.compute_budget.map_or(vec![], |budget| {
                vec![
                    ComputeBudgetInstruction::set_compute_unit_limit(budget),
                    ComputeBudgetInstruction::set_compute_unit_price(1),
                ]
            }),
            instructions.to_vec(),
        ]
        .concat();

        Self {
            message: Message::new_with_blockhash(&instructions, Some(fee_payer), &checkpoint),
            checkpoint,
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    /// The keys that must sign, fee payer first.
    pub fn required_signers(&self) -> &[Pubkey] {
        let num_signers = self.message.header.num_required_signatures as usize;
        &self.message.account_keys[..num_signers]
    }

    /// Signs with the subset of `signers` the message requires. Extra signers are ignored; a
    /// missing one is a [`XxusdClientError::Signing`] naming the key.
    pub fn sign(self, signers: &[&dyn Signer]) -> Result<SignedTransaction, XxusdClientError> {
        let mut selected: Vec<&dyn Signer> = Vec::with_capacity(signers.len());
        for key in self.required_signers() {
            let signer = signers
                .iter()
                .find(|signer| signer.try_pubkey().is_ok_and(|pubkey| pubkey == *key))
                .ok_or_else(|| XxusdClientError::Signing(format!("no signer for {key}")))?;
            selected.push(*signer);
        }

        let mut transaction = Transaction::new_unsigned(self.message);
        transaction
            .try_sign(selected.as_slice(), self.checkpoint)
            .map_err(|e| XxusdClientError::Signing(e.to_string()))?;

        SignedTransaction::new(transaction)
    }
}

/// A fully signed, immutable transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    signature: Signature,
    transaction: Transaction,
}

impl SignedTransaction {
    fn new(transaction: Transaction) -> Result<Self, XxusdClientError> {
        let signature = *transaction
            .signatures
            .first()
            .ok_or_else(|| XxusdClientError::Signing("transaction has no signatures".into()))?;
        Ok(Self {
            signature,
            transaction,
        })
    }

    /// The fee payer's signature, which identifies the transaction on the ledger.
    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn checkpoint(&self) -> &Hash {
        &self.transaction.message.recent_blockhash
    }

    /// The bytes sent over the wire. Sending them again is deduplicated by the ledger.
    pub fn wire_bytes(&self) -> Result<Vec<u8>, XxusdClientError> {
        bincode::serialize(&self.transaction)
            .map_err(|e| XxusdClientError::Signing(format!("couldn't serialize: {e}")))
    }

    pub fn from_wire_bytes(bytes: &[u8]) -> Result<Self, XxusdClientError> {
        let transaction: Transaction = bincode::deserialize(bytes)
            .map_err(|e| XxusdClientError::Signing(format!("malformed transaction bytes: {e}")))?;
        let required = transaction.message.header.num_required_signatures as usize;
        if required == 0 || transaction.signatures.len() != required {
            return Err(XxusdClientError::Signing(format!(
                "expected {required} signatures, found {}",
                transaction.signatures.len()
            )));
        }
        transaction
            .verify()
            .map_err(|e| XxusdClientError::Signing(format!("invalid signature: {e}")))?;
        Self::new(transaction)
    }

    /// Sends the transaction. With preflight on, an expired checkpoint is rejected here.
    ///
    /// A rejection the ledger also gives for duplicates (`AlreadyProcessed`, or
    /// `BlockhashNotFound` once the checkpoint has expired) is checked against the signature's
    /// status first. A signature the ledger already knows moves on to confirmation.
    pub async fn submit<R: LedgerRpc>(
        self,
        rpc: &R,
        config: &SendTransactionConfig,
    ) -> Result<SubmittedTransaction, XxusdClientError> {
        let signature = self.signature();
        let send_config = RpcSendTransactionConfig {
            skip_preflight: config.skip_preflight,
            preflight_commitment: Some(config.commitment.into()),
            ..Default::default()
        };

        if let Err(e) = rpc.submit(&self.transaction, send_config).await {
            let landed = match e.get_transaction_error() {
                Some(TransactionError::AlreadyProcessed) => true,
                Some(TransactionError::BlockhashNotFound) => {
                    rpc.signature_status(&signature).await?.is_some()
                }
                _ => false,
            };
            if !landed {
                return Err(classify_submit_error(signature, e));
            }
            if config.debug() {
                log_info("Already processed", signature);
            }
        }

        config.log_state(TransactionState::Submitted, &signature);
        Ok(SubmittedTransaction {
            signature,
            checkpoint: *self.checkpoint(),
            transaction: self.transaction,
        })
    }
}

fn classify_submit_error(signature: Signature, error: ClientError) -> XxusdClientError {
    match error.get_transaction_error() {
        None | Some(TransactionError::BlockhashNotFound) => {
            XxusdClientError::Submission(error.to_string())
        }
        Some(transaction_error) => XxusdClientError::ExecutionFailure {
            signature,
            error: transaction_error,
            logs: preflight_logs(&error),
            program_error: None,
        },
    }
}

fn preflight_logs(error: &ClientError) -> Vec<String> {
    match error.kind() {
        ClientErrorKind::RpcError(RpcError::RpcResponseError {
            data:
                RpcResponseErrorData::SendTransactionPreflightFailure(RpcSimulateTransactionResult {
                    logs: Some(logs),
                    ..
                }),
            ..
        }) => logs.clone(),
        _ => vec![],
    }
}

/// A transaction the ledger accepted but hasn't yet confirmed at the target commitment.
#[derive(Clone, Debug)]
pub struct SubmittedTransaction {
    signature: Signature,
    checkpoint: Hash,
    transaction: Transaction,
}

impl SubmittedTransaction {
    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Polls until the target commitment, bounded by `config.confirm_timeout`.
    pub async fn confirm<R: LedgerRpc>(
        self,
        rpc: &R,
        config: &SendTransactionConfig,
    ) -> Result<Signature, XxusdClientError> {
        let res = wait_for_commitment(rpc, &self.signature, Some(&self.checkpoint), config).await;
        match &res {
            Ok(_) => config.log_state(TransactionState::Confirmed, &self.signature),
            Err(XxusdClientError::TimedOut { .. }) => {
                config.log_state(TransactionState::TimedOut, &self.signature)
            }
            Err(_) => config.log_state(TransactionState::Failed, &self.signature),
        }
        res
    }
}

/// Polls `signature` until it reaches `config.commitment`.
///
/// With a `checkpoint`, an unseen signature whose checkpoint has expired can no longer land and
/// fails with [`XxusdClientError::Submission`]. Transient RPC errors keep the poll going.
pub async fn wait_for_commitment<R: LedgerRpc>(
    rpc: &R,
    signature: &Signature,
    checkpoint: Option<&Hash>,
    config: &SendTransactionConfig,
) -> Result<Signature, XxusdClientError> {
    tokio::time::timeout(
        config.confirm_timeout,
        poll_status(rpc, signature, checkpoint, config),
    )
    .await
    .unwrap_or(Err(XxusdClientError::TimedOut {
        signature: *signature,
    }))
}

async fn poll_status<R: LedgerRpc>(
    rpc: &R,
    signature: &Signature,
    checkpoint: Option<&Hash>,
    config: &SendTransactionConfig,
) -> Result<Signature, XxusdClientError> {
    loop {
        match rpc.signature_status(signature).await {
            Ok(Some(status)) => {
                if let Some(error) = status.err {
                    return Err(XxusdClientError::ExecutionFailure {
                        signature: *signature,
                        error,
                        logs: vec![],
                        program_error: None,
                    });
                }
                if status.commitment >= config.commitment {
                    return Ok(*signature);
                }
            }
            Ok(None) => {
                if let Some(checkpoint) = checkpoint {
                    if let Ok(false) = rpc.is_checkpoint_valid(checkpoint, config.commitment).await {
                        // Re-check once: it may have landed right before the checkpoint expired.
                        if let Ok(None) = rpc.signature_status(signature).await {
                            return Err(XxusdClientError::Submission(format!(
                                "checkpoint {checkpoint} expired before {signature} landed"
                            )));
                        }
                        continue;
                    }
                }
            }
            Err(e) => {
                if config.debug() {
                    log_warning("Status poll failed", e);
                }
            }
        }
        tokio::time::sleep(config.poll_interval).await;
    }
}

/// Attaches the decoded program error, if the failing instruction belongs to `program_id`.
fn annotate(error: XxusdClientError, transaction: &Transaction, program_id: &Pubkey) -> XxusdClientError {
    match error {
        XxusdClientError::ExecutionFailure {
            signature,
            error,
            logs,
            program_error: None,
        } => {
            let program_error = decode_program_error(&error, &transaction.message, program_id);
            XxusdClientError::ExecutionFailure {
                signature,
                error,
                logs,
                program_error,
            }
        }
        other => other,
    }
}

/// An RPC handle bundled with the send configuration and the program whose errors it decodes.
pub struct CustomRpcClient<R = RpcClient> {
    pub client: R,
    pub config: SendTransactionConfig,
    pub program_id: Pubkey,
}

impl CustomRpcClient<RpcClient> {
    pub fn new(url: impl Into<String>, config: SendTransactionConfig, program_id: Pubkey) -> Self {
        let client = RpcClient::new_with_commitment(url.into(), config.commitment.into());
        Self {
            client,
            config,
            program_id,
        }
    }

    /// Airdrops [`DEFAULT_FUND_AMOUNT`] lamports and waits for it to land.
    pub async fn fund_account(&self, account: &Pubkey) -> Result<Signature, XxusdClientError> {
        let signature = self
            .client
            .request_airdrop(account, DEFAULT_FUND_AMOUNT)
            .await?;
        wait_for_commitment(&self.client, &signature, None, &self.config).await
    }
}

impl<R: LedgerRpc> CustomRpcClient<R> {
    pub fn with_client(client: R, config: SendTransactionConfig, program_id: Pubkey) -> Self {
        Self {
            client,
            config,
            program_id,
        }
    }

    pub async fn build(
        &self,
        fee_payer: &Pubkey,
        instructions: &[Instruction],
    ) -> Result<BuiltTransaction, XxusdClientError> {
        BuiltTransaction::build(&self.client, fee_payer, instructions, &self.config).await
    }

    /// Builds, signs, submits and confirms `instructions`. `payer` pays fees; `co_signers` covers
    /// every other key the instructions need a signature from.
    pub async fn send_and_confirm_txn(
        &self,
        payer: &dyn Signer,
        co_signers: &[&dyn Signer],
        instructions: &[Instruction],
    ) -> Result<Signature, XxusdClientError> {
        let fee_payer = payer
            .try_pubkey()
            .map_err(|e| XxusdClientError::Signing(e.to_string()))?;
        let built = self.build(&fee_payer, instructions).await?;

        let signers: Vec<&dyn Signer> = std::iter::once(payer)
            .chain(co_signers.iter().copied())
            .collect();
        let signed = built.sign(&signers)?;
        self.config
            .log_state(TransactionState::Signed, &signed.signature());

        self.submit_and_confirm(signed).await
    }

    pub async fn send_single_signer(
        &self,
        signer: &dyn Signer,
        instructions: impl AsRef<[Instruction]>,
    ) -> Result<Signature, XxusdClientError> {
        self.send_and_confirm_txn(signer, &[], instructions.as_ref())
            .await
    }

    /// Submits already signed bytes, e.g. to re-check a transaction that previously timed out.
    pub async fn submit_and_confirm(
        &self,
        signed: SignedTransaction,
    ) -> Result<Signature, XxusdClientError> {
        let transaction = signed.transaction().clone();
        let res = match signed.submit(&self.client, &self.config).await {
            Ok(submitted) => submitted.confirm(&self.client, &self.config).await,
            Err(e) => Err(e),
        };

        match res {
            Ok(signature) => {
                if self.config.debug() {
                    log_success("Signature", signature);
                }
                Ok(signature)
            }
            Err(error) => {
                let error = annotate(error, &transaction, &self.program_id);
                if self.config.debug() {
                    match PrettyExecutionFailure::new(&error) {
                        Some(pretty) => println!("{}", pretty.in_message(&transaction.message)),
                        None => log_error("Transaction", &error),
                    }
                    if let Some(payer) = transaction.message.account_keys.first() {
                        log_info("Payer", payer);
                    }
                }
                Err(error)
            }
        }
    }
}
