//! The remote calls the client makes, behind a trait so the submission pipeline can run against an
//! in-memory ledger in tests.

use solana_client::{
    client_error::ClientError,
    nonblocking::rpc_client::RpcClient,
    rpc_config::RpcSendTransactionConfig,
};
use solana_commitment_config::{
    CommitmentConfig,
    CommitmentLevel,
};
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};
use solana_transaction_error::TransactionError;
use solana_transaction_status_client_types::TransactionConfirmationStatus;

/// Confirmation strength, ordered from weakest to strongest.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentLevel {
    fn from(value: Commitment) -> Self {
        match value {
            Commitment::Processed => CommitmentLevel::Processed,
            Commitment::Confirmed => CommitmentLevel::Confirmed,
            Commitment::Finalized => CommitmentLevel::Finalized,
        }
    }
}

impl From<Commitment> for CommitmentConfig {
    fn from(value: Commitment) -> Self {
        CommitmentConfig {
            commitment: value.into(),
        }
    }
}

impl From<TransactionConfirmationStatus> for Commitment {
    fn from(value: TransactionConfirmationStatus) -> Self {
        match value {
            TransactionConfirmationStatus::Processed => Commitment::Processed,
            TransactionConfirmationStatus::Confirmed => Commitment::Confirmed,
            TransactionConfirmationStatus::Finalized => Commitment::Finalized,
        }
    }
}

/// What the ledger currently knows about a submitted signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerStatus {
    pub commitment: Commitment,
    /// `Some` if the transaction landed but failed.
    pub err: Option<TransactionError>,
}

/// The remote ledger calls used by the client.
///
/// The returned futures are not `Send`, and neither are the pipeline's, which borrow
/// `&dyn Signer`s across awaits. Submit concurrently from one task with `tokio::join!` rather
/// than `tokio::spawn`.
#[allow(async_fn_in_trait)]
pub trait LedgerRpc {
    /// A fresh checkpoint (recent blockhash) and the last block height it is valid for.
    async fn latest_checkpoint(&self, commitment: Commitment) -> Result<(Hash, u64), ClientError>;

    async fn is_checkpoint_valid(
        &self,
        checkpoint: &Hash,
        commitment: Commitment,
    ) -> Result<bool, ClientError>;

    async fn submit(
        &self,
        transaction: &Transaction,
        config: RpcSendTransactionConfig,
    ) -> Result<Signature, ClientError>;

    /// `None` while the ledger hasn't seen the signature.
    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<LedgerStatus>, ClientError>;

    /// The account's data, or `None` if the account doesn't exist.
    async fn account_data(
        &self,
        address: &Pubkey,
        commitment: Commitment,
    ) -> Result<Option<Vec<u8>>, ClientError>;

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64, ClientError>;
}

impl LedgerRpc for RpcClient {
    async fn latest_checkpoint(&self, commitment: Commitment) -> Result<(Hash, u64), ClientError> {
        self.get_latest_blockhash_with_commitment(commitment.into())
            .await
    }

    async fn is_checkpoint_valid(
        &self,
        checkpoint: &Hash,
        commitment: Commitment,
    ) -> Result<bool, ClientError> {
        self.is_blockhash_valid(checkpoint, commitment.into()).await
    }

    async fn submit(
        &self,
        transaction: &Transaction,
        config: RpcSendTransactionConfig,
    ) -> Result<Signature, ClientError> {
        self.send_transaction_with_config(transaction, config).await
    }

    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<LedgerStatus>, ClientError> {
        let statuses = self.get_signature_statuses(&[*signature]).await?.value;
        Ok(statuses.into_iter().flatten().next().map(|status| {
            LedgerStatus {
                commitment: status
                    .confirmation_status
                    .map(Commitment::from)
                    .unwrap_or(Commitment::Processed),
                err: status.err.map(TransactionError::from),
            }
        }))
    }

    async fn account_data(
        &self,
        address: &Pubkey,
        commitment: Commitment,
    ) -> Result<Option<Vec<u8>>, ClientError> {
        let response = self
            .get_account_with_commitment(address, commitment.into())
            .await?;
        Ok(response.value.map(|account| account.data))
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64, ClientError> {
        self.get_minimum_balance_for_rent_exemption(data_len).await
    }
}
