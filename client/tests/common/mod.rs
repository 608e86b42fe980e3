//! An in-memory ledger for driving the submission pipeline without a validator.

#![allow(dead_code)]

use std::{
    collections::{
        HashMap,
        HashSet,
    },
    sync::Mutex,
    time::Duration,
};

use client::{
    config::XxusdConfig,
    rpc::{
        Commitment,
        LedgerRpc,
        LedgerStatus,
    },
    transactions::SendTransactionConfig,
};
use solana_client::{
    client_error::ClientError,
    rpc_config::RpcSendTransactionConfig,
};
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};
use solana_transaction_error::TransactionError;

#[derive(Default)]
struct State {
    valid_checkpoints: HashSet<Hash>,
    latest: Hash,
    statuses: HashMap<Signature, LedgerStatus>,
    /// Transactions applied, in order. A duplicate submission is never applied twice.
    applied: Vec<Transaction>,
    accounts: HashMap<Pubkey, Vec<u8>>,
    fail_with: Option<TransactionError>,
    /// Accept transactions but never report a status for them.
    stall: bool,
    landed_commitment: Commitment,
    checkpoint_calls: usize,
    submit_calls: usize,
}

pub struct MockLedger {
    state: Mutex<State>,
}

impl Default for MockLedger {
    fn default() -> Self {
        let latest = Hash::new_unique();
        Self {
            state: Mutex::new(State {
                valid_checkpoints: HashSet::from([latest]),
                latest,
                landed_commitment: Commitment::Finalized,
                ..Default::default()
            }),
        }
    }
}

impl MockLedger {
    fn with<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        f(&mut self.state.lock().unwrap())
    }

    /// Invalidates every checkpoint handed out so far and starts a new one.
    pub fn expire_checkpoints(&self) {
        self.with(|s| {
            s.valid_checkpoints.clear();
            s.latest = Hash::new_unique();
            s.valid_checkpoints.insert(s.latest);
        })
    }

    pub fn fail_with(&self, error: TransactionError) {
        self.with(|s| s.fail_with = Some(error));
    }

    pub fn stall(&self) {
        self.with(|s| s.stall = true);
    }

    pub fn land_at(&self, commitment: Commitment) {
        self.with(|s| s.landed_commitment = commitment);
    }

    pub fn set_account(&self, address: Pubkey, data: Vec<u8>) {
        self.with(|s| s.accounts.insert(address, data));
    }

    pub fn applied(&self) -> Vec<Transaction> {
        self.with(|s| s.applied.clone())
    }

    pub fn checkpoint_calls(&self) -> usize {
        self.with(|s| s.checkpoint_calls)
    }

    pub fn submit_calls(&self) -> usize {
        self.with(|s| s.submit_calls)
    }

    pub fn latest(&self) -> Hash {
        self.with(|s| s.latest)
    }
}

impl LedgerRpc for MockLedger {
    async fn latest_checkpoint(&self, _commitment: Commitment) -> Result<(Hash, u64), ClientError> {
        Ok(self.with(|s| {
            s.checkpoint_calls += 1;
            (s.latest, 150)
        }))
    }

    async fn is_checkpoint_valid(
        &self,
        checkpoint: &Hash,
        _commitment: Commitment,
    ) -> Result<bool, ClientError> {
        Ok(self.with(|s| s.valid_checkpoints.contains(checkpoint)))
    }

    async fn submit(
        &self,
        transaction: &Transaction,
        _config: RpcSendTransactionConfig,
    ) -> Result<Signature, ClientError> {
        self.with(|s| {
            s.submit_calls += 1;
            let signature = transaction.signatures[0];
            // Checkpoint age is checked before the duplicate check, as the bank does.
            if !s
                .valid_checkpoints
                .contains(&transaction.message.recent_blockhash)
            {
                return Err(ClientError::from(TransactionError::BlockhashNotFound));
            }
            if s.statuses.contains_key(&signature)
                || (s.stall && s.applied.iter().any(|tx| tx.signatures[0] == signature))
            {
                return Err(ClientError::from(TransactionError::AlreadyProcessed));
            }
            if transaction.verify().is_err() {
                return Err(ClientError::from(TransactionError::SignatureFailure));
            }

            s.applied.push(transaction.clone());
            if !s.stall {
                s.statuses.insert(
                    signature,
                    LedgerStatus {
                        commitment: s.landed_commitment,
                        err: s.fail_with.clone(),
                    },
                );
            }
            Ok(signature)
        })
    }

    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<LedgerStatus>, ClientError> {
        Ok(self.with(|s| s.statuses.get(signature).cloned()))
    }

    async fn account_data(
        &self,
        address: &Pubkey,
        _commitment: Commitment,
    ) -> Result<Option<Vec<u8>>, ClientError> {
        Ok(self.with(|s| s.accounts.get(address).cloned()))
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64, ClientError> {
        Ok((data_len as u64 + 128) * 6_960)
    }
}

/// Quiet, fast send settings for tests.
pub fn test_send_config() -> SendTransactionConfig {
    SendTransactionConfig {
        debug_logs: Some(false),
        confirm_timeout: Duration::from_millis(300),
        poll_interval: Duration::from_millis(5),
        ..Default::default()
    }
}

pub fn test_config(program_id: Pubkey) -> XxusdConfig {
    XxusdConfig::new(program_id, "unused-wallet.json".into()).with_send_config(test_send_config())
}
