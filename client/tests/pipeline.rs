mod common;

use client::{
    rpc::Commitment,
    test_accounts::{
        AUTHORITY,
        USER_1,
    },
    transactions::{
        BuiltTransaction,
        CustomRpcClient,
        SendTransactionConfig,
        SignedTransaction,
    },
    XxusdClientError,
};
use common::{
    test_send_config,
    MockLedger,
};
use solana_instruction::{
    AccountMeta,
    Instruction,
};
use solana_instruction_error::InstructionError;
use solana_sdk::{
    pubkey::Pubkey,
    signer::Signer,
};
use solana_system_interface::instruction::transfer;
use solana_transaction_error::TransactionError;
use xxusd_interface::error::XxusdError;

fn rpc() -> CustomRpcClient<MockLedger> {
    CustomRpcClient::with_client(
        MockLedger::default(),
        test_send_config(),
        xxusd_interface::program::ID,
    )
}

fn transfer_from_authority() -> Instruction {
    transfer(&AUTHORITY.pubkey(), &Pubkey::new_unique(), 1_000)
}

#[tokio::test]
async fn confirms_at_target_commitment() -> anyhow::Result<()> {
    let rpc = rpc();
    let signature = rpc
        .send_single_signer(&*AUTHORITY, [transfer_from_authority()])
        .await?;

    let applied = rpc.client.applied();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].signatures[0], signature);
    assert_eq!(rpc.client.checkpoint_calls(), 1);
    Ok(())
}

#[tokio::test]
async fn concurrent_submissions_share_one_task() -> anyhow::Result<()> {
    let rpc = rpc();
    let (from_authority, from_user) = tokio::join!(
        rpc.send_single_signer(&*AUTHORITY, [transfer_from_authority()]),
        rpc.send_single_signer(&*USER_1, [transfer(&USER_1.pubkey(), &AUTHORITY.pubkey(), 1)]),
    );

    assert_ne!(from_authority?, from_user?);
    assert_eq!(rpc.client.applied().len(), 2);
    assert_eq!(rpc.client.checkpoint_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn checkpoint_is_fetched_per_transaction() -> anyhow::Result<()> {
    let rpc = rpc();
    rpc.send_single_signer(&*AUTHORITY, [transfer_from_authority()])
        .await?;
    rpc.client.expire_checkpoints();
    rpc.send_single_signer(&*AUTHORITY, [transfer_from_authority()])
        .await?;

    let applied = rpc.client.applied();
    assert_eq!(rpc.client.checkpoint_calls(), 2);
    assert_ne!(
        applied[0].message.recent_blockhash,
        applied[1].message.recent_blockhash
    );
    Ok(())
}

#[tokio::test]
async fn expired_checkpoint_is_rejected_at_submission() -> anyhow::Result<()> {
    let rpc = rpc();
    let built = rpc
        .build(&AUTHORITY.pubkey(), &[transfer_from_authority()])
        .await?;
    let signed = built.sign(&[&*AUTHORITY])?;
    rpc.client.expire_checkpoints();

    let err = rpc.submit_and_confirm(signed).await.unwrap_err();
    assert!(matches!(err, XxusdClientError::Submission(_)), "{err:?}");
    assert!(err.is_retryable());
    assert!(rpc.client.applied().is_empty());
    Ok(())
}

#[tokio::test]
async fn resubmitting_signed_bytes_is_idempotent() -> anyhow::Result<()> {
    let rpc = rpc();
    let signed = rpc
        .build(&AUTHORITY.pubkey(), &[transfer_from_authority()])
        .await?
        .sign(&[&*AUTHORITY])?;
    let bytes = signed.wire_bytes()?;

    let first = rpc.submit_and_confirm(signed).await?;
    let second = rpc
        .submit_and_confirm(SignedTransaction::from_wire_bytes(&bytes)?)
        .await?;

    assert_eq!(first, second);
    assert_eq!(rpc.client.submit_calls(), 2);
    assert_eq!(rpc.client.applied().len(), 1);
    Ok(())
}

#[tokio::test]
async fn resubmitting_after_checkpoint_expiry_finds_the_landed_transaction() -> anyhow::Result<()> {
    let rpc = rpc();
    let signed = rpc
        .build(&AUTHORITY.pubkey(), &[transfer_from_authority()])
        .await?
        .sign(&[&*AUTHORITY])?;
    let bytes = signed.wire_bytes()?;
    let first = rpc.submit_and_confirm(signed).await?;

    rpc.client.expire_checkpoints();
    let second = rpc
        .submit_and_confirm(SignedTransaction::from_wire_bytes(&bytes)?)
        .await?;

    assert_eq!(first, second);
    assert_eq!(rpc.client.applied().len(), 1);
    Ok(())
}

#[tokio::test]
async fn execution_failure_is_surfaced_verbatim() {
    let rpc = rpc();
    let ledger_error = TransactionError::InstructionError(0, InstructionError::Custom(6004));
    rpc.client.fail_with(ledger_error.clone());

    let instruction = Instruction::new_with_bytes(
        xxusd_interface::program::ID,
        &[0; 8],
        vec![AccountMeta::new(AUTHORITY.pubkey(), true)],
    );
    let err = rpc
        .send_single_signer(&*AUTHORITY, [instruction])
        .await
        .unwrap_err();

    match err {
        XxusdClientError::ExecutionFailure {
            error,
            program_error,
            signature,
            ..
        } => {
            assert_eq!(error, ledger_error);
            assert_eq!(program_error, XxusdError::from_code(6004));
            assert!(program_error.is_some());
            assert_eq!(rpc.client.applied()[0].signatures[0], signature);
        }
        other => panic!("expected an execution failure, got {other:?}"),
    }
}

#[tokio::test]
async fn other_programs_errors_are_not_decoded() {
    let rpc = rpc();
    rpc.client
        .fail_with(TransactionError::InstructionError(0, InstructionError::Custom(6004)));

    let err = rpc
        .send_single_signer(&*AUTHORITY, [transfer_from_authority()])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        XxusdClientError::ExecutionFailure {
            program_error: None,
            ..
        }
    ));
}

#[tokio::test]
async fn unconfirmed_transaction_times_out() -> anyhow::Result<()> {
    let rpc = rpc();
    rpc.client.stall();
    let signed = rpc
        .build(&AUTHORITY.pubkey(), &[transfer_from_authority()])
        .await?
        .sign(&[&*AUTHORITY])?;
    let expected = signed.signature();

    let err = rpc.submit_and_confirm(signed).await.unwrap_err();
    match err {
        XxusdClientError::TimedOut { signature } => assert_eq!(signature, expected),
        other => panic!("expected a timeout, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn weaker_commitment_than_target_times_out() {
    let rpc = rpc();
    rpc.client.land_at(Commitment::Processed);
    let err = rpc
        .send_single_signer(&*AUTHORITY, [transfer_from_authority()])
        .await
        .unwrap_err();
    assert!(matches!(err, XxusdClientError::TimedOut { .. }));

    let processed = CustomRpcClient::with_client(
        MockLedger::default(),
        SendTransactionConfig {
            commitment: Commitment::Processed,
            ..test_send_config()
        },
        xxusd_interface::program::ID,
    );
    processed.client.land_at(Commitment::Processed);
    assert!(processed
        .send_single_signer(&*AUTHORITY, [transfer_from_authority()])
        .await
        .is_ok());
}

#[tokio::test]
async fn pending_transaction_with_expired_checkpoint_cannot_land() -> anyhow::Result<()> {
    let rpc = rpc();
    rpc.client.stall();
    let submitted = rpc
        .build(&AUTHORITY.pubkey(), &[transfer_from_authority()])
        .await?
        .sign(&[&*AUTHORITY])?
        .submit(&rpc.client, &rpc.config)
        .await?;
    rpc.client.expire_checkpoints();

    let err = submitted
        .confirm(&rpc.client, &rpc.config)
        .await
        .unwrap_err();
    assert!(matches!(err, XxusdClientError::Submission(_)), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn missing_co_signer_fails_before_submission() {
    let rpc = rpc();
    // USER_1 must sign as the source of the transfer.
    let instruction = transfer(&USER_1.pubkey(), &AUTHORITY.pubkey(), 1);
    let err = rpc
        .send_single_signer(&*AUTHORITY, [instruction.clone()])
        .await
        .unwrap_err();

    assert!(matches!(&err, XxusdClientError::Signing(msg) if msg.contains(&USER_1.pubkey().to_string())));
    assert_eq!(rpc.client.submit_calls(), 0);

    assert!(rpc
        .send_and_confirm_txn(&*AUTHORITY, &[&*USER_1], &[instruction])
        .await
        .is_ok());
}

#[test]
fn built_transactions_start_with_the_fee_payer() {
    let built = BuiltTransaction::with_checkpoint(
        &AUTHORITY.pubkey(),
        &[transfer(&USER_1.pubkey(), &AUTHORITY.pubkey(), 1)],
        &test_send_config(),
        solana_sdk::hash::Hash::new_unique(),
    );
    assert_eq!(
        built.required_signers(),
        [AUTHORITY.pubkey(), USER_1.pubkey()]
    );
}
