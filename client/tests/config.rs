use std::fs;

use client::{
    config::{
        load_wallet,
        ProgramIdentity,
        XxusdConfig,
    },
    test_accounts::USER_1,
    XxusdClientError,
};
use solana_sdk::signer::Signer;

#[test]
fn program_identity_is_created_once() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("program-id.json");

    let created = ProgramIdentity::load_or_create(&path)?;
    assert!(path.exists());
    let reloaded = ProgramIdentity::load_or_create(&path)?;
    assert_eq!(created, reloaded);

    let keypair = reloaded.keypair()?.expect("created identities keep their key");
    assert_eq!(keypair.pubkey(), reloaded.program_id()?);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert!(json["programId"].is_string());
    assert_eq!(json["secretKey"].as_array().map(Vec::len), Some(64));
    Ok(())
}

#[cfg(unix)]
#[test]
fn created_identity_is_private() -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("program-id.json");
    ProgramIdentity::load_or_create(&path)?;

    assert_eq!(fs::metadata(&path)?.permissions().mode() & 0o777, 0o600);
    Ok(())
}

#[test]
fn identity_without_secret_key_loads() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("program-id.json");
    fs::write(
        &path,
        r#"{ "programId": "Cpsquy1RbEb4N3FXDKBzrWMKTLLvBp1BBSvp899EHhCb" }"#,
    )?;

    let identity = ProgramIdentity::load_or_create(&path)?;
    assert_eq!(identity.program_id()?, xxusd_interface::program::ID);
    assert!(identity.keypair()?.is_none());
    Ok(())
}

#[test]
fn malformed_identity_is_a_configuration_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("program-id.json");

    fs::write(&path, "not json")?;
    assert!(matches!(
        ProgramIdentity::load_or_create(&path),
        Err(XxusdClientError::Configuration(_))
    ));

    fs::write(&path, r#"{ "programId": "not-base58!" }"#)?;
    assert!(matches!(
        ProgramIdentity::load(&path),
        Err(XxusdClientError::Configuration(_))
    ));
    Ok(())
}

#[test]
fn wallet_file_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("id.json");
    fs::write(&path, serde_json::to_string(&USER_1.to_bytes().to_vec())?)?;

    let wallet = load_wallet(&path)?;
    assert_eq!(wallet.pubkey(), USER_1.pubkey());

    let config = XxusdConfig::new(xxusd_interface::program::ID, path);
    assert_eq!(config.load_wallet()?.pubkey(), USER_1.pubkey());
    Ok(())
}

#[test]
fn missing_or_malformed_wallet_is_fatal() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        load_wallet(&missing),
        Err(XxusdClientError::Configuration(_))
    ));

    let short = dir.path().join("short.json");
    fs::write(&short, "[1, 2, 3]")?;
    assert!(matches!(
        load_wallet(&short),
        Err(XxusdClientError::Configuration(_))
    ));
    Ok(())
}
