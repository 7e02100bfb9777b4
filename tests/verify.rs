//! Tests for the verification engine.

mod keyring;

use credibil_cel::{
    CreateBuilder, EventLog, ProofVerifier, UpdateBuilder, verify_log, verify_log_with,
    witness_entry,
};
use serde_json::json;

// An empty log fails verification with a single diagnostic; it never
// panics or errors.
#[test]
fn empty_log_reports_failure() {
    let report = verify_log(&EventLog::default());
    assert!(!report.verified);
    assert_eq!(report.errors.len(), 1);
    assert!(report.events.is_empty());
}

// Tampering with an entry's data breaks the chain check of its
// successor but not its own proof shape.
#[tokio::test]
async fn tampered_data_breaks_chain() {
    let signer = keyring::new_keyring();

    let log = CreateBuilder::new(json!({"name": "asset"}))
        .signer(&signer)
        .build()
        .await
        .expect("should create log");
    let mut log = UpdateBuilder::from(&log, json!({"name": "New"}))
        .expect("should start update")
        .signer(&signer)
        .build()
        .await
        .expect("should append update");

    log.events[0].data.insert("name".to_string(), json!("forged"));

    let report = verify_log(&log);
    assert!(!report.verified);
    assert!(report.events[0].proof_valid);
    assert!(report.events[0].chain_valid);
    assert!(!report.events[1].chain_valid);
    assert!(report.events[1].proof_valid);
    assert!(!report.errors.is_empty());
}

// Stripping proofs is reported on the proof axis, not the chain axis.
#[tokio::test]
async fn missing_proofs_reported() {
    let signer = keyring::new_keyring();

    let mut log = CreateBuilder::new(json!({"name": "asset"}))
        .signer(&signer)
        .build()
        .await
        .expect("should create log");
    log.events[0].proof.clear();

    let report = verify_log(&log);
    assert!(!report.verified);
    assert!(!report.events[0].proof_valid);
    assert!(report.events[0].chain_valid);
}

// A proof value without a multibase prefix fails the default verifier.
#[tokio::test]
async fn bad_multibase_prefix_reported() {
    let signer = keyring::new_keyring();

    let mut log = CreateBuilder::new(json!({"name": "asset"}))
        .signer(&signer)
        .build()
        .await
        .expect("should create log");
    log.events[0].proof[0].proof_value = "QmNotMultibase".to_string();

    let report = verify_log(&log);
    assert!(!report.verified);
    assert!(!report.events[0].proof_valid);
}

// Witness proofs may use the Bitcoin cryptosuite; controller proofs may
// not.
#[tokio::test]
async fn bitcoin_cryptosuite_only_for_witnesses() {
    let signer = keyring::new_keyring();

    let log = CreateBuilder::new(json!({"name": "asset"}))
        .signer(&signer)
        .build()
        .await
        .expect("should create log");

    let mut witnessed = log.clone();
    witnessed.events[0].proof.push(keyring::bitcoin_proof());
    let report = verify_log(&witnessed);
    assert!(report.verified, "verification errors: {:?}", report.errors);

    let mut forged = log;
    let mut proof = keyring::bitcoin_proof();
    proof.witnessed_at = None;
    forged.events[0].proof[0] = proof;
    let report = verify_log(&forged);
    assert!(!report.verified);
    assert!(!report.events[0].proof_valid);
}

// A caller-supplied verifier replaces the structural default, and its
// errors become diagnostics rather than propagating.
#[tokio::test]
async fn custom_verifier_is_used() {
    struct RejectAll;
    impl ProofVerifier for RejectAll {
        fn verify(&self, _: &credibil_cel::Proof, _: &[u8]) -> anyhow::Result<()> {
            anyhow::bail!("signature did not verify")
        }
    }

    let signer = keyring::new_keyring();
    let log = CreateBuilder::new(json!({"name": "asset"}))
        .signer(&signer)
        .build()
        .await
        .expect("should create log");

    let report = verify_log_with(&log, &RejectAll);
    assert!(!report.verified);
    assert!(report.errors.iter().any(|e| e.contains("signature did not verify")));
}

// A witnessed entry still verifies: witness proofs are evaluated with
// the witness cryptosuite set.
#[tokio::test]
async fn witnessed_entry_verifies() {
    let signer = keyring::new_keyring();
    let witness = keyring::TestWitness::new();

    let mut log = CreateBuilder::new(json!({"name": "asset"}))
        .signer(&signer)
        .build()
        .await
        .expect("should create log");
    log.events[0] =
        witness_entry(&log.events[0], &witness).await.expect("should attach witness");

    assert_eq!(log.events[0].proof.len(), 2);
    let report = verify_log(&log);
    assert!(report.verified, "verification errors: {:?}", report.errors);
}
