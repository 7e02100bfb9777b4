//! Tests for witness attachment.

mod keyring;

use credibil_cel::{CreateBuilder, Error, EventEntry, witness_entry};
use serde_json::json;

// Witnessing returns a new entry; the input entry is unchanged.
#[tokio::test]
async fn witness_does_not_mutate_entry() {
    let signer = keyring::new_keyring();
    let witness = keyring::TestWitness::new();

    let log = CreateBuilder::new(json!({"name": "asset"}))
        .signer(&signer)
        .build()
        .await
        .expect("should create log");
    let entry = &log.events[0];
    let before = entry.clone();

    let witnessed = witness_entry(entry, &witness).await.expect("should attach witness");

    assert_eq!(*entry, before);
    assert_eq!(witnessed.proof.len(), 2);
    assert!(witnessed.proof[1].is_witness());
    assert!(!witnessed.proof[0].is_witness());
}

// An entry without a controller proof cannot be witnessed.
#[tokio::test]
async fn witness_requires_controller_proof() {
    let witness = keyring::TestWitness::new();
    let entry = EventEntry::default();

    let result = witness_entry(&entry, &witness).await;
    assert!(matches!(result, Err(Error::MissingControllerProof)));
}

// A witness response without witnessedAt is rejected.
#[tokio::test]
async fn witness_response_must_carry_witnessed_at() {
    let signer = keyring::new_keyring();
    let witness = keyring::ForgetfulWitness::new();

    let log = CreateBuilder::new(json!({"name": "asset"}))
        .signer(&signer)
        .build()
        .await
        .expect("should create log");

    let result = witness_entry(&log.events[0], &witness).await;
    assert!(matches!(result, Err(Error::InvalidWitnessProof(_))));
}
