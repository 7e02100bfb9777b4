//! Tests for asset state replay.

mod keyring;

use credibil_cel::{
    CreateBuilder, Error, EventLog, ExternalReference, Layer, PeerManager, UpdateBuilder,
    resolve_state,
};
use serde_json::json;

// The create event seeds the state; unknown fields land in metadata.
#[tokio::test]
async fn create_seeds_state() {
    let signer = keyring::new_keyring();

    let log = CreateBuilder::new(json!({
        "did": "did:peer:4zQmAbCd",
        "name": "Artwork",
        "creator": "did:key:alice",
        "createdAt": "2024-05-01T00:00:00.000Z",
        "resources": [{"digestMultibase": "uAAA"}],
        "edition": 3,
    }))
    .signer(&signer)
    .build()
    .await
    .expect("should create log");

    let state = resolve_state(&log).expect("should resolve state");
    assert_eq!(state.did, "did:peer:4zQmAbCd");
    assert_eq!(state.name.as_deref(), Some("Artwork"));
    assert_eq!(state.layer, Layer::Peer);
    assert_eq!(state.creator.as_deref(), Some("did:key:alice"));
    assert_eq!(state.created_at.as_deref(), Some("2024-05-01T00:00:00.000Z"));
    assert_eq!(state.resources.len(), 1);
    assert_eq!(state.metadata.get("edition"), Some(&json!(3)));
    assert!(!state.deactivated);
}

// Field updates overwrite recognized fields and accumulate the rest.
#[tokio::test]
async fn updates_fold_in_order() {
    let signer = keyring::new_keyring();

    let log = PeerManager::create(json!({"did": "did:peer:4zQmAbCd", "name": "First"}), &signer)
        .await
        .expect("should create log");
    let log = PeerManager::update(&log, json!({"name": "Second", "note": "relisted"}), &signer)
        .await
        .expect("should update");
    let log = PeerManager::update(&log, json!({"name": "Third"}), &signer)
        .await
        .expect("should update");

    let state = PeerManager::current_state(&log).expect("should resolve state");
    assert_eq!(state.name.as_deref(), Some("Third"));
    assert_eq!(state.metadata.get("note"), Some(&json!("relisted")));
    assert!(state.updated_at.is_some());
}

// Resources accumulate across add_resource updates.
#[tokio::test]
async fn resources_accumulate() {
    let signer = keyring::new_keyring();

    let log = PeerManager::create(json!({"did": "did:peer:4zQmAbCd"}), &signer)
        .await
        .expect("should create log");

    let first = ExternalReference::new(b"image bytes", Some("image/png"), &[]);
    let second = ExternalReference::new(
        b"metadata bytes",
        Some("application/json"),
        &["https://example.com/meta.json".to_string()],
    );
    let log = PeerManager::add_resource(&log, &first, &signer)
        .await
        .expect("should bind resource");
    let log = PeerManager::add_resource(&log, &second, &signer)
        .await
        .expect("should bind resource");

    let state = PeerManager::current_state(&log).expect("should resolve state");
    assert_eq!(state.resources.len(), 2);
    assert_eq!(
        state.resources[0].get("digestMultibase"),
        Some(&json!(first.digest_multibase))
    );
    assert_eq!(state.resources[1].get("mediaType"), Some(&json!("application/json")));
}

// Replay rejects logs that do not start with a create event.
#[tokio::test]
async fn replay_guards() {
    assert!(matches!(resolve_state(&EventLog::default()), Err(Error::EmptyLog)));

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

    log.events.remove(0);
    assert!(matches!(resolve_state(&log), Err(Error::NotCreateFirst)));
}
