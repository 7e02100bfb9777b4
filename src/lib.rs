//! # Cryptographic Event Log
//!
//! An append-only, hash-chained, cryptographically signed sequence of
//! events recording the provenance of a digital asset across three trust
//! layers: local (`peer`), web-hosted (`webvh`), and Bitcoin-anchored
//! (`btco`).
//!
//! Each event is sealed by a content-addressed digest of its predecessor,
//! signed by a controller, and optionally countersigned by external
//! witnesses. Logs are built with the operation builders in [`event`],
//! promoted between layers by the managers in [`layer`], countersigned
//! through the [`witness`] adapters, checked with [`verify`], and
//! serialized with the [`wire`] codecs.
//!
//! Key generation, cryptographic signing, and ledger anchoring stay
//! outside the core behind the capability traits in [`provider`].

pub mod canonical;
mod error;
pub mod event;
pub mod hash;
pub mod layer;
mod log;
mod proof;
mod provider;
mod reference;
pub mod verify;
pub mod wire;
pub mod witness;

pub use self::error::{Error, Result};
pub use self::event::{
    CreateBuilder, DeactivateBuilder, RESOURCE_ADDED, RESOURCE_UPDATED, UpdateBuilder,
    witness_entry,
};
pub use self::layer::{
    AssetState, BtcoManager, Layer, NO_WITNESSES, PeerManager, WebvhManager, resolve_state,
};
pub use self::log::{EventEntry, EventKind, EventLog};
pub use self::proof::{
    BITCOIN_ORDINALS_2024, EDDSA_JCS_2022, EDDSA_RDFC_2022, PROOF_TYPE, Proof,
};
pub use self::provider::{Inscriber, Inscription, Signer, Witness};
pub use self::reference::ExternalReference;
pub use self::verify::{
    EventReport, ProofVerifier, StructuralVerifier, VerificationReport, verify_log,
    verify_log_with,
};
pub use self::witness::{BitcoinWitness, HttpWitness, HttpWitnessConfig};
