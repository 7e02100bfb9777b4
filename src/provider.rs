//! # Capability Traits
//!
//! The core consumes key material, witnessing, and ledger anchoring
//! through narrow capabilities. Implementations live outside the core;
//! algorithms take them by reference and never inspect their internals.

use serde::{Deserialize, Serialize};

use crate::proof::Proof;

/// [`Signer`] produces the controller's proof over an entry under
/// construction.
///
/// Implementations must be deterministic over their input when configured
/// with a fixed key, so tests are reproducible.
pub trait Signer: Send + Sync {
    /// Sign the canonical serialization of an unsigned entry, returning a
    /// data integrity proof whose `proofValue` is a multibase string.
    fn sign(&self, input: &[u8]) -> impl Future<Output = anyhow::Result<Proof>> + Send;
}

/// [`Witness`] countersigns the digest of a fully signed entry.
pub trait Witness: Send + Sync {
    /// Produce a witness proof over the multibase digest of an entry.
    ///
    /// The returned proof must carry `witnessedAt`.
    fn witness(&self, digest: &str) -> impl Future<Output = crate::Result<Proof>> + Send;
}

/// [`Inscriber`] commits data to an external ledger and returns anchoring
/// metadata. Consumed by the Bitcoin witness.
pub trait Inscriber: Send + Sync {
    /// Inscribe the payload with the given content type, returning the
    /// anchoring receipt. The fee rate is in sats/vbyte when provided.
    fn inscribe_data(
        &self, payload: &[u8], content_type: &str, fee_rate: Option<u64>,
    ) -> impl Future<Output = anyhow::Result<Inscription>> + Send;
}

/// Anchoring metadata returned by an inscriber.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Inscription {
    /// Transaction carrying the inscription.
    pub txid: String,

    /// Ordinal inscription identifier.
    pub inscription_id: String,

    /// Satoshi the inscription is bound to.
    pub satoshi: String,

    /// Block height at which the inscription was confirmed, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
}
