//! # Data Integrity Proofs
//!
//! Proofs attached to event log entries. A single structure covers both
//! the controller's proof and witness countersignatures; a proof is a
//! witness proof when `witnessedAt` is present. Bitcoin witnesses carry
//! additional anchoring fields.
//!
//! See [W3C Data Integrity](https://www.w3.org/TR/vc-data-integrity/).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cryptosuite required on create and update proofs.
pub const EDDSA_JCS_2022: &str = "eddsa-jcs-2022";

/// Cryptosuite accepted on discretionary proofs only.
pub const EDDSA_RDFC_2022: &str = "eddsa-rdfc-2022";

/// Cryptosuite carried by Bitcoin ordinal witness proofs.
pub const BITCOIN_ORDINALS_2024: &str = "bitcoin-ordinals-2024";

/// The proof type every proof must declare.
pub const PROOF_TYPE: &str = "DataIntegrityProof";

/// A data integrity proof over an event log entry.
///
/// The first proof on an entry is always the controller's; any subsequent
/// proofs are witness countersignatures. `proofValue` is a
/// multibase-encoded binary value (prefix `z` for base58btc or `u` for
/// base64url).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Proof {
    /// The specific proof type. Must be "`DataIntegrityProof`".
    #[serde(rename = "type")]
    pub type_: String,

    /// Identifies the cryptographic suite used to produce the proof, e.g.
    /// "`eddsa-jcs-2022`".
    pub cryptosuite: String,

    /// The date-time the proof was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Used to verify the proof. Typically a DID URL identifying a key.
    pub verification_method: String,

    /// The reason for the proof, e.g. "`assertionMethod`".
    pub proof_purpose: String,

    /// The multibase-encoded proof value.
    pub proof_value: String,

    /// The instant at which a witness observed the entry. Present on
    /// witness proofs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witnessed_at: Option<DateTime<Utc>>,

    /// Bitcoin transaction carrying the witness inscription.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,

    /// Ordinal inscription identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inscription_id: Option<String>,

    /// Satoshi the inscription is bound to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satoshi: Option<String>,

    /// Block height at which the inscription was confirmed, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
}

impl Proof {
    /// `true` when the proof is a witness countersignature.
    #[must_use]
    pub const fn is_witness(&self) -> bool {
        self.witnessed_at.is_some()
    }

    /// `true` when the proof value carries a supported multibase prefix.
    #[must_use]
    pub fn has_multibase_value(&self) -> bool {
        self.proof_value.starts_with('z') || self.proof_value.starts_with('u')
    }
}
