//! # Event Construction
//!
//! Builders for the three event kinds plus witness attachment. Every
//! builder consumes a [`Signer`](crate::provider::Signer) capability and
//! returns a new log; input logs are never mutated.

mod create;
mod deactivate;
mod update;
mod witness;

use chrono::{DateTime, SecondsFormat, Utc};

pub use self::create::CreateBuilder;
pub use self::deactivate::DeactivateBuilder;
pub use self::update::UpdateBuilder;
pub use self::witness::witness_entry;
pub(crate) use self::witness::validate_witness_proof;

use serde_json::{Map, Value};

use crate::proof::{EDDSA_JCS_2022, Proof};
use crate::{Error, Result};

/// Operation tag stamped on create payloads.
pub const RESOURCE_ADDED: &str = "ResourceAdded";

/// Operation tag stamped on update payloads.
pub const RESOURCE_UPDATED: &str = "ResourceUpdated";

/// Builder does not have a signer (can't build).
pub struct WithoutSigner;

/// Builder has a signer (can build).
pub struct WithSigner<'a, S: crate::provider::Signer>(pub &'a S);

// Normalize a caller payload: objects are copied, anything else is
// wrapped as `{"value": …}`. The operation tag is stamped last.
pub(crate) fn normalize(data: Value, operation: &str) -> Map<String, Value> {
    let mut map = match data {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    };
    map.insert("operation".to_string(), Value::String(operation.to_string()));
    map
}

// Structural validation applied to every controller proof.
pub(crate) fn validate_proof(proof: &Proof) -> Result<()> {
    if proof.type_.is_empty() || proof.cryptosuite.is_empty() || proof.proof_value.is_empty() {
        return Err(Error::InvalidProof(
            "proof must carry type, cryptosuite and proofValue".to_string(),
        ));
    }
    Ok(())
}

// Required-cryptosuite check for provenance-changing events.
pub(crate) fn require_jcs(proof: &Proof) -> Result<()> {
    if proof.cryptosuite != EDDSA_JCS_2022 {
        return Err(Error::CryptosuiteRequired { found: proof.cryptosuite.clone() });
    }
    Ok(())
}

// UTC ISO 8601 with millisecond precision, as stamped into event data.
pub(crate) fn iso_millis(at: Option<DateTime<Utc>>) -> String {
    at.unwrap_or_else(Utc::now).to_rfc3339_opts(SecondsFormat::Millis, true)
}
