//! # Errors
//!
//! Typed errors for event log construction, migration, witnessing, and
//! serialization. Callers branch on the variant rather than matching
//! message text.

use thiserror::Error;

use crate::layer::Layer;

/// Returns CEL-specific errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by event log operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The log has no events or is absent.
    #[error("event log is empty")]
    EmptyLog,

    /// The first event of the log is not a `create` event.
    #[error("first event must be a create event")]
    NotCreateFirst,

    /// The log ends with a `deactivate` event and cannot be extended.
    #[error("event log is sealed by a deactivate event")]
    Sealed,

    /// A second deactivation was attempted.
    #[error("event log is already deactivated")]
    AlreadyDeactivated,

    /// A signer returned a structurally incomplete proof.
    #[error("invalid proof: {0}")]
    InvalidProof(String),

    /// A required event carries a disallowed cryptosuite.
    #[error("cryptosuite `eddsa-jcs-2022` is required, found `{found}`")]
    CryptosuiteRequired {
        /// The cryptosuite the proof carried.
        found: String,
    },

    /// A witness returned a structurally incomplete proof.
    #[error("invalid witness proof: {0}")]
    InvalidWitnessProof(String),

    /// The requested layer migration is not permitted.
    #[error("illegal layer transition from `{from}` to `{to}`")]
    IllegalTransition {
        /// Layer the log is currently anchored at.
        from: Layer,
        /// Layer the migration targeted.
        to: Layer,
    },

    /// The entry to witness has no proofs.
    #[error("entry has no controller proof")]
    MissingControllerProof,

    /// A witness could not be reached or returned an unusable response.
    #[error("witness unavailable at {url}")]
    WitnessUnavailable {
        /// Witness endpoint or identifier.
        url: String,
        /// HTTP status code, when the witness responded at all.
        status_code: Option<u16>,
        /// Response body or transport error detail.
        body: Option<String>,
    },

    /// The webvh hosting domain is not a plausible hostname.
    #[error("invalid domain `{0}`")]
    InvalidDomain(String),

    /// A serialized log violates the wire schema.
    #[error("malformed log: {0}")]
    MalformedLog(String),

    /// A capability (signer, witness, inscriber) failed.
    #[error(transparent)]
    Provider(#[from] anyhow::Error),

    /// A value could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
