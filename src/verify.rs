//! # Log Verification
//!
//! Verification walks the log in order, recomputing previous-event
//! digests and evaluating each proof. Diagnostics are accumulated rather
//! than failing fast, so callers see every problem; malformed input
//! produces a failed report, never an error.
//!
//! The default verifier is structural. Cryptographic verification is a
//! caller concern: supply a [`ProofVerifier`] that resolves the proof's
//! `verificationMethod` out-of-band and checks the signature over the
//! canonical bytes it receives.

use serde::Serialize;

use crate::log::{EventKind, EventLog};
use crate::proof::{BITCOIN_ORDINALS_2024, EDDSA_JCS_2022, EDDSA_RDFC_2022, PROOF_TYPE, Proof};

/// Evaluates a single proof against the canonical bytes it covers.
pub trait ProofVerifier {
    /// Verify one proof. Any error is reported as a verification failure
    /// for the owning entry; it is never propagated.
    ///
    /// # Errors
    ///
    /// Should return an error describing why the proof is not acceptable.
    fn verify(&self, proof: &Proof, canonical: &[u8]) -> anyhow::Result<()>;
}

/// The structural default verifier.
///
/// Checks proof shape only: type, cryptosuite, verification method,
/// purpose, and the multibase prefix of the proof value.
pub struct StructuralVerifier;

impl ProofVerifier for StructuralVerifier {
    fn verify(&self, proof: &Proof, _canonical: &[u8]) -> anyhow::Result<()> {
        if proof.type_ != PROOF_TYPE {
            anyhow::bail!("proof type must be '{PROOF_TYPE}'");
        }
        let allowed: &[&str] = if proof.is_witness() {
            &[EDDSA_JCS_2022, EDDSA_RDFC_2022, BITCOIN_ORDINALS_2024]
        } else {
            &[EDDSA_JCS_2022, EDDSA_RDFC_2022]
        };
        if !allowed.contains(&proof.cryptosuite.as_str()) {
            anyhow::bail!("unsupported cryptosuite '{}'", proof.cryptosuite);
        }
        if proof.verification_method.is_empty() {
            anyhow::bail!("proof must carry a verification method");
        }
        if proof.proof_purpose.is_empty() {
            anyhow::bail!("proof must carry a proof purpose");
        }
        if !proof.has_multibase_value() {
            anyhow::bail!("proof value must be multibase-encoded ('z' or 'u')");
        }
        Ok(())
    }
}

/// Verification outcome for a single event.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReport {
    /// Position of the event in the log.
    pub index: usize,

    /// Kind of the event.
    #[serde(rename = "type")]
    pub kind: EventKind,

    /// All proofs on the event passed the verifier.
    pub proof_valid: bool,

    /// The event chains to the digest of its predecessor.
    pub chain_valid: bool,

    /// Diagnostics for this event.
    pub errors: Vec<String>,
}

/// Verification outcome for a whole log.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    /// Every event passed both proof and chain checks.
    pub verified: bool,

    /// All diagnostics, log-level first, then per-event.
    pub errors: Vec<String>,

    /// Per-event outcomes.
    pub events: Vec<EventReport>,
}

/// Verify a log with the structural default verifier.
#[must_use]
pub fn verify_log(log: &EventLog) -> VerificationReport {
    verify_log_with(log, &StructuralVerifier)
}

/// Verify a log with a caller-supplied proof verifier.
#[must_use]
pub fn verify_log_with(log: &EventLog, verifier: &impl ProofVerifier) -> VerificationReport {
    if log.events.is_empty() {
        return VerificationReport {
            verified: false,
            errors: vec!["log has no events".to_string()],
            events: Vec::new(),
        };
    }

    let mut events = Vec::with_capacity(log.events.len());
    let mut verified = true;

    for (index, entry) in log.events.iter().enumerate() {
        let mut errors = Vec::new();
        let mut proof_valid = true;

        if entry.proof.is_empty() {
            proof_valid = false;
            errors.push("no proofs".to_string());
        }

        let canonical = match entry.signing_input() {
            Ok(bytes) => bytes,
            Err(e) => {
                proof_valid = false;
                errors.push(format!("canonicalization failed: {e}"));
                Vec::new()
            }
        };
        for (position, proof) in entry.proof.iter().enumerate() {
            if let Err(e) = verifier.verify(proof, &canonical) {
                proof_valid = false;
                errors.push(format!("proof {position}: {e}"));
            }
        }

        let mut chain_valid = true;
        if index == 0 {
            if entry.kind != EventKind::Create {
                chain_valid = false;
                errors.push("first event must be a create event".to_string());
            }
            if entry.previous_event.is_some() {
                chain_valid = false;
                errors.push("first event must not reference a previous event".to_string());
            }
        } else {
            let predecessor = &log.events[index - 1];
            if predecessor.kind == EventKind::Deactivate {
                chain_valid = false;
                errors.push("event appended after deactivation".to_string());
            }
            match predecessor.digest() {
                Ok(expected) => {
                    if entry.previous_event.as_deref() != Some(expected.as_str()) {
                        chain_valid = false;
                        errors.push(
                            "previousEvent does not match the digest of the preceding entry"
                                .to_string(),
                        );
                    }
                }
                Err(e) => {
                    chain_valid = false;
                    errors.push(format!("predecessor digest failed: {e}"));
                }
            }
        }

        if !(proof_valid && chain_valid) {
            verified = false;
        }
        events.push(EventReport { index, kind: entry.kind, proof_valid, chain_valid, errors });
    }

    let errors = events
        .iter()
        .flat_map(|e| e.errors.iter().map(move |msg| format!("event {}: {msg}", e.index)))
        .collect();

    VerificationReport { verified, errors, events }
}
