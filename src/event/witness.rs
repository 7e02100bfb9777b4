//! Witness attachment: countersign an already-signed entry.

use crate::log::EventEntry;
use crate::proof::Proof;
use crate::provider::Witness;
use crate::{Error, Result};

/// Attach a witness countersignature to a signed entry.
///
/// The witness receives the multibase digest of the full entry, proofs
/// included. The input entry is not mutated; a new entry with the witness
/// proof appended is returned.
///
/// # Errors
///
/// Will fail with `MissingControllerProof` if the entry carries no
/// proofs, propagate witness capability failures, and fail with
/// `InvalidWitnessProof` if the returned proof is structurally incomplete
/// or lacks `witnessedAt`.
pub async fn witness_entry(entry: &EventEntry, witness: &impl Witness) -> Result<EventEntry> {
    if entry.proof.is_empty() {
        return Err(Error::MissingControllerProof);
    }

    let digest = entry.digest()?;
    let proof = witness.witness(&digest).await?;
    validate_witness_proof(&proof)?;

    let mut witnessed = entry.clone();
    witnessed.proof.push(proof);
    Ok(witnessed)
}

// Structural validation applied to every witness proof.
pub(crate) fn validate_witness_proof(proof: &Proof) -> Result<()> {
    if proof.type_.is_empty() || proof.cryptosuite.is_empty() || proof.proof_value.is_empty() {
        return Err(Error::InvalidWitnessProof(
            "witness proof must carry type, cryptosuite and proofValue".to_string(),
        ));
    }
    if proof.witnessed_at.is_none() {
        return Err(Error::InvalidWitnessProof(
            "witness proof must carry witnessedAt".to_string(),
        ));
    }
    Ok(())
}
