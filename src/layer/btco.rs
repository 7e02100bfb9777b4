//! Migration to the blockchain-anchored layer.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use super::did::btco_did;
use super::state::{AssetState, resolve_state};
use super::Layer;
use crate::event::{UpdateBuilder, iso_millis, validate_witness_proof};
use crate::log::EventLog;
use crate::proof::BITCOIN_ORDINALS_2024;
use crate::provider::{Signer, Witness};
use crate::{Error, Result};

/// Manager for the `btco` layer.
///
/// Performs `webvh → btco` migrations. The Bitcoin witness is mandatory:
/// the migration entry is signed by the controller, its digest inscribed
/// by the witness, and the entry enriched with the anchoring metadata
/// before the witness proof is attached.
pub struct BtcoManager;

impl BtcoManager {
    /// Migrate a webvh-layer log to the btco layer.
    ///
    /// # Errors
    ///
    /// Will fail with `EmptyLog`/`Sealed` on an unusable log,
    /// `IllegalTransition` if the log is not at the webvh layer
    /// (direct `peer → btco` migration is forbidden), and
    /// `InvalidWitnessProof` if the witness proof lacks the
    /// `bitcoin-ordinals-2024` cryptosuite or its anchoring fields.
    pub async fn migrate<S: Signer, W: Witness>(
        log: &EventLog, signer: &S, witness: &W,
    ) -> Result<EventLog> {
        Self::migrate_at(log, signer, witness, Utc::now()).await
    }

    /// [`Self::migrate`] with an injected migration timestamp.
    ///
    /// # Errors
    ///
    /// As for [`Self::migrate`].
    pub async fn migrate_at<S: Signer, W: Witness>(
        log: &EventLog, signer: &S, witness: &W, at: DateTime<Utc>,
    ) -> Result<EventLog> {
        if log.events.is_empty() {
            return Err(Error::EmptyLog);
        }
        if log.is_sealed() {
            return Err(Error::Sealed);
        }
        let state = resolve_state(log)?;
        if !state.layer.can_migrate_to(Layer::Btco) {
            return Err(Error::IllegalTransition { from: state.layer, to: Layer::Btco });
        }
        let source_did = state.did;

        // Tentative migration entry: the target DID is unknown until the
        // witness inscribes the attestation.
        let tentative = json!({
            "sourceDid": source_did.as_str(),
            "targetDid": "",
            "layer": Layer::Btco,
            "migratedAt": iso_millis(Some(at)),
        });
        let mut migrated =
            UpdateBuilder::from(log, tentative)?.timestamp(at).signer(signer).build().await?;

        let last = migrated.events.len() - 1;
        let mut entry = migrated.events[last].clone();
        let digest = entry.digest()?;

        let proof = witness.witness(&digest).await?;
        validate_witness_proof(&proof)?;
        if proof.cryptosuite != BITCOIN_ORDINALS_2024 {
            return Err(Error::InvalidWitnessProof(format!(
                "cryptosuite must be `{BITCOIN_ORDINALS_2024}`, found `{}`",
                proof.cryptosuite
            )));
        }
        if proof.txid.is_none() && proof.inscription_id.is_none() {
            return Err(Error::InvalidWitnessProof(
                "witness proof carries no anchoring metadata".to_string(),
            ));
        }

        let target_did =
            btco_did(proof.inscription_id.as_deref(), proof.txid.as_deref(), &source_did);

        // Enrich the migration payload with the anchoring metadata.
        entry.data.insert("targetDid".to_string(), Value::String(target_did));
        if let Some(txid) = &proof.txid {
            entry.data.insert("txid".to_string(), Value::String(txid.clone()));
        }
        if let Some(id) = &proof.inscription_id {
            entry.data.insert("inscriptionId".to_string(), Value::String(id.clone()));
        }
        if let Some(satoshi) = &proof.satoshi {
            entry.data.insert("satoshi".to_string(), Value::String(satoshi.clone()));
        }
        if let Some(height) = proof.block_height {
            entry.data.insert("blockHeight".to_string(), json!(height));
        }
        entry.proof.push(proof);

        migrated.events[last] = entry;
        Ok(migrated)
    }

    /// Replay the log into its current asset state.
    ///
    /// # Errors
    ///
    /// Will fail if the log is empty or does not start with a create
    /// event.
    pub fn current_state(log: &EventLog) -> Result<AssetState> {
        resolve_state(log)
    }
}
