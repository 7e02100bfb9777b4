//! Peer-layer lifecycle.

use serde_json::{Value, json};

use super::state::{AssetState, resolve_state};
use crate::event::{CreateBuilder, DeactivateBuilder, UpdateBuilder};
use crate::log::EventLog;
use crate::provider::Signer;
use crate::reference::ExternalReference;
use crate::{Error, Result};

/// Lifecycle manager for logs anchored at the local peer layer.
///
/// Every log starts here. Promotion to the web-hosted layer is handled by
/// [`WebvhManager`](super::WebvhManager).
pub struct PeerManager;

impl PeerManager {
    /// Start a new log at the peer layer.
    ///
    /// # Errors
    ///
    /// Propagates creation failures; see [`CreateBuilder::build`].
    pub async fn create(data: Value, signer: &impl Signer) -> Result<EventLog> {
        CreateBuilder::new(data).signer(signer).build().await
    }

    /// Append an update.
    ///
    /// # Errors
    ///
    /// Propagates update failures; see [`UpdateBuilder::build`].
    pub async fn update(log: &EventLog, data: Value, signer: &impl Signer) -> Result<EventLog> {
        UpdateBuilder::from(log, data)?.signer(signer).build().await
    }

    /// Bind an external resource to the asset.
    ///
    /// Appends an update whose payload carries the asset's resource list
    /// with the reference added.
    ///
    /// # Errors
    ///
    /// Will fail if the current state cannot be derived or the update
    /// cannot be appended.
    pub async fn add_resource(
        log: &EventLog, reference: &ExternalReference, signer: &impl Signer,
    ) -> Result<EventLog> {
        let state = resolve_state(log)?;
        let mut resources = state.resources;
        resources.push(
            serde_json::to_value(reference).map_err(|e| Error::Serialization(e.to_string()))?,
        );
        Self::update(log, json!({"resources": resources}), signer).await
    }

    /// Seal the log.
    ///
    /// # Errors
    ///
    /// Propagates deactivation failures; see [`DeactivateBuilder::build`].
    pub async fn deactivate(
        log: &EventLog, reason: &str, signer: &impl Signer,
    ) -> Result<EventLog> {
        DeactivateBuilder::from(log, reason)?.signer(signer).build().await
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
