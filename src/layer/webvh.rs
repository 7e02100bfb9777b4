//! Migration to the web-hosted layer.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::json;

use super::did::webvh_did;
use super::state::{AssetState, resolve_state};
use super::Layer;
use crate::event::{UpdateBuilder, iso_millis, witness_entry};
use crate::log::EventLog;
use crate::provider::{Signer, Witness};
use crate::{Error, Result};

/// Empty witness list for unwitnessed migrations.
pub const NO_WITNESSES: &[crate::witness::HttpWitness] = &[];

// Hostname shape accepted for webvh domains.
const DOMAIN_PATTERN: &str = r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$";

/// Manager for the `webvh` layer.
///
/// Validates the hosting domain at construction and performs
/// `peer → webvh` migrations, applying configured witnesses in order.
pub struct WebvhManager {
    domain: String,
}

impl WebvhManager {
    /// Create a manager for the given hosting domain.
    ///
    /// # Errors
    ///
    /// Will fail with `InvalidDomain` when the domain is not a plausible
    /// hostname.
    pub fn new(domain: &str) -> Result<Self> {
        let pattern =
            Regex::new(DOMAIN_PATTERN).map_err(|e| Error::InvalidDomain(e.to_string()))?;
        if !pattern.is_match(domain) {
            return Err(Error::InvalidDomain(domain.to_string()));
        }
        Ok(Self { domain: domain.to_string() })
    }

    /// The configured hosting domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Migrate a peer-layer log to the webvh layer.
    ///
    /// Appends a migration update rebinding the asset to a
    /// `did:webvh:<domain>:…` identifier derived from the source DID,
    /// then applies the witnesses in the order given. Witnesses are
    /// optional at this layer; pass [`NO_WITNESSES`] to skip them.
    ///
    /// # Errors
    ///
    /// Will fail with `EmptyLog`/`Sealed` on an unusable log,
    /// `IllegalTransition` if the log is not at the peer layer, and will
    /// propagate signer and witness failures. A failed witness aborts the
    /// migration; no partially witnessed log is returned.
    pub async fn migrate<S: Signer, W: Witness>(
        &self, log: &EventLog, signer: &S, witnesses: &[W],
    ) -> Result<EventLog> {
        self.migrate_at(log, signer, witnesses, Utc::now()).await
    }

    /// [`Self::migrate`] with an injected migration timestamp.
    ///
    /// # Errors
    ///
    /// As for [`Self::migrate`].
    pub async fn migrate_at<S: Signer, W: Witness>(
        &self, log: &EventLog, signer: &S, witnesses: &[W], at: DateTime<Utc>,
    ) -> Result<EventLog> {
        if log.events.is_empty() {
            return Err(Error::EmptyLog);
        }
        if log.is_sealed() {
            return Err(Error::Sealed);
        }
        let state = resolve_state(log)?;
        if !state.layer.can_migrate_to(Layer::Webvh) {
            return Err(Error::IllegalTransition { from: state.layer, to: Layer::Webvh });
        }

        let source_did = state.did;
        let target_did = webvh_did(&source_did, &self.domain);
        let data = json!({
            "sourceDid": source_did,
            "targetDid": target_did,
            "layer": Layer::Webvh,
            "domain": self.domain,
            "migratedAt": iso_millis(Some(at)),
        });
        let mut migrated =
            UpdateBuilder::from(log, data)?.timestamp(at).signer(signer).build().await?;

        let last = migrated.events.len() - 1;
        let mut entry = migrated.events[last].clone();
        for witness in witnesses {
            entry = witness_entry(&entry, witness).await?;
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_validation() {
        assert!(WebvhManager::new("gallery.example.com").is_ok());
        assert!(WebvhManager::new("example.com").is_ok());
        assert!(matches!(WebvhManager::new(""), Err(Error::InvalidDomain(_))));
        assert!(matches!(WebvhManager::new("no spaces.com"), Err(Error::InvalidDomain(_))));
        assert!(matches!(WebvhManager::new("localhost"), Err(Error::InvalidDomain(_))));
        assert!(matches!(WebvhManager::new("https://example.com"), Err(Error::InvalidDomain(_))));
    }
}
