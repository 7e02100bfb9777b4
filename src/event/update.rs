//! Update operation: append a provenance change to an existing log.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{RESOURCE_UPDATED, WithSigner, WithoutSigner, iso_millis, normalize, require_jcs,
    validate_proof};
use crate::log::{EventEntry, EventKind, EventLog};
use crate::provider::Signer;
use crate::{Error, Result};

/// Builder for an update entry.
pub struct UpdateBuilder<S> {
    log: EventLog,
    data: Value,
    at: Option<DateTime<Utc>>,
    signer: S,
}

impl UpdateBuilder<WithoutSigner> {
    /// Start an update against an existing log.
    ///
    /// # Errors
    ///
    /// Will fail with `EmptyLog` if the log has no events and `Sealed` if
    /// its last entry is a deactivation.
    pub fn from(log: &EventLog, data: Value) -> Result<Self> {
        if log.events.is_empty() {
            return Err(Error::EmptyLog);
        }
        if log.is_sealed() {
            return Err(Error::Sealed);
        }
        Ok(Self { log: log.clone(), data, at: None, signer: WithoutSigner })
    }

    /// Attach the controller's signer.
    #[must_use]
    pub fn signer<S: Signer>(self, signer: &S) -> UpdateBuilder<WithSigner<'_, S>> {
        UpdateBuilder { log: self.log, data: self.data, at: self.at, signer: WithSigner(signer) }
    }
}

impl<S> UpdateBuilder<S> {
    /// Override the `updatedAt` timestamp. Defaults to now.
    #[must_use]
    pub const fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.at = Some(at);
        self
    }
}

impl<S: Signer> UpdateBuilder<WithSigner<'_, S>> {
    /// Build a new log with the update appended. `previousLog` is
    /// preserved.
    ///
    /// # Errors
    ///
    /// Will fail if the last entry cannot be digested, the signer fails,
    /// the proof is structurally incomplete (`InvalidProof`), or the
    /// proof does not use `eddsa-jcs-2022` (`CryptosuiteRequired`).
    pub async fn build(self) -> Result<EventLog> {
        let last = self.log.last().ok_or(Error::EmptyLog)?;
        let previous_event = last.digest()?;

        let mut data = normalize(self.data, RESOURCE_UPDATED);
        data.insert("updatedAt".to_string(), Value::String(iso_millis(self.at)));

        let entry = EventEntry {
            kind: EventKind::Update,
            data,
            previous_event: Some(previous_event),
            proof: Vec::new(),
        };

        let proof = self.signer.0.sign(&entry.signing_input()?).await?;
        validate_proof(&proof)?;
        require_jcs(&proof)?;

        self.log.append(EventEntry { proof: vec![proof], ..entry })
    }
}
