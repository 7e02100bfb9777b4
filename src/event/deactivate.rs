//! Deactivate operation: seal an event log.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::{WithSigner, WithoutSigner, iso_millis, validate_proof};
use crate::log::{EventEntry, EventKind, EventLog};
use crate::provider::Signer;
use crate::{Error, Result};

/// Builder for the terminal deactivation entry.
pub struct DeactivateBuilder<S> {
    log: EventLog,
    reason: String,
    at: Option<DateTime<Utc>>,
    signer: S,
}

impl DeactivateBuilder<WithoutSigner> {
    /// Start a deactivation against an existing log.
    ///
    /// # Errors
    ///
    /// Will fail with `EmptyLog` if the log has no events and
    /// `AlreadyDeactivated` if it is already sealed.
    pub fn from(log: &EventLog, reason: &str) -> Result<Self> {
        if log.events.is_empty() {
            return Err(Error::EmptyLog);
        }
        if log.is_sealed() {
            return Err(Error::AlreadyDeactivated);
        }
        Ok(Self { log: log.clone(), reason: reason.to_string(), at: None, signer: WithoutSigner })
    }

    /// Attach the controller's signer.
    #[must_use]
    pub fn signer<S: Signer>(self, signer: &S) -> DeactivateBuilder<WithSigner<'_, S>> {
        DeactivateBuilder {
            log: self.log,
            reason: self.reason,
            at: self.at,
            signer: WithSigner(signer),
        }
    }
}

impl<S> DeactivateBuilder<S> {
    /// Override the `deactivatedAt` timestamp. Defaults to now.
    #[must_use]
    pub const fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.at = Some(at);
        self
    }
}

impl<S: Signer> DeactivateBuilder<WithSigner<'_, S>> {
    /// Build a new, sealed log.
    ///
    /// Deactivation is a sealing rather than a provenance-change event,
    /// so only structural proof validation applies; the
    /// required-cryptosuite check is relaxed.
    ///
    /// # Errors
    ///
    /// Will fail if the last entry cannot be digested, the signer fails,
    /// or the proof is structurally incomplete (`InvalidProof`).
    pub async fn build(self) -> Result<EventLog> {
        let last = self.log.last().ok_or(Error::EmptyLog)?;
        let previous_event = last.digest()?;

        let mut data = Map::new();
        data.insert("reason".to_string(), Value::String(self.reason));
        data.insert("deactivatedAt".to_string(), Value::String(iso_millis(self.at)));

        let entry = EventEntry {
            kind: EventKind::Deactivate,
            data,
            previous_event: Some(previous_event),
            proof: Vec::new(),
        };

        let proof = self.signer.0.sign(&entry.signing_input()?).await?;
        validate_proof(&proof)?;

        self.log.append(EventEntry { proof: vec![proof], ..entry })
    }
}
