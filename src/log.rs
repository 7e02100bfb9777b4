//! # Event Log Primitives
//!
//! An event log is an append-only, hash-chained sequence of signed events.
//! Each entry is sealed by a content-addressed digest of its predecessor
//! and carries one or more data integrity proofs, the first being the
//! controller's.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::proof::Proof;
use crate::{Error, Result, canonical, hash};

/// Kind of an event log entry.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// First entry of a log.
    #[default]
    Create,

    /// A provenance change, including layer migrations.
    Update,

    /// Terminal sealing entry.
    Deactivate,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Deactivate => write!(f, "deactivate"),
        }
    }
}

/// An entry in an event log.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventEntry {
    /// The kind of event.
    #[serde(rename = "type")]
    pub kind: EventKind,

    /// Event payload. Its shape varies by kind.
    pub data: Map<String, Value>,

    /// Digest of the canonical bytes of the immediately preceding entry.
    /// Absent only on the first entry of a log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_event: Option<String>,

    /// Attached proofs. The first is the controller's; any subsequent
    /// proofs are witness countersignatures.
    ///
    /// Skipped when empty so the unsigned form of an entry is obtained by
    /// clearing this field before canonicalization.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub proof: Vec<Proof>,
}

impl EventEntry {
    /// Multibase digest of the canonical bytes of the full (signed) entry.
    ///
    /// This is the value referenced by the next entry's `previousEvent`
    /// and the value handed to witnesses.
    ///
    /// # Errors
    ///
    /// Will return an error if the entry fails serialization.
    pub fn digest(&self) -> Result<String> {
        let bytes = canonical::to_vec(self)?;
        Ok(hash::digest(&bytes))
    }

    /// Canonical bytes of the entry without its proofs.
    ///
    /// Signers receive these bytes and proof verification recomputes them.
    ///
    /// # Errors
    ///
    /// Will return an error if the entry fails serialization.
    pub fn signing_input(&self) -> Result<Vec<u8>> {
        let mut unsigned = self.clone();
        unsigned.proof = Vec::new();
        canonical::to_vec(&unsigned)
    }
}

/// An append-only, hash-chained event log.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventLog {
    /// Ordered event entries. The first must be a `create` event.
    pub events: Vec<EventEntry>,

    /// Digest of a prior log chunk, for long histories split across
    /// multiple logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_log: Option<String>,
}

impl EventLog {
    /// The last entry of the log.
    #[must_use]
    pub fn last(&self) -> Option<&EventEntry> {
        self.events.last()
    }

    /// `true` once a `deactivate` entry has been appended.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.events.last().is_some_and(|e| e.kind == EventKind::Deactivate)
    }

    /// Append an entry, returning a new log. The input log is unchanged.
    ///
    /// # Errors
    ///
    /// Will return an error if the log is sealed, the entry carries no
    /// proof, a non-create entry would start the log, or the entry does
    /// not chain to the digest of the current last entry.
    pub fn append(&self, entry: EventEntry) -> Result<Self> {
        if entry.proof.is_empty() {
            return Err(Error::MissingControllerProof);
        }
        if self.is_sealed() {
            return Err(Error::Sealed);
        }
        if let Some(last) = self.events.last() {
            if entry.kind == EventKind::Create {
                return Err(Error::MalformedLog(
                    "create entry cannot be appended to a non-empty log".to_string(),
                ));
            }
            let expected = last.digest()?;
            if entry.previous_event.as_deref() != Some(expected.as_str()) {
                return Err(Error::MalformedLog(
                    "entry does not chain to the digest of the last event".to_string(),
                ));
            }
        } else {
            if entry.kind != EventKind::Create {
                return Err(Error::NotCreateFirst);
            }
            if entry.previous_event.is_some() {
                return Err(Error::MalformedLog(
                    "create entry must not reference a previous event".to_string(),
                ));
            }
        }

        let mut log = self.clone();
        log.events.push(entry);
        Ok(log)
    }
}
