//! CBOR wire format.
//!
//! The CBOR form is the same structural model as the JSON form,
//! serialized through `serde_json::Value` so that map keys are sorted and
//! the encoding is deterministic.

use serde_json::Value;

use super::validate_log;
use crate::log::EventLog;
use crate::{Error, Result};

/// Serialize a log to deterministic CBOR bytes.
///
/// # Errors
///
/// Will return an error if the log fails serialization.
pub fn to_vec(log: &EventLog) -> Result<Vec<u8>> {
    let value = serde_json::to_value(log).map_err(|e| Error::Serialization(e.to_string()))?;
    let mut buf = Vec::new();
    ciborium::into_writer(&value, &mut buf).map_err(|e| Error::Serialization(e.to_string()))?;
    Ok(buf)
}

/// Parse and validate a CBOR event log.
///
/// # Errors
///
/// Will fail with `MalformedLog` on invalid CBOR or any schema
/// violation.
pub fn from_slice(bytes: &[u8]) -> Result<EventLog> {
    let value: Value = ciborium::from_reader(bytes)
        .map_err(|e| Error::MalformedLog(format!("invalid CBOR: {e}")))?;
    validate_log(&value)?;
    serde_json::from_value(value).map_err(|e| Error::MalformedLog(e.to_string()))
}
