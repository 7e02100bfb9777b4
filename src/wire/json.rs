//! JSON wire format.
//!
//! Serialization goes through the canonical serializer so member order on
//! the wire matches the form used for hashing.

use serde_json::Value;

use super::validate_log;
use crate::log::EventLog;
use crate::{Error, Result, canonical};

/// Serialize a log to canonical JSON text.
///
/// # Errors
///
/// Will return an error if the log fails serialization.
pub fn to_string(log: &EventLog) -> Result<String> {
    canonical::to_string(log)
}

/// Parse and validate a JSON event log.
///
/// # Errors
///
/// Will fail with `MalformedLog` on invalid JSON or any schema
/// violation.
pub fn from_str(text: &str) -> Result<EventLog> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| Error::MalformedLog(format!("invalid JSON: {e}")))?;
    validate_log(&value)?;
    serde_json::from_value(value).map_err(|e| Error::MalformedLog(e.to_string()))
}
