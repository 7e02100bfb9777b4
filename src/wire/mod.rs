//! # Wire Formats
//!
//! Round-trippable JSON and CBOR codecs over the event log data model.
//! Both formats are deterministic: JSON uses the canonical serializer and
//! CBOR is emitted with sorted map keys, so re-serializing a parsed log
//! reproduces the input byte-for-byte.

pub mod cbor;
pub mod json;

use serde_json::Value;

use crate::{Error, Result};

const EVENT_TYPES: [&str; 3] = ["create", "update", "deactivate"];
const PROOF_FIELDS: [&str; 6] =
    ["type", "cryptosuite", "created", "verificationMethod", "proofPurpose", "proofValue"];

// Schema validation shared by the JSON and CBOR parsers. Violations map
// to `MalformedLog` before any typed value is constructed.
pub(crate) fn validate_log(value: &Value) -> Result<()> {
    let Value::Object(log) = value else {
        return Err(Error::MalformedLog("log must be an object".to_string()));
    };
    let Some(events) = log.get("events") else {
        return Err(Error::MalformedLog("log must carry an events array".to_string()));
    };
    let Value::Array(events) = events else {
        return Err(Error::MalformedLog("events must be an array".to_string()));
    };
    for (index, entry) in events.iter().enumerate() {
        validate_entry(index, entry)?;
    }
    if let Some(previous) = log.get("previousLog") {
        if !previous.is_string() {
            return Err(Error::MalformedLog("previousLog must be a string".to_string()));
        }
    }
    Ok(())
}

fn validate_entry(index: usize, entry: &Value) -> Result<()> {
    let Value::Object(entry) = entry else {
        return Err(Error::MalformedLog(format!("event {index} must be an object")));
    };
    match entry.get("type") {
        Some(Value::String(kind)) if EVENT_TYPES.contains(&kind.as_str()) => {}
        _ => {
            return Err(Error::MalformedLog(format!(
                "event {index} must have a type of create, update or deactivate"
            )));
        }
    }
    if !entry.get("data").is_some_and(Value::is_object) {
        return Err(Error::MalformedLog(format!("event {index} must carry a data object")));
    }
    if let Some(previous) = entry.get("previousEvent") {
        if !previous.is_string() {
            return Err(Error::MalformedLog(format!(
                "event {index} previousEvent must be a string"
            )));
        }
    }
    let Some(Value::Array(proofs)) = entry.get("proof") else {
        return Err(Error::MalformedLog(format!("event {index} must carry a proof array")));
    };
    for (position, proof) in proofs.iter().enumerate() {
        validate_proof(index, position, proof)?;
    }
    Ok(())
}

fn validate_proof(index: usize, position: usize, proof: &Value) -> Result<()> {
    let Value::Object(proof) = proof else {
        return Err(Error::MalformedLog(format!(
            "event {index} proof {position} must be an object"
        )));
    };
    for field in PROOF_FIELDS {
        match proof.get(field) {
            Some(Value::String(s)) if !s.is_empty() => {}
            _ => {
                return Err(Error::MalformedLog(format!(
                    "event {index} proof {position} must carry a {field} string"
                )));
            }
        }
    }
    if let Some(witnessed_at) = proof.get("witnessedAt") {
        if !witnessed_at.is_string() {
            return Err(Error::MalformedLog(format!(
                "event {index} proof {position} witnessedAt must be a string"
            )));
        }
    }
    Ok(())
}
