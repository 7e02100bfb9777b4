//! Canonical JSON serialization.
//!
//! A single canonicalization (JSON Canonicalization Scheme, RFC 8785) is
//! used everywhere bytes matter: hashing entries, constructing signing
//! input, and the JSON wire form. Object members are emitted in sorted key
//! order at every depth, arrays preserve order, numbers use their shortest
//! round-trip form, and strings use standard JSON escaping.

use serde::Serialize;

use crate::{Error, Result};

/// Serialize a value to canonical JSON text.
///
/// # Errors
///
/// Will return an error if the value cannot be serialized, including when
/// it contains a non-finite number.
pub fn to_string<T: Serialize>(value: &T) -> Result<String> {
    serde_json_canonicalizer::to_string(value).map_err(|e| Error::Serialization(e.to_string()))
}

/// Serialize a value to canonical JSON bytes (UTF-8).
///
/// # Errors
///
/// Will return an error if the value cannot be serialized.
pub fn to_vec<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(to_string(value)?.into_bytes())
}
