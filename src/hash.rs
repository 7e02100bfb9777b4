//! Content digests for event log entries and external references.
//!
//! Digests are SHA-256 over canonical bytes, multibase-encoded as base64url
//! without padding (prefix `u`).

use multibase::Base;
use sha2::{Digest as _, Sha256};

use crate::{Error, Result};

/// Number of bytes in a SHA-256 digest.
pub const DIGEST_LEN: usize = 32;

/// Compute the multibase digest of a byte sequence.
#[must_use]
pub fn digest(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    multibase::encode(Base::Base64Url, digest.as_slice())
}

/// Check a byte sequence against a multibase digest string.
#[must_use]
pub fn verify(bytes: &[u8], expected: &str) -> bool {
    digest(bytes) == expected
}

/// Decode a multibase digest string to raw digest bytes.
///
/// # Errors
///
/// Will return an error if the string does not carry the base64url (`u`)
/// prefix, cannot be decoded, or does not decode to exactly 32 bytes.
pub fn decode(digest: &str) -> Result<Vec<u8>> {
    let (base, bytes) = multibase::decode(digest)
        .map_err(|e| Error::MalformedLog(format!("invalid digest encoding: {e}")))?;
    if base != Base::Base64Url {
        return Err(Error::MalformedLog(
            "digest must be base64url-encoded (prefix 'u')".to_string(),
        ));
    }
    if bytes.len() != DIGEST_LEN {
        return Err(Error::MalformedLog(format!("digest must decode to {DIGEST_LEN} bytes")));
    }
    Ok(bytes)
}
