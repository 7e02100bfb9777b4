//! # External References
//!
//! Content-addressed references to resources held outside the log. The
//! core never fetches the referenced content; it only binds a digest to
//! optional location hints.

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq as _;

use crate::hash;

/// A content-addressed reference to an out-of-band resource.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalReference {
    /// Multibase digest of the referenced content.
    pub digest_multibase: String,

    /// Media type of the referenced content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// Candidate locations for the content, in preference order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Vec<String>>,
}

impl ExternalReference {
    /// Build a reference for the given content.
    ///
    /// The `url` field is included only when `urls` is non-empty.
    #[must_use]
    pub fn new(content: &[u8], media_type: Option<&str>, urls: &[String]) -> Self {
        Self {
            digest_multibase: hash::digest(content),
            media_type: media_type.map(ToString::to_string),
            url: if urls.is_empty() { None } else { Some(urls.to_vec()) },
        }
    }

    /// Check the reference digest against content.
    ///
    /// The comparison is constant-time over the decoded digest bytes.
    /// Returns `false` on any decode or format error.
    #[must_use]
    pub fn verify(&self, content: &[u8]) -> bool {
        let Ok(expected) = hash::decode(&self.digest_multibase) else {
            return false;
        };
        let Ok(actual) = hash::decode(&hash::digest(content)) else {
            return false;
        };
        expected.ct_eq(&actual).into()
    }
}
