//! Deterministic DID derivation for layer migrations.

const MAX_WEBVH_ID: usize = 32;
const MAX_BTCO_ID: usize = 64;

/// Derive a `did:webvh` identifier from a source DID and hosting domain.
///
/// The method-specific identifier of the source DID is reduced to
/// alphanumerics and truncated to 32 characters.
#[must_use]
pub fn webvh_did(source_did: &str, domain: &str) -> String {
    let msid = source_did.splitn(3, ':').nth(2).unwrap_or(source_did);
    let id: String =
        msid.chars().filter(char::is_ascii_alphanumeric).take(MAX_WEBVH_ID).collect();
    format!("did:webvh:{domain}:{id}")
}

/// Derive a `did:btco` identifier from inscription metadata.
///
/// Prefers the sanitized inscription id, falls back to the sanitized
/// txid, and as a last resort reduces the source DID with a stable
/// non-cryptographic hash.
#[must_use]
pub fn btco_did(inscription_id: Option<&str>, txid: Option<&str>, source_did: &str) -> String {
    let id = inscription_id
        .map(sanitize)
        .filter(|s| !s.is_empty())
        .or_else(|| txid.map(sanitize).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| fallback_id(source_did));
    format!("did:btco:{id}")
}

fn sanitize(id: &str) -> String {
    id.chars().filter(char::is_ascii_alphanumeric).take(MAX_BTCO_ID).collect()
}

// Stable 32-bit FNV-1a of the source DID, base36-encoded. Collisions are
// possible; this path only runs when no inscription metadata exists.
fn fallback_id(source_did: &str) -> String {
    let mut h: u32 = 0x811c_9dc5;
    for b in source_did.bytes() {
        h ^= u32::from(b);
        h = h.wrapping_mul(0x0100_0193);
    }
    to_base36(h)
}

fn to_base36(mut n: u32) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webvh_from_peer() {
        let did = webvh_did("did:peer:4zQmAbCdEfGh", "gallery.example.com");
        assert_eq!(did, "did:webvh:gallery.example.com:4zQmAbCdEfGh");
    }

    #[test]
    fn webvh_strips_and_truncates() {
        let long = format!("did:peer:4z.Qm-{}", "a".repeat(64));
        let did = webvh_did(&long, "example.com");
        let id = did.rsplit(':').next().expect("should have id");
        assert_eq!(id.len(), MAX_WEBVH_ID);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn btco_prefers_inscription_id() {
        let did = btco_did(Some("abc123i0"), Some("abc123"), "did:webvh:example.com:x");
        assert_eq!(did, "did:btco:abc123i0");
    }

    #[test]
    fn btco_falls_back_to_txid() {
        let did = btco_did(None, Some("abc123"), "did:webvh:example.com:x");
        assert_eq!(did, "did:btco:abc123");
    }

    #[test]
    fn btco_hash_fallback_is_stable() {
        let a = btco_did(None, None, "did:webvh:example.com:x");
        let b = btco_did(None, None, "did:webvh:example.com:x");
        assert_eq!(a, b);
        assert!(a.starts_with("did:btco:"));
        let id = a.rsplit(':').next().expect("should have id");
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
