//! # Content Digests
//!
//! SHA-256 digests over canonical bytes. [`sha256_digest`] is the only
//! sanctioned way to produce a [`ContentDigest`]: its signature requires
//! [`CanonicalBytes`], not a raw slice, so every digest in the ledger was
//! computed from properly canonicalized data.

use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// A 32-byte content digest, rendered as 64 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Access the raw 32-byte digest value.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Return the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// Pure and deterministic: the same canonical bytes always produce the same
/// digest.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    ContentDigest(hasher.finalize().into())
}
