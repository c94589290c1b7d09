//! Content Hash Value Object
//!
//! A validated, immutable hash representing the content of a file.
//! Used to verify bundle entries and to fingerprint generated inputs.

use std::fmt;

use sha2::{Digest, Sha256};

/// Content hash value object
///
/// Wraps a lowercase hex SHA-256 digest. `Display` adds the `sha256:`
/// prefix; `hex()` returns the bare digest as stored in bundle metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Prefix for SHA-256 hashes
    pub const PREFIX: &'static str = "sha256:";

    /// Wrap an existing hex digest (with or without prefix)
    pub fn new(raw_hash: &str) -> Self {
        Self(
            raw_hash
                .strip_prefix(Self::PREFIX)
                .unwrap_or(raw_hash)
                .to_ascii_lowercase(),
        )
    }

    /// Compute SHA-256 of raw bytes
    pub fn from_bytes(content: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(content)))
    }

    /// Compute SHA-256 of text content
    pub fn from_content(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    /// Get just the hex digest
    pub fn hex(&self) -> &str {
        &self.0
    }

    /// Check if this hash matches a raw string (with or without prefix)
    pub fn matches_str(&self, s: &str) -> bool {
        *self == Self::new(s)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl From<&str> for ContentHash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
