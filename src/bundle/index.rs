//! Bundle index
//!
//! The last entry of every bundle. Lists each file with its size, mode and
//! SHA-256 so `unpack` can prove it read the whole archive back intact.

use serde::{Deserialize, Serialize};

/// Reserved name of the index entry at the archive root
pub const INDEX_ENTRY_NAME: &str = ".frontgen-bundle.json";

const INDEX_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub path: String,
    pub size: u64,
    pub mode: u32,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleIndex {
    pub version: u32,
    pub files: Vec<IndexEntry>,
}

impl BundleIndex {
    pub fn new(files: Vec<IndexEntry>) -> Self {
        Self {
            version: INDEX_VERSION,
            files,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.version == INDEX_VERSION
    }
}
