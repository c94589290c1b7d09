//! Production bundle packing
//!
//! A bundle is a single tar archive that snapshots a directory tree: every
//! regular file's relative path, bytes and permission bits, followed by an
//! index entry used to verify the archive on the way back out.
//!
//! - `pack` / `unpack`: archive round trip
//! - `BundleStats`: the `config/stats.json` metadata a built bundle carries
//! - `calculate_hash`: line-ending-insensitive content hash used in stats

mod index;
mod packer;
mod stats;

pub use index::{BundleIndex, IndexEntry, INDEX_ENTRY_NAME};
pub use packer::{pack, unpack, BundleSummary};
pub use stats::{calculate_hash, BundleStats};

/// File name of the pre-built production bundle
pub const PROD_BUNDLE_FILE: &str = "prod.bundle";

/// Location of the stats file inside a bundle
pub const STATS_JSON: &str = "config/stats.json";
