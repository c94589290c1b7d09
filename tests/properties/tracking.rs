//! Property tests for generated file tracking.

use proptest::prelude::*;
use tempfile::tempdir;

use frontgen::GeneratedFiles;

fn relative_path() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[a-z0-9_-]{1,8}").unwrap();
    proptest::collection::vec(segment, 1..=3).prop_map(|segments| segments.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a second write of the same content never reports a change.
    #[test]
    fn property_write_is_idempotent(
        rel in relative_path(),
        content in "(?s).{0,200}"
    ) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(&rel);
        let mut files = GeneratedFiles::new();

        let first = files.write_if_changed(&path, &content).unwrap();
        let second = files.write_if_changed(&path, &content).unwrap();

        prop_assert!(first);
        prop_assert!(!second);
        prop_assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
        prop_assert_eq!(files.len(), 1);
    }

    /// PROPERTY: the tracked set is exactly the set of distinct paths written.
    #[test]
    fn property_tracked_set_matches_distinct_paths(
        rels in proptest::collection::vec(relative_path(), 1..8)
    ) {
        let dir = tempdir().unwrap();
        let mut files = GeneratedFiles::new();
        let mut distinct = std::collections::BTreeSet::new();

        for rel in &rels {
            let path = dir.path().join(rel);
            // a path that is a prefix directory of an earlier file cannot be a file
            if files.write_if_changed(&path, rel).is_ok() {
                distinct.insert(rel.clone());
            }
        }

        prop_assert_eq!(files.len(), distinct.len());
    }
}
