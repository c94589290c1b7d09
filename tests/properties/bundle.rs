//! Property tests for bundle round trips.

use std::collections::BTreeMap;
use std::fs;

use proptest::prelude::*;
use tempfile::tempdir;

use frontgen::bundle::{pack, unpack};

fn tree() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    let name = proptest::string::string_regex("[a-z]{1,6}(/[a-z]{1,6}){0,2}\\.(js|css|json)").unwrap();
    proptest::collection::btree_map(name, proptest::collection::vec(any::<u8>(), 0..256), 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: unpack(pack(tree)) reproduces every file byte for byte.
    #[test]
    fn property_round_trip_preserves_bytes(files in tree()) {
        let dir = tempdir().unwrap();
        let source = dir.path().join("src");
        for (rel, content) in &files {
            let path = source.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
        }
        let archive = dir.path().join("out.bundle");
        let destination = dir.path().join("dest");

        pack(&source, &archive).unwrap();
        let summary = unpack(&archive, &destination).unwrap();

        prop_assert_eq!(summary.len(), files.len());
        for (rel, content) in &files {
            prop_assert_eq!(&fs::read(destination.join(rel)).unwrap(), content);
        }
    }

    /// PROPERTY: packing the same tree twice yields identical archives.
    #[test]
    fn property_pack_is_deterministic(files in tree()) {
        let dir = tempdir().unwrap();
        let source = dir.path().join("src");
        for (rel, content) in &files {
            let path = source.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
        }

        pack(&source, &dir.path().join("one.bundle")).unwrap();
        pack(&source, &dir.path().join("two.bundle")).unwrap();

        prop_assert_eq!(
            fs::read(dir.path().join("one.bundle")).unwrap(),
            fs::read(dir.path().join("two.bundle")).unwrap()
        );
    }
}
