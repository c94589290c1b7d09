//! Property tests for the subset validator.

use proptest::prelude::*;
use serde_json::Value;

use frontgen::is_subset_with_report;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-e]{0,3}".prop_map(Value::from),
        (0i64..20).prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

fn scalars() -> impl Strategy<Value = Vec<Value>> {
    proptest::collection::vec(scalar(), 0..12)
}

proptest! {
    /// PROPERTY: the verdict is true exactly when nothing is missing.
    #[test]
    fn property_verdict_matches_missing(a in scalars(), b in scalars()) {
        let report = is_subset_with_report(&a, &b);
        prop_assert_eq!(report.is_subset, report.missing.is_empty());
    }

    /// PROPERTY: every collection is a subset of itself in any order.
    #[test]
    fn property_reflexive_under_reordering(a in scalars()) {
        let mut reversed = a.clone();
        reversed.reverse();
        prop_assert!(is_subset_with_report(&a, &reversed).is_subset);
    }

    /// PROPERTY: missing entries are rendered from the candidate, in order.
    #[test]
    fn property_missing_follows_candidate_order(a in scalars(), b in scalars()) {
        let report = is_subset_with_report(&a, &b);
        let expected: Vec<String> = a
            .iter()
            .filter(|item| !b.contains(item))
            .map(|item| item.to_string())
            .collect();
        prop_assert_eq!(report.missing, expected);
    }

    /// PROPERTY: against an empty superset everything is missing.
    #[test]
    fn property_empty_superset_reports_all(a in scalars()) {
        let report = is_subset_with_report(&a, &[]);
        prop_assert_eq!(report.missing.len(), a.len());
    }
}
