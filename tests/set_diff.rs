//! Set-diff validator behavior through the public API
//!
//! Run with: cargo test --test set_diff

use frontgen::is_subset_with_report;
use serde_json::{json, Value};

fn array(value: Value) -> Vec<Value> {
    value.as_array().cloned().unwrap_or_default()
}

#[test]
fn equal_sets_in_different_order() {
    let report = is_subset_with_report(&array(json!(["a", "b", "c"])), &array(json!(["b", "a", "c"])));
    assert!(report.is_subset);
    assert!(report.missing.is_empty());
}

#[test]
fn asymmetric_difference_is_reported_in_order() {
    let report = is_subset_with_report(&array(json!(["a", "b", "c"])), &array(json!(["a"])));
    assert!(!report.is_subset);
    assert_eq!(report.missing, vec!["\"b\"", "\"c\""]);
}

#[test]
fn superset_may_hold_extra_elements() {
    let report = is_subset_with_report(&array(json!(["a"])), &array(json!(["a", "b", "c"])));
    assert!(report.is_subset);
}

#[test]
fn mixed_scalars_render_in_canonical_form() {
    let report = is_subset_with_report(&array(json!(["x", 42, false, null])), &[]);
    assert_eq!(report.missing, vec!["\"x\"", "42", "false", "null"]);
}

#[test]
fn quotes_inside_strings_are_escaped() {
    let report = is_subset_with_report(&array(json!(["say \"hi\""])), &[]);
    assert_eq!(report.missing, vec![r#""say \"hi\"""#]);
}
