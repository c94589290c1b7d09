//! Set-membership comparison of JSON value collections

use serde_json::Value;

/// Outcome of [`is_subset_with_report`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubsetReport {
    pub is_subset: bool,
    /// Canonical JSON text of every candidate element absent from the
    /// superset, in candidate order. Repeated candidates repeat here.
    pub missing: Vec<String>,
}

/// Check that every element of `candidate` occurs in `superset`.
///
/// Both slices are treated as unordered sets; duplicates in `candidate`
/// need only one match. Scalars compare by JSON type and value, with
/// numbers compared numerically. Arrays and objects compare as whole
/// values.
pub fn is_subset_with_report(candidate: &[Value], superset: &[Value]) -> SubsetReport {
    let missing: Vec<String> = candidate
        .iter()
        .filter(|item| !superset.iter().any(|other| values_equal(item, other)))
        .map(canonical_form)
        .collect();

    SubsetReport {
        is_subset: missing.is_empty(),
        missing,
    }
}

/// Serialized form used in reports: strings keep their quotes
pub fn canonical_form(value: &Value) -> String {
    value.to_string()
}

pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (integer(x), integer(y)) {
                x == y
            } else {
                x.as_f64() == y.as_f64()
            }
        }
        _ => a == b,
    }
}

fn integer(n: &serde_json::Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(v: Value) -> Vec<Value> {
        match v {
            Value::Array(items) => items,
            other => vec![other],
        }
    }

    #[test]
    fn subset_ignores_order_and_duplicates() {
        let report = is_subset_with_report(&values(json!(["a", "a", "b"])), &values(json!(["b", "a"])));
        assert!(report.is_subset);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn missing_is_quoted_and_in_candidate_order() {
        let report = is_subset_with_report(&values(json!(["a", "b", "c"])), &values(json!(["a", "c"])));
        assert!(!report.is_subset);
        assert_eq!(report.missing, vec!["\"b\""]);
    }

    #[test]
    fn empty_candidate_is_always_a_subset() {
        assert!(is_subset_with_report(&[], &[]).is_subset);
        assert!(is_subset_with_report(&[], &values(json!([1, 2]))).is_subset);
    }

    #[test]
    fn empty_superset_reports_every_candidate() {
        let report = is_subset_with_report(&values(json!(["x", 2, true])), &[]);
        assert!(!report.is_subset);
        assert_eq!(report.missing, vec!["\"x\"", "2", "true"]);
    }

    #[test]
    fn repeated_missing_candidates_repeat_in_report() {
        let report = is_subset_with_report(&values(json!(["z", "z"])), &values(json!(["a"])));
        assert_eq!(report.missing, vec!["\"z\"", "\"z\""]);
    }

    #[test]
    fn numbers_compare_numerically_but_not_across_types() {
        assert!(is_subset_with_report(&values(json!([1])), &values(json!([1.0]))).is_subset);
        assert!(!is_subset_with_report(&values(json!(["1"])), &values(json!([1]))).is_subset);
        assert!(!is_subset_with_report(&values(json!([true])), &values(json!(["true"]))).is_subset);
    }

    #[test]
    fn nested_values_compare_as_whole_tokens() {
        let report = is_subset_with_report(
            &values(json!([{"a": 1}, [1, 2]])),
            &values(json!([{"a": 1}, [2, 1]])),
        );
        assert_eq!(report.missing, vec!["[1,2]"]);
    }
}
