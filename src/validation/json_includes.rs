//! Recursive inclusion check for JSON documents
//!
//! Used to decide whether a bundle's recorded `theme.json` still covers the
//! project's current one.

use serde_json::{Map, Value};

use super::set_diff::values_equal;

/// Whether `bundle` includes everything `project` declares.
///
/// - objects: every project entry must match some bundle entry of the same
///   type, searched by value rather than by key. A string `parent` entry
///   is ignored.
/// - arrays: every project element must be found in the bundle array; when
///   the lengths differ the check is repeated the other way round.
/// - scalars compare by value; `null` always matches.
///
/// Keys (for objects) or canonical element text (for arrays) that found no
/// match are appended to `missed`. Nodes of different JSON types never
/// match.
pub fn object_includes_entry(bundle: &Value, project: &Value, missed: &mut Vec<String>) -> bool {
    match (bundle, project) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(_), Value::Bool(_))
        | (Value::Number(_), Value::Number(_))
        | (Value::String(_), Value::String(_)) => values_equal(bundle, project),
        (Value::Array(bundle), Value::Array(project)) => compare_arrays(bundle, project, missed),
        (Value::Object(bundle), Value::Object(project)) => compare_objects(bundle, project, missed),
        _ => false,
    }
}

fn same_type(a: &Value, b: &Value) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

fn compare_objects(bundle: &Map<String, Value>, project: &Map<String, Value>, missed: &mut Vec<String>) -> bool {
    let mut all_found = true;
    for (key, project_entry) in project {
        if key == "parent" && project_entry.is_string() {
            continue;
        }
        let found = bundle.values().any(|bundle_entry| {
            same_type(bundle_entry, project_entry) && object_includes_entry(bundle_entry, project_entry, missed)
        });
        if !found {
            missed.push(key.clone());
        }
        all_found = all_found && found;
    }
    all_found
}

fn compare_arrays(bundle: &[Value], project: &[Value], missed: &mut Vec<String>) -> bool {
    let mut all_found = check_missed(bundle, project, missed);
    if bundle.len() != project.len() {
        all_found = all_found && check_missed(project, bundle, missed);
    }
    all_found
}

/// Look up every element of `comparing` in `iterating`
fn check_missed(iterating: &[Value], comparing: &[Value], missed: &mut Vec<String>) -> bool {
    let mut all_found = true;
    for wanted in comparing {
        let found = iterating
            .iter()
            .any(|candidate| same_type(candidate, wanted) && object_includes_entry(candidate, wanted, missed));
        if !found {
            missed.push(wanted.to_string());
        }
        all_found = all_found && found;
    }
    all_found
}
