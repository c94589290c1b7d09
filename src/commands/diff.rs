use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use frontgen::is_subset_with_report;

fn read_array(path: &Path) -> Result<Vec<Value>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    match serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))? {
        Value::Array(items) => Ok(items),
        _ => bail!("{} does not contain a JSON array", path.display()),
    }
}

/// Exits non-zero when the two arrays differ as sets
pub fn cmd_diff(left: &Path, right: &Path, json: bool) -> Result<()> {
    let left_items = read_array(left)?;
    let right_items = read_array(right)?;

    let only_left = is_subset_with_report(&left_items, &right_items);
    let only_right = is_subset_with_report(&right_items, &left_items);
    let equal = only_left.is_subset && only_right.is_subset;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "diff",
                "equal": equal,
                "only_left": only_left.missing,
                "only_right": only_right.missing,
            })
        );
    } else {
        for item in &only_left.missing {
            println!("- {}", item);
        }
        for item in &only_right.missing {
            println!("+ {}", item);
        }
    }

    if !equal {
        bail!(
            "arrays differ: {} only in {}, {} only in {}",
            only_left.missing.len(),
            left.display(),
            only_right.missing.len(),
            right.display()
        );
    }
    Ok(())
}
