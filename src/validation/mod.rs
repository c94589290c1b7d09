//! Bundle validation helpers
//!
//! - `is_subset_with_report`: set-membership check with a report of what
//!   is missing
//! - `object_includes_entry`: recursive inclusion check for `theme.json`
//! - `log_changed_files`: uniform log output for those reports

mod json_includes;
mod set_diff;

pub use json_includes::object_includes_entry;
pub use set_diff::{canonical_form, is_subset_with_report, SubsetReport};

use crate::error::{FrontgenError, FrontgenResult};

/// Log `message` followed by one ` - <file>` line per entry.
///
/// `message` must be non-empty and must not contain a `{}` placeholder.
pub fn log_changed_files<S: AsRef<str>>(files: &[S], message: &str) -> FrontgenResult<()> {
    let listing = format_changed_files(files, message)?;
    tracing::info!("{}", listing);
    Ok(())
}

fn format_changed_files<S: AsRef<str>>(files: &[S], message: &str) -> FrontgenResult<String> {
    if message.is_empty() {
        return Err(FrontgenError::InvalidArgument(
            "changed files message cannot be empty".to_string(),
        ));
    }
    if message.contains("{}") {
        return Err(FrontgenError::InvalidArgument(
            "changed files message shouldn't include '{}' placeholder".to_string(),
        ));
    }

    let mut listing = format!("{}\n", message);
    for file in files {
        listing.push_str(" - ");
        listing.push_str(file.as_ref());
        listing.push('\n');
    }
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_files_are_listed_as_bullets() {
        let listing = format_changed_files(&["a.ts", "b.ts"], "Detected changed files:").unwrap();
        assert_eq!(listing, "Detected changed files:\n - a.ts\n - b.ts\n");
    }

    #[test]
    fn empty_message_is_rejected() {
        let err = log_changed_files(&["a.ts"], "").unwrap_err();
        assert!(matches!(err, FrontgenError::InvalidArgument(_)));
    }

    #[test]
    fn placeholder_in_message_is_rejected() {
        let err = log_changed_files::<&str>(&[], "files: {}").unwrap_err();
        assert!(matches!(err, FrontgenError::InvalidArgument(_)));
    }
}
