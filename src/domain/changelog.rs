use regex::Regex;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// Returns the version token of the topmost `## Release <version>` header.
///
/// Headers are matched at the start of a line; the token starts with a digit
/// and runs over word characters, `.`, `+` and `-`. Anything after it on the
/// line (punctuation, a date, a codename) is ignored.
pub fn latest_release_entry(changelog: &str) -> Option<String> {
    let re = Regex::new(r"(?m)^## Release (\d[\w.+-]*)").ok()?;
    re.captures(changelog)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Checks that the changelog at `path` leads with an entry for `version`.
///
/// # Errors
/// * `Validation` - file missing or unreadable, no release entry, or an entry
///   for a different version (both values are named)
pub fn check_changelog(path: &Path, version: &str) -> Result<()> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        ReleaseError::validation(format!("Cannot read changelog {}: {}", path.display(), e))
    })?;

    match latest_release_entry(&text) {
        Some(entry) if entry == version => Ok(()),
        Some(entry) => Err(ReleaseError::mismatch(
            "Latest changelog entry",
            &entry,
            version,
        )),
        None => Err(ReleaseError::validation(format!(
            "No '## Release <version>' entry in {}; expected one for {}",
            path.display(),
            version
        ))),
    }
}
