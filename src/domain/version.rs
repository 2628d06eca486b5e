use crate::error::{ReleaseError, Result};

/// The version being released, together with the tag it came from.
///
/// The version is the tag with exactly one leading `v` removed. Nothing else
/// about the tag is normalised: `v1.2.0-rc.1` yields `1.2.0-rc.1`, and the
/// changelog and the artifact have to agree with that string byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    tag: String,
    version: String,
}

impl ReleaseVersion {
    /// Derives the version from a release tag.
    ///
    /// # Errors
    /// * `Resolution` - if the tag has no `v` prefix or nothing after it
    pub fn from_tag(tag: &str) -> Result<Self> {
        let version = tag.strip_prefix('v').ok_or_else(|| {
            ReleaseError::resolution(format!("tag '{}' does not start with 'v'", tag))
        })?;

        if version.is_empty() {
            return Err(ReleaseError::resolution(format!(
                "tag '{}' carries no version",
                tag
            )));
        }

        Ok(ReleaseVersion {
            tag: tag.to_string(),
            version: version.to_string(),
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn as_str(&self) -> &str {
        &self.version
    }

    /// Whether the version parses as a semantic version.
    pub fn is_semver(&self) -> bool {
        semver::Version::parse(&self.version).is_ok()
    }
}

impl std::fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.version)
    }
}
