use std::fmt;

/// Non-fatal findings about a release. They are reported to the operator
/// but never fail a gate.
#[derive(Debug, Clone, PartialEq)]
pub enum GateWarning {
    /// The release tag's commit is not reachable from the mainline branch
    TagNotOnMainline {
        tag: String,
        commit: String,
        branch: String,
    },
    /// The mainline branch could not be inspected
    MainlineUnresolved { branch: String, reason: String },
    /// The version does not parse as semver
    NonSemverVersion { version: String },
}

fn short(hash: &str) -> &str {
    match hash.char_indices().nth(7) {
        Some((end, _)) => &hash[..end],
        None => hash,
    }
}

impl fmt::Display for GateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateWarning::TagNotOnMainline {
                tag,
                commit,
                branch,
            } => write!(
                f,
                "Tag '{}' ({}) is not reachable from '{}'",
                tag,
                short(commit),
                branch
            ),
            GateWarning::MainlineUnresolved { branch, reason } => {
                write!(f, "Cannot check mainline branch '{}': {}", branch, reason)
            }
            GateWarning::NonSemverVersion { version } => {
                write!(f, "Version '{}' is not a semantic version", version)
            }
        }
    }
}
