use thiserror::Error;

/// Unified error type for release operations.
///
/// Every gate check fails fast with one of these; nothing is retried.
/// `Conflict` and `RemoteState` carry the command the operator should run.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Cannot resolve release: {0}")]
    Resolution(String),

    #[error("{message}")]
    Conflict { message: String, hints: Vec<String> },

    #[error("{0}")]
    Validation(String),

    #[error("Build failed: {0}")]
    Build(String),

    #[error("{message}")]
    RemoteState { message: String, hints: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-gate
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    pub fn resolution(msg: impl Into<String>) -> Self {
        ReleaseError::Resolution(msg.into())
    }

    /// Create a conflict error with a remedy for the operator
    pub fn conflict(msg: impl Into<String>, hint: impl Into<String>) -> Self {
        ReleaseError::Conflict {
            message: msg.into(),
            hints: vec![hint.into()],
        }
    }

    /// Create a validation error for a declared version that disagrees with
    /// an independent source
    pub fn mismatch(source: &str, found: &str, expected: &str) -> Self {
        ReleaseError::Validation(format!(
            "{} \"{}\" does not match the release version {}",
            source, found, expected
        ))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ReleaseError::Validation(msg.into())
    }

    pub fn build(msg: impl Into<String>) -> Self {
        ReleaseError::Build(msg.into())
    }

    pub fn remote_state(msg: impl Into<String>, hints: Vec<String>) -> Self {
        ReleaseError::RemoteState {
            message: msg.into(),
            hints,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Remedial commands attached to this error, if any
    pub fn hints(&self) -> &[String] {
        match self {
            ReleaseError::Conflict { hints, .. } | ReleaseError::RemoteState { hints, .. } => {
                hints
            }
            _ => &[],
        }
    }

    /// Short name of the error class, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ReleaseError::Resolution(_) => "resolution",
            ReleaseError::Conflict { .. } => "conflict",
            ReleaseError::Validation(_) => "validation",
            ReleaseError::Build(_) => "build",
            ReleaseError::RemoteState { .. } => "remote-state",
            ReleaseError::Config(_) => "config",
            ReleaseError::Git(_) => "git",
            ReleaseError::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_names_both_values() {
        let err = ReleaseError::mismatch("Latest changelog entry", "1.1.9", "1.2.0");
        let msg = err.to_string();
        assert!(msg.contains("1.1.9"));
        assert!(msg.contains("1.2.0"));
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_conflict_carries_hint() {
        let err = ReleaseError::conflict("already exists", "rm -rf releases/v1.0.0");
        assert_eq!(err.to_string(), "already exists");
        assert_eq!(err.hints(), ["rm -rf releases/v1.0.0".to_string()]);
    }

    #[test]
    fn test_hints_empty_for_plain_errors() {
        assert!(ReleaseError::build("tests failed").hints().is_empty());
        assert!(ReleaseError::resolution("no tag").hints().is_empty());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
        assert_eq!(err.kind(), "io");
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::resolution("x"), "Cannot resolve release"),
            (ReleaseError::build("x"), "Build failed"),
            (ReleaseError::config("x"), "Configuration error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
