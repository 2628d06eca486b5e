//! Build system abstraction
//!
//! The gate compiles, tests and publishes through [BuildSystem]. The real
//! implementation drives `make`; [mock::MockBuildSystem] scripts outcomes for
//! tests.

pub mod make;
pub mod mock;

pub use make::Make;
pub use mock::MockBuildSystem;

use std::path::Path;

use crate::config::ReleaseConfig;
use crate::error::Result;

/// Named variables injected into every build-system invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVars {
    pub sudo: String,
    /// Variable name receiving the version, e.g. `WEAVE_VERSION`
    pub version_variable: String,
    pub version: String,
    pub dockerhub_user: String,
}

impl BuildVars {
    pub fn new(config: &ReleaseConfig, version: &str) -> Self {
        BuildVars {
            sudo: config.sudo.clone(),
            version_variable: config.version_variable.clone(),
            version: version.to_string(),
            dockerhub_user: config.dockerhub_user.clone(),
        }
    }

    /// `NAME=value` arguments in a stable order
    pub fn to_args(&self) -> Vec<String> {
        vec![
            format!("SUDO={}", self.sudo),
            format!("{}={}", self.version_variable, self.version),
            format!("DOCKERHUB_USER={}", self.dockerhub_user),
        ]
    }
}

/// Build operations the release gate depends on.
pub trait BuildSystem {
    /// Run the default target in `dir`
    fn build(&self, dir: &Path, vars: &BuildVars) -> Result<()>;

    /// Run the `tests` target in `dir`; failure is a `Build` error
    fn run_tests(&self, dir: &Path, vars: &BuildVars) -> Result<()>;

    /// Run the `publish` target, which pushes container images tagged with
    /// the version
    fn publish(&self, dir: &Path, vars: &BuildVars) -> Result<()>;

    /// Raw output of `<artifact> --version`
    fn artifact_version(&self, artifact: &Path) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_vars_args() {
        let config = ReleaseConfig {
            sudo: String::new(),
            dockerhub_user: "me".to_string(),
            ..ReleaseConfig::default()
        };
        let vars = BuildVars::new(&config, "1.2.0");

        assert_eq!(
            vars.to_args(),
            vec!["SUDO=", "WEAVE_VERSION=1.2.0", "DOCKERHUB_USER=me"]
        );
    }
}
