use std::path::Path;
use std::process::Command;

use super::{BuildSystem, BuildVars};
use crate::error::{ReleaseError, Result};
use crate::exec::CommandRunner;

/// Drives a Makefile-based build.
pub struct Make {
    program: String,
}

impl Make {
    pub fn new(program: impl Into<String>) -> Self {
        Make {
            program: program.into(),
        }
    }

    fn run(&self, dir: &Path, vars: &BuildVars, target: Option<&str>) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(dir).args(vars.to_args());
        if let Some(target) = target {
            cmd.arg(target);
        }

        let label = target.unwrap_or("default");
        tracing::info!(dir = %dir.display(), target = label, "invoking build system");

        if CommandRunner::status(&mut cmd)? {
            Ok(())
        } else {
            Err(ReleaseError::build(format!(
                "{} target '{}' failed in {}",
                self.program,
                label,
                dir.display()
            )))
        }
    }
}

impl Default for Make {
    fn default() -> Self {
        Make::new("make")
    }
}

impl BuildSystem for Make {
    fn build(&self, dir: &Path, vars: &BuildVars) -> Result<()> {
        self.run(dir, vars, None)
    }

    fn run_tests(&self, dir: &Path, vars: &BuildVars) -> Result<()> {
        self.run(dir, vars, Some("tests"))
    }

    fn publish(&self, dir: &Path, vars: &BuildVars) -> Result<()> {
        self.run(dir, vars, Some("publish"))
    }

    fn artifact_version(&self, artifact: &Path) -> Result<String> {
        let output = CommandRunner::checked(Command::new(artifact).arg("--version"))
            .map_err(|e| {
                ReleaseError::build(format!("Cannot query {} --version: {}", artifact.display(), e))
            })?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn vars() -> BuildVars {
        BuildVars {
            sudo: String::new(),
            version_variable: "WEAVE_VERSION".to_string(),
            version: "1.2.0".to_string(),
            dockerhub_user: "weaveworks".to_string(),
        }
    }

    #[test]
    fn test_failing_target_is_build_error() {
        let dir = tempfile::tempdir().unwrap();
        let make = Make::new("false");

        let err = make.run_tests(dir.path(), &vars()).unwrap_err();
        assert!(matches!(err, ReleaseError::Build(_)));
        assert!(err.to_string().contains("tests"));
    }

    #[test]
    fn test_passing_target() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Make::new("true").build(dir.path(), &vars()).is_ok());
    }

    #[test]
    fn test_artifact_version_output() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("weave");
        fs::write(&artifact, "#!/bin/sh\necho \"weave script 1.2.0\"\n").unwrap();
        fs::set_permissions(&artifact, fs::Permissions::from_mode(0o755)).unwrap();

        let output = Make::default().artifact_version(&artifact).unwrap();
        assert_eq!(output.trim(), "weave script 1.2.0");
    }

    #[test]
    fn test_missing_artifact_is_build_error() {
        let err = Make::default()
            .artifact_version(Path::new("/nonexistent/weave"))
            .unwrap_err();
        assert!(matches!(err, ReleaseError::Build(_)));
    }
}
