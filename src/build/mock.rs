use std::cell::RefCell;
use std::fs;
use std::path::Path;

use super::{BuildSystem, BuildVars};
use crate::error::{ReleaseError, Result};

/// Scripted build system for testing
pub struct MockBuildSystem {
    build_ok: bool,
    tests_ok: bool,
    publish_ok: bool,
    reported: String,
    artifact: Option<String>,
    calls: RefCell<Vec<String>>,
}

impl MockBuildSystem {
    /// A build that succeeds and whose artifact reports `reported`
    pub fn new(reported: impl Into<String>) -> Self {
        MockBuildSystem {
            build_ok: true,
            tests_ok: true,
            publish_ok: true,
            reported: reported.into(),
            artifact: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Write an artifact with this file name into the directory on build
    pub fn with_artifact(mut self, name: impl Into<String>) -> Self {
        self.artifact = Some(name.into());
        self
    }

    pub fn failing_build(mut self) -> Self {
        self.build_ok = false;
        self
    }

    pub fn failing_tests(mut self) -> Self {
        self.tests_ok = false;
        self
    }

    pub fn failing_publish(mut self) -> Self {
        self.publish_ok = false;
        self
    }

    /// Operations performed so far, e.g. `tests WEAVE_VERSION=1.2.0`
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, target: &str, vars: &BuildVars) {
        self.calls
            .borrow_mut()
            .push(format!("{} {}={}", target, vars.version_variable, vars.version));
    }
}

impl BuildSystem for MockBuildSystem {
    fn build(&self, dir: &Path, vars: &BuildVars) -> Result<()> {
        self.record("build", vars);
        if !self.build_ok {
            return Err(ReleaseError::build("default target failed"));
        }
        if let Some(name) = &self.artifact {
            fs::write(dir.join(name), &self.reported)?;
        }
        Ok(())
    }

    fn run_tests(&self, _dir: &Path, vars: &BuildVars) -> Result<()> {
        self.record("tests", vars);
        if self.tests_ok {
            Ok(())
        } else {
            Err(ReleaseError::build("tests target failed"))
        }
    }

    fn publish(&self, _dir: &Path, vars: &BuildVars) -> Result<()> {
        self.record("publish", vars);
        if self.publish_ok {
            Ok(())
        } else {
            Err(ReleaseError::build("publish target failed"))
        }
    }

    fn artifact_version(&self, artifact: &Path) -> Result<String> {
        self.calls
            .borrow_mut()
            .push(format!("version {}", artifact.display()));
        Ok(self.reported.clone())
    }
}
