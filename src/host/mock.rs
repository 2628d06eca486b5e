use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;

use super::ReleaseHost;
use crate::error::{ReleaseError, Result};

/// A published release entry held by [MockReleaseHost]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MockRelease {
    pub name: String,
    pub description: String,
    pub assets: Vec<String>,
}

/// In-memory release host for testing
#[derive(Default)]
pub struct MockReleaseHost {
    releases: RefCell<BTreeMap<String, MockRelease>>,
    calls: RefCell<Vec<String>>,
}

impl MockReleaseHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing release entry
    pub fn add_release(&mut self, tag: impl Into<String>, name: impl Into<String>) {
        self.releases.borrow_mut().insert(
            tag.into(),
            MockRelease {
                name: name.into(),
                ..MockRelease::default()
            },
        );
    }

    pub fn release(&self, tag: &str) -> Option<MockRelease> {
        self.releases.borrow().get(tag).cloned()
    }

    /// Operations performed so far, e.g. `create v1.2.0`
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Whether any create, upload or delete happened
    pub fn mutated(&self) -> bool {
        self.calls.borrow().iter().any(|call| !call.starts_with("info"))
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl ReleaseHost for MockReleaseHost {
    fn release_exists(&self, tag: &str) -> Result<bool> {
        self.record(format!("info {}", tag));
        Ok(self.releases.borrow().contains_key(tag))
    }

    fn create_release(&self, tag: &str, name: &str, description: &str) -> Result<()> {
        self.record(format!("create {}", tag));
        let mut releases = self.releases.borrow_mut();
        if releases.contains_key(tag) {
            return Err(ReleaseError::remote_state(
                format!("Release {} already exists", tag),
                Vec::new(),
            ));
        }
        releases.insert(
            tag.to_string(),
            MockRelease {
                name: name.to_string(),
                description: description.to_string(),
                assets: Vec::new(),
            },
        );
        Ok(())
    }

    fn upload_asset(&self, tag: &str, name: &str, _file: &Path) -> Result<()> {
        self.record(format!("upload {} {}", tag, name));
        let mut releases = self.releases.borrow_mut();
        let release = releases.get_mut(tag).ok_or_else(|| {
            ReleaseError::remote_state(format!("No release {}", tag), Vec::new())
        })?;
        release.assets.push(name.to_string());
        Ok(())
    }

    fn delete_release(&self, tag: &str) -> Result<()> {
        self.record(format!("delete {}", tag));
        self.releases
            .borrow_mut()
            .remove(tag)
            .map(|_| ())
            .ok_or_else(|| ReleaseError::remote_state(format!("No release {}", tag), Vec::new()))
    }
}
