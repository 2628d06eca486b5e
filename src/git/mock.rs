use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::domain::TagPattern;
use crate::error::{ReleaseError, Result};
use crate::git::Vcs;

/// Mock repository for testing without actual git operations
///
/// Checkouts create the destination directory and write the configured files
/// into it, so gate checks that read the checkout work unchanged.
#[derive(Default)]
pub struct MockRepository {
    /// Annotated tags in creation order, newest last
    annotated: Vec<String>,
    refs: HashMap<String, String>,
    remote_tags: HashMap<String, String>,
    mainline: HashSet<String>,
    files: Vec<(String, String)>,
    remote_unreachable: bool,
    calls: RefCell<Vec<String>>,
}

impl MockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an annotated tag pointing at `commit`
    pub fn add_annotated_tag(&mut self, name: impl Into<String>, commit: impl Into<String>) {
        let name = name.into();
        self.refs.insert(name.clone(), commit.into());
        self.annotated.push(name);
    }

    /// Add a lightweight tag (ignored by `resolve_tag`)
    pub fn add_lightweight_tag(&mut self, name: impl Into<String>, commit: impl Into<String>) {
        self.refs.insert(name.into(), commit.into());
    }

    /// Record that the remote carries `tag` at `commit`
    pub fn push_tag(&mut self, name: impl Into<String>, commit: impl Into<String>) {
        self.remote_tags.insert(name.into(), commit.into());
    }

    /// Mark a commit as reachable from the mainline branch
    pub fn add_mainline_commit(&mut self, commit: impl Into<String>) {
        self.mainline.insert(commit.into());
    }

    /// File written into every checkout, relative to its root
    pub fn add_file(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.push((path.into(), contents.into()));
    }

    /// Make every remote query fail as if the network were down
    pub fn set_remote_unreachable(&mut self, unreachable: bool) {
        self.remote_unreachable = unreachable;
    }

    /// Operations performed so far, e.g. `checkout v1.2.0`
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Whether any remote query was made
    pub fn touched_remote(&self) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|call| call.starts_with("ls-remote"))
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl Vcs for MockRepository {
    fn resolve_tag(&self, pattern: &str) -> Result<String> {
        self.record(format!("describe {}", pattern));
        let pattern = TagPattern::new(pattern);
        self.annotated
            .iter()
            .rev()
            .find(|tag| pattern.matches(tag))
            .cloned()
            .ok_or_else(|| {
                ReleaseError::resolution(format!(
                    "No annotated tag matching '{}'",
                    pattern.pattern
                ))
            })
    }

    fn commit_of(&self, reference: &str) -> Result<String> {
        self.record(format!("rev-parse {}", reference));
        self.refs
            .get(reference)
            .cloned()
            .ok_or_else(|| ReleaseError::resolution(format!("Cannot resolve '{}'", reference)))
    }

    fn checkout(&self, tag: &str, dest: &Path) -> Result<()> {
        self.record(format!("checkout {}", tag));
        if dest.exists() {
            return Err(ReleaseError::conflict(
                format!("Checkout target {} already exists", dest.display()),
                format!("rm -rf {}", dest.display()),
            ));
        }

        fs::create_dir_all(dest)?;
        for (path, contents) in &self.files {
            let file = dest.join(path);
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(file, contents)?;
        }
        Ok(())
    }

    fn tag_exists_remote(&self, url: &str, tag: &str, commit: &str) -> Result<bool> {
        self.record(format!("ls-remote {} {}", url, tag));
        if self.remote_unreachable {
            return Err(ReleaseError::remote_state(
                format!("Cannot reach {}", url),
                Vec::new(),
            ));
        }
        Ok(self.remote_tags.get(tag).map(String::as_str) == Some(commit))
    }

    fn is_ancestor(&self, commit: &str, branch: &str) -> Result<bool> {
        self.record(format!("merge-base {} {}", commit, branch));
        Ok(self.mainline.contains(commit))
    }
}
