//! Version control abstraction layer
//!
//! The gate observes git only through the [Vcs] trait, so its checks can be
//! exercised against [mock::MockRepository] without a repository on disk.
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for testing
//!
//! ```rust
//! # use release_gate::git::Vcs;
//! # fn example<V: Vcs>(vcs: &V) -> release_gate::Result<()> {
//! let tag = vcs.resolve_tag("v*")?;
//! let commit = vcs.commit_of(&tag)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::Path;

/// Version control operations the release gate depends on.
///
/// Commits are exchanged as full hex SHA strings.
pub trait Vcs {
    /// Most recent annotated tag reachable from HEAD that matches `pattern`
    ///
    /// Equivalent to `git describe --abbrev=0 --match=<pattern>`. Lightweight
    /// tags are not considered.
    ///
    /// # Errors
    /// * `Resolution` - if no such tag exists
    fn resolve_tag(&self, pattern: &str) -> Result<String>;

    /// Commit SHA a ref (usually a tag) points at, peeling annotated tags
    ///
    /// # Errors
    /// * `Resolution` - if the ref does not exist or does not lead to a commit
    fn commit_of(&self, reference: &str) -> Result<String>;

    /// Fresh checkout of the repository at `tag` into `dest`
    ///
    /// `dest` must not exist; implementations never write into an existing
    /// directory.
    fn checkout(&self, tag: &str, dest: &Path) -> Result<()>;

    /// Whether the remote at `url` carries `tag` pointing at `commit`
    fn tag_exists_remote(&self, url: &str, tag: &str, commit: &str) -> Result<bool>;

    /// Whether `commit` is reachable from the tip of `branch`
    fn is_ancestor(&self, commit: &str, branch: &str) -> Result<bool>;
}
