//! Remote release host abstraction
//!
//! Release entries on the hosting service are created, filled and deleted
//! through [ReleaseHost]. [github::GithubRelease] drives the `github-release`
//! CLI; [mock::MockReleaseHost] keeps entries in memory.

pub mod github;
pub mod mock;

pub use github::GithubRelease;
pub use mock::MockReleaseHost;

use std::path::Path;

use crate::error::Result;

/// Release-entry operations on the hosting service.
pub trait ReleaseHost {
    /// Whether a release entry exists under `tag`
    fn release_exists(&self, tag: &str) -> Result<bool>;

    /// Create a release entry for an already-pushed `tag`
    fn create_release(&self, tag: &str, name: &str, description: &str) -> Result<()>;

    /// Attach `file` to the release under `tag` as `name`
    fn upload_asset(&self, tag: &str, name: &str, file: &Path) -> Result<()>;

    /// Delete the release entry under `tag`
    fn delete_release(&self, tag: &str) -> Result<()>;
}
