use git2::build::CheckoutBuilder;
use git2::{
    Cred, CredentialType, DescribeFormatOptions, DescribeOptions, Direction, Oid, RemoteCallbacks,
    Repository as Git2Repo,
};
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// Wrapper around git2::Repository implementing [super::Vcs]
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            ReleaseError::resolution(format!("Not in a git repository: {}", e.message()))
        })?;

        Ok(Git2Repository { repo })
    }

    fn oid_of(&self, reference: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(reference).map_err(|e| {
            ReleaseError::resolution(format!("Cannot resolve '{}': {}", reference, e.message()))
        })?;

        let commit = object.peel_to_commit().map_err(|e| {
            ReleaseError::resolution(format!(
                "'{}' does not point at a commit: {}",
                reference,
                e.message()
            ))
        })?;

        Ok(commit.id())
    }
}

/// Credentials for ssh remotes: keys from ~/.ssh, then the agent, then
/// whatever git2 considers default. https remotes are read anonymously.
fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        Cred::default()
    });
    callbacks
}

impl super::Vcs for Git2Repository {
    fn resolve_tag(&self, pattern: &str) -> Result<String> {
        // Default strategy only considers annotated tags, like plain `git describe`
        let mut opts = DescribeOptions::new();
        opts.pattern(pattern);

        let describe = self.repo.describe(&opts).map_err(|e| {
            ReleaseError::resolution(format!(
                "No annotated tag matching '{}': {}",
                pattern,
                e.message()
            ))
        })?;

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);

        let tag = describe.format(Some(&format))?;
        tracing::debug!(pattern, tag = %tag, "resolved release tag");
        Ok(tag)
    }

    fn commit_of(&self, reference: &str) -> Result<String> {
        Ok(self.oid_of(reference)?.to_string())
    }

    fn checkout(&self, tag: &str, dest: &Path) -> Result<()> {
        if dest.exists() {
            return Err(ReleaseError::conflict(
                format!("Checkout target {} already exists", dest.display()),
                format!("rm -rf {}", dest.display()),
            ));
        }

        let oid = self.oid_of(tag)?;

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let source = self.repo.path().to_str().ok_or_else(|| {
            ReleaseError::resolution(format!(
                "Repository path {} is not valid UTF-8",
                self.repo.path().display()
            ))
        })?;

        tracing::debug!(source, dest = %dest.display(), tag, "cloning release checkout");
        let clone = Git2Repo::clone(source, dest).map_err(|e| {
            ReleaseError::resolution(format!(
                "Cannot clone into {}: {}",
                dest.display(),
                e.message()
            ))
        })?;

        let commit = clone.find_commit(oid).map_err(|e| {
            ReleaseError::resolution(format!(
                "Tag '{}' commit {} missing from clone: {}",
                tag,
                oid,
                e.message()
            ))
        })?;

        clone.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))?;
        clone.set_head_detached(oid)?;

        Ok(())
    }

    fn tag_exists_remote(&self, url: &str, tag: &str, commit: &str) -> Result<bool> {
        let expected = Oid::from_str(commit)?;

        let mut remote = self.repo.remote_anonymous(url)?;
        let connection = remote
            .connect_auth(Direction::Fetch, Some(remote_callbacks()), None)
            .map_err(|e| {
                ReleaseError::remote_state(
                    format!("Cannot reach {}: {}", url, e.message()),
                    Vec::new(),
                )
            })?;

        let direct = format!("refs/tags/{}", tag);
        let peeled = format!("{}^{{}}", direct);

        // Annotated tags are advertised twice; the peeled entry names the commit
        let heads = connection.list()?;
        let found = heads
            .iter()
            .find(|head| head.name() == peeled)
            .or_else(|| heads.iter().find(|head| head.name() == direct))
            .map(|head| head.oid());

        tracing::debug!(url, tag, commit, remote = ?found, "checked remote tag");
        Ok(found == Some(expected))
    }

    fn is_ancestor(&self, commit: &str, branch: &str) -> Result<bool> {
        let commit = Oid::from_str(commit)?;
        let tip = self.oid_of(branch)?;

        if tip == commit {
            return Ok(true);
        }

        Ok(self.repo.graph_descendant_of(tip, commit)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        // tempdirs live outside any repository on CI; discover walks upward
        if Git2Repo::discover(dir.path()).is_err() {
            assert!(Git2Repository::open(dir.path()).is_err());
        }
    }
}
