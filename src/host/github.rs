use std::path::Path;
use std::process::{Command, Stdio};

use super::ReleaseHost;
use crate::error::{ReleaseError, Result};
use crate::exec::CommandRunner;

/// GitHub releases via the `github-release` CLI.
///
/// Authentication is whatever the CLI picks up from the environment
/// (`GITHUB_TOKEN`); it is passed through untouched.
pub struct GithubRelease {
    tool: String,
    user: String,
    repository: String,
}

impl GithubRelease {
    pub fn new(
        tool: impl Into<String>,
        user: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        GithubRelease {
            tool: tool.into(),
            user: user.into(),
            repository: repository.into(),
        }
    }

    fn command(&self, action: &str, tag: &str) -> Command {
        let mut cmd = Command::new(&self.tool);
        cmd.arg(action)
            .args(["--user", self.user.as_str()])
            .args(["--repo", self.repository.as_str()])
            .args(["--tag", tag]);
        cmd
    }

    fn run(&self, mut cmd: Command, what: &str) -> Result<()> {
        CommandRunner::checked(&mut cmd).map_err(|e| {
            ReleaseError::remote_state(
                format!(
                    "{} on {}/{} failed: {}",
                    what, self.user, self.repository, e
                ),
                Vec::new(),
            )
        })?;
        Ok(())
    }
}

impl ReleaseHost for GithubRelease {
    fn release_exists(&self, tag: &str) -> Result<bool> {
        let mut cmd = self.command("info", tag);
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        let exists = CommandRunner::status(&mut cmd)?;
        tracing::debug!(tag, exists, "queried release entry");
        Ok(exists)
    }

    fn create_release(&self, tag: &str, name: &str, description: &str) -> Result<()> {
        let mut cmd = self.command("release", tag);
        cmd.args(["--name", name]).args(["--description", description]);
        tracing::info!(tag, name, "creating release entry");
        self.run(cmd, &format!("Creating release {}", tag))
    }

    fn upload_asset(&self, tag: &str, name: &str, file: &Path) -> Result<()> {
        let mut cmd = self.command("upload", tag);
        cmd.args(["--name", name]).arg("--file").arg(file);
        tracing::info!(tag, name, file = %file.display(), "uploading release asset");
        self.run(cmd, &format!("Uploading {} to release {}", name, tag))
    }

    fn delete_release(&self, tag: &str) -> Result<()> {
        let cmd = self.command("delete", tag);
        tracing::info!(tag, "deleting release entry");
        self.run(cmd, &format!("Deleting release {}", tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_arguments() {
        let host = GithubRelease::new("github-release", "weaveworks", "weave");
        let cmd = host.command("info", "v1.2.0");
        let args: Vec<_> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(cmd.get_program(), "github-release");
        assert_eq!(
            args,
            vec!["info", "--user", "weaveworks", "--repo", "weave", "--tag", "v1.2.0"]
        );
    }

    #[test]
    fn test_missing_tool_is_error() {
        let host = GithubRelease::new("/nonexistent/github-release", "u", "r");
        assert!(host.release_exists("v1.0.0").is_err());
        assert!(host.delete_release("v1.0.0").is_err());
    }
}
