use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::tag::render_template;
use crate::error::{ReleaseError, Result};

/// Environment variables recognised as configuration overrides.
pub const ENV_SUDO: &str = "SUDO";
pub const ENV_GITHUB_USER: &str = "GITHUB_USER";
pub const ENV_DOCKERHUB_USER: &str = "DOCKERHUB_USER";
pub const ENV_RELEASE_NAME: &str = "RELEASE_NAME";
pub const ENV_RELEASE_DESCRIPTION: &str = "RELEASE_DESCRIPTION";

/// Complete configuration for a release run.
///
/// Built once at the process boundary (defaults, then an optional TOML file,
/// then the environment) and handed to the gate. Nothing below the CLI reads
/// the environment.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Repository name on the release host
    pub repository: String,
    /// Artifact file name inside the release directory
    pub artifact: String,
    /// Glob for the annotated tags that mark releases
    pub tag_pattern: String,
    /// Tag that floats to the newest published release
    pub floating_tag: String,
    pub changelog: String,
    pub releases_dir: PathBuf,
    /// Branch the release tag is expected to be reachable from
    pub mainline: String,
    /// Build-system variable that receives the version
    pub version_variable: String,
    pub make: String,
    pub release_tool: String,
    pub sudo: String,
    pub github_user: String,
    pub dockerhub_user: String,
    pub release_name: String,
    pub release_description: String,
    pub latest_release_name: String,
    pub remote_url: Option<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            repository: "weave".to_string(),
            artifact: "weave".to_string(),
            tag_pattern: "v*".to_string(),
            floating_tag: "latest_release".to_string(),
            changelog: "CHANGELOG.md".to_string(),
            releases_dir: PathBuf::from("releases"),
            mainline: "master".to_string(),
            version_variable: "WEAVE_VERSION".to_string(),
            make: "make".to_string(),
            release_tool: "github-release".to_string(),
            sudo: "sudo -E".to_string(),
            github_user: "weaveworks".to_string(),
            dockerhub_user: "weaveworks".to_string(),
            release_name: "{repository} {version}".to_string(),
            release_description: "Release {version}".to_string(),
            latest_release_name: "{repository} latest ({version})".to_string(),
            remote_url: None,
        }
    }
}

impl ReleaseConfig {
    /// Applies environment overrides through `lookup`.
    ///
    /// `SUDO` set to an empty string disables privilege escalation rather than
    /// falling back to the default, so presence is what counts there. The
    /// other variables are ignored when empty.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(sudo) = lookup(ENV_SUDO) {
            self.sudo = sudo;
        }

        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(user) = non_empty(ENV_GITHUB_USER) {
            self.github_user = user;
        }
        if let Some(user) = non_empty(ENV_DOCKERHUB_USER) {
            self.dockerhub_user = user;
        }
        if let Some(name) = non_empty(ENV_RELEASE_NAME) {
            self.release_name = name;
        }
        if let Some(description) = non_empty(ENV_RELEASE_DESCRIPTION) {
            self.release_description = description;
        }
    }

    /// Rejects configurations the gate cannot work with.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("repository", &self.repository),
            ("artifact", &self.artifact),
            ("tag_pattern", &self.tag_pattern),
            ("floating_tag", &self.floating_tag),
            ("changelog", &self.changelog),
            ("version_variable", &self.version_variable),
            ("github_user", &self.github_user),
            ("dockerhub_user", &self.dockerhub_user),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ReleaseError::config(format!("'{}' must not be empty", field)));
            }
        }

        if !self.tag_pattern.starts_with('v') {
            return Err(ReleaseError::config(format!(
                "tag_pattern '{}' must match tags starting with 'v'",
                self.tag_pattern
            )));
        }

        Ok(())
    }

    /// URL of the repository on the release host.
    pub fn remote_url(&self) -> String {
        self.remote_url.clone().unwrap_or_else(|| {
            format!(
                "https://github.com/{}/{}.git",
                self.github_user, self.repository
            )
        })
    }

    /// Web page of a release entry, used in diagnostics.
    pub fn release_page(&self, tag: &str) -> String {
        format!(
            "https://github.com/{}/{}/releases/{}",
            self.github_user, self.repository, tag
        )
    }

    /// Directory a release is built into.
    pub fn release_dir(&self, tag: &str) -> PathBuf {
        self.releases_dir.join(tag)
    }

    pub fn release_name_for(&self, version: &str) -> String {
        render_template(&self.release_name, &self.repository, version)
    }

    pub fn release_description_for(&self, version: &str) -> String {
        render_template(&self.release_description, &self.repository, version)
    }

    pub fn latest_release_name_for(&self, version: &str) -> String {
        render_template(&self.latest_release_name, &self.repository, version)
    }
}

/// Loads configuration from file, then applies the process environment.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in current directory
/// 3. `.release.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<ReleaseConfig> {
    let mut config = load_config_file(config_path)?;
    config.apply_env(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}

/// Loads only the file layer (or defaults), without the environment.
pub fn load_config_file(config_path: Option<&str>) -> Result<ReleaseConfig> {
    let path = match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => default_config_path(),
    };

    let Some(path) = path else {
        return Ok(ReleaseConfig::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration file");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    toml::from_str(&config_str)
        .map_err(|e| ReleaseError::config(format!("cannot parse {}: {}", path.display(), e)))
}

fn default_config_path() -> Option<PathBuf> {
    let local = Path::new("./release.toml");
    if local.exists() {
        return Some(local.to_path_buf());
    }

    dirs::config_dir()
        .map(|dir| dir.join(".release.toml"))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ReleaseConfig::default();
        assert_eq!(config.sudo, "sudo -E");
        assert_eq!(config.floating_tag, "latest_release");
        assert_eq!(config.tag_pattern, "v*");
        assert_eq!(config.release_dir("v1.2.0"), PathBuf::from("releases/v1.2.0"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ReleaseConfig::default();
        config.apply_env(lookup(&[
            ("GITHUB_USER", "alice"),
            ("DOCKERHUB_USER", "alicehub"),
            ("RELEASE_NAME", "Weave {version}"),
            ("RELEASE_DESCRIPTION", "Notes for {version}"),
        ]));

        assert_eq!(config.github_user, "alice");
        assert_eq!(config.dockerhub_user, "alicehub");
        assert_eq!(config.release_name_for("1.2.0"), "Weave 1.2.0");
        assert_eq!(config.release_description_for("1.2.0"), "Notes for 1.2.0");
        assert_eq!(config.remote_url(), "https://github.com/alice/weave.git");
    }

    #[test]
    fn test_empty_sudo_disables_escalation() {
        let mut config = ReleaseConfig::default();
        config.apply_env(lookup(&[("SUDO", "")]));
        assert_eq!(config.sudo, "");
    }

    #[test]
    fn test_empty_user_keeps_default() {
        let mut config = ReleaseConfig::default();
        config.apply_env(lookup(&[("GITHUB_USER", "  ")]));
        assert_eq!(config.github_user, "weaveworks");
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let config = ReleaseConfig {
            artifact: String::new(),
            ..ReleaseConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("artifact"));
    }

    #[test]
    fn test_validate_rejects_pattern_without_prefix() {
        let config = ReleaseConfig {
            tag_pattern: "release-*".to_string(),
            ..ReleaseConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_remote_url_wins() {
        let config = ReleaseConfig {
            remote_url: Some("git@github.com:me/weave.git".to_string()),
            ..ReleaseConfig::default()
        };
        assert_eq!(config.remote_url(), "git@github.com:me/weave.git");
    }
}
