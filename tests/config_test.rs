// tests/config_test.rs
use std::io::Write;
use std::path::PathBuf;

use release_gate::config::{load_config, load_config_file, ReleaseConfig};
use release_gate::ReleaseError;
use serial_test::serial;
use tempfile::NamedTempFile;

const VARS: [&str; 5] = [
    "SUDO",
    "GITHUB_USER",
    "DOCKERHUB_USER",
    "RELEASE_NAME",
    "RELEASE_DESCRIPTION",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = config_file(
        r#"
repository = "scope"
artifact = "scope"
releases_dir = "out/releases"
mainline = "main"
version_variable = "SCOPE_VERSION"
"#,
    );

    let config = load_config_file(Some(file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.repository, "scope");
    assert_eq!(config.releases_dir, PathBuf::from("out/releases"));
    assert_eq!(config.mainline, "main");
    assert_eq!(config.version_variable, "SCOPE_VERSION");
    // untouched fields keep their defaults
    assert_eq!(config.floating_tag, "latest_release");
    assert_eq!(config.sudo, "sudo -E");
}

#[test]
fn test_invalid_file_is_config_error() {
    let file = config_file("repository = [not toml");
    let err = load_config_file(Some(file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
fn test_missing_file_is_config_error() {
    let err = load_config_file(Some("/nonexistent/release.toml")).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    let file = config_file("github_user = \"from-file\"\nsudo = \"doas\"\n");

    std::env::set_var("GITHUB_USER", "from-env");
    std::env::set_var("RELEASE_NAME", "Weave {version}");
    let config = load_config(Some(file.path().to_str().unwrap())).unwrap();
    clear_env();

    assert_eq!(config.github_user, "from-env");
    assert_eq!(config.sudo, "doas");
    assert_eq!(config.release_name_for("2.0.0"), "Weave 2.0.0");
}

#[test]
#[serial]
fn test_empty_sudo_from_environment() {
    clear_env();
    let file = config_file("");

    std::env::set_var("SUDO", "");
    let config = load_config(Some(file.path().to_str().unwrap())).unwrap();
    clear_env();

    assert_eq!(config.sudo, "");
}

#[test]
#[serial]
fn test_invalid_values_rejected_after_env() {
    clear_env();
    let file = config_file("tag_pattern = \"release-*\"\n");

    let err = load_config(Some(file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
fn test_defaults_round_trip_through_toml() {
    let text = toml::to_string(&ReleaseConfig::default()).unwrap();
    let parsed: ReleaseConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, ReleaseConfig::default());
}
