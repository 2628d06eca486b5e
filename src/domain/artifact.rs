/// Extracts the version an artifact reports from its `--version` output.
///
/// The reported version is the last whitespace-separated word of the first
/// non-empty line, so `weave script 1.2.0` and `1.2.0` both report `1.2.0`.
pub fn reported_version(output: &str) -> Option<&str> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.split_whitespace().last())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reported_version_forms() {
        assert_eq!(reported_version("weave script 1.2.0\n"), Some("1.2.0"));
        assert_eq!(reported_version("1.2.0"), Some("1.2.0"));
        assert_eq!(
            reported_version("\n  weave script 1.2.0\nweave router 1.2.0\n"),
            Some("1.2.0")
        );
    }

    #[test]
    fn test_reported_version_empty() {
        assert_eq!(reported_version(""), None);
        assert_eq!(reported_version("\n \n"), None);
    }
}
