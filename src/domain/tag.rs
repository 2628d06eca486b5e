/// Glob pattern selecting release tags (e.g. "v*"), as understood by
/// `git describe --match`.
#[derive(Debug, Clone)]
pub struct TagPattern {
    pub pattern: String,
}

impl TagPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        TagPattern {
            pattern: pattern.into(),
        }
    }

    /// Whether `tag` matches this glob. `*` matches any run of characters and
    /// `?` a single one; everything else is literal.
    pub fn matches(&self, tag: &str) -> bool {
        let mut regex_pattern = String::from("^");
        for c in self.pattern.chars() {
            match c {
                '*' => regex_pattern.push_str(".*"),
                '?' => regex_pattern.push('.'),
                other => regex_pattern.push_str(&regex::escape(&other.to_string())),
            }
        }
        regex_pattern.push('$');

        regex::Regex::new(&regex_pattern)
            .map(|re| re.is_match(tag))
            .unwrap_or(false)
    }
}

/// Substitutes `{repository}` and `{version}` in a release text template.
pub fn render_template(template: &str, repository: &str, version: &str) -> String {
    template
        .replace("{repository}", repository)
        .replace("{version}", version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matches() {
        let pattern = TagPattern::new("v*");
        assert!(pattern.matches("v1.2.3"));
        assert!(pattern.matches("v"));
        assert!(!pattern.matches("latest_release"));
        assert!(!pattern.matches("release-1.2.3"));
    }

    #[test]
    fn test_pattern_literal_characters() {
        let pattern = TagPattern::new("v1.?.*");
        assert!(pattern.matches("v1.2.0"));
        assert!(!pattern.matches("v1x2.0"));
    }

    #[test]
    fn test_render_template() {
        assert_eq!(
            render_template("{repository} {version}", "weave", "1.2.0"),
            "weave 1.2.0"
        );
        assert_eq!(render_template("static", "weave", "1.2.0"), "static");
    }
}
