//! Operator-facing output.
//!
//! Progress goes to stdout; warnings and diagnostics go to stderr.

use console::style;

use crate::error::ReleaseError;
use crate::warning::GateWarning;

/// Print a section header, e.g. `== Publishing to DockerHub`.
pub fn display_status(message: &str) {
    println!("{} {}", style("==").bold(), message);
}

/// Print a passed check or completed action.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_warning(warning: &GateWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().for_stderr(), warning);
}

/// Print a failure with its remedial commands.
pub fn display_error(error: &ReleaseError) {
    eprintln!("{} {}", style("❗").red().for_stderr(), error);
    for hint in error.hints() {
        eprintln!("  -> {}", style(hint).cyan().for_stderr());
    }
}

/// The two-command usage summary.
pub fn usage(program: &str) -> String {
    format!("Usage:\n\t{} build\n\t{} publish\n", program, program)
}

pub fn display_usage(program: &str) {
    print!("{}", usage(program));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_lists_both_commands() {
        let text = usage("bin/release");
        assert!(text.starts_with("Usage:"));
        assert!(text.contains("bin/release build"));
        assert!(text.contains("bin/release publish"));
    }

    #[test]
    fn test_display_error_with_hints() {
        // Visual verification test - output is printed to stderr
        display_error(&ReleaseError::conflict("exists", "rm -rf releases/v1.0.0"));
    }
}
