use std::process::{Command, Output};

use crate::error::{ReleaseError, Result};

/// Runs external tools (make, the release CLI, the built artifact).
pub struct CommandRunner;

impl CommandRunner {
    /// Runs `cmd` with inherited stdio and returns whether it exited 0.
    ///
    /// A command that cannot be started at all is an error; a non-zero exit
    /// is reported as `Ok(false)` so callers pick the error class.
    pub fn status(cmd: &mut Command) -> Result<bool> {
        tracing::debug!(command = ?cmd, "running");
        let status = cmd.status().map_err(|e| spawn_error(cmd, e))?;

        if !status.success() {
            tracing::debug!(command = ?cmd, code = ?status.code(), "command failed");
        }
        Ok(status.success())
    }

    /// Runs `cmd` capturing output. Non-zero exit is not an error here.
    pub fn output(cmd: &mut Command) -> Result<Output> {
        tracing::debug!(command = ?cmd, "running (captured)");
        cmd.output().map_err(|e| spawn_error(cmd, e))
    }

    /// Runs `cmd` capturing output and fails on non-zero exit.
    pub fn checked(cmd: &mut Command) -> Result<Output> {
        let output = Self::output(cmd)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(ReleaseError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!(
                    "{} failed with exit code {}\nStdout: {}\nStderr: {}",
                    program(cmd),
                    output.status.code().unwrap_or(-1),
                    stdout.trim(),
                    stderr.trim()
                ),
            )));
        }

        Ok(output)
    }
}

fn program(cmd: &Command) -> String {
    cmd.get_program().to_string_lossy().into_owned()
}

fn spawn_error(cmd: &Command, e: std::io::Error) -> ReleaseError {
    ReleaseError::Io(std::io::Error::new(
        e.kind(),
        format!("Failed to execute {}: {}", program(cmd), e),
    ))
}
