//! Workflow wiring
//!
//! Connects a parsed [Command] to a [ReleaseGate] backed by the real
//! collaborators. [run_with] takes the collaborators as arguments so the
//! whole flow can also be driven with mocks.

use crate::build::{BuildSystem, Make};
use crate::cli::Command;
use crate::config::ReleaseConfig;
use crate::error::Result;
use crate::gate::{GateReport, ReleaseGate};
use crate::git::{Git2Repository, Vcs};
use crate::host::{GithubRelease, ReleaseHost};

/// Runs `command` against the repository in the current directory.
pub fn run_workflow(command: &Command, config: &ReleaseConfig) -> Result<GateReport> {
    let vcs = Git2Repository::open(".")?;
    let builder = Make::new(config.make.clone());
    let host = GithubRelease::new(
        config.release_tool.clone(),
        config.github_user.clone(),
        config.repository.clone(),
    );

    run_with(command, config, &vcs, &builder, &host)
}

pub fn run_with<V, B, H>(
    command: &Command,
    config: &ReleaseConfig,
    vcs: &V,
    builder: &B,
    host: &H,
) -> Result<GateReport>
where
    V: Vcs,
    B: BuildSystem,
    H: ReleaseHost,
{
    let gate = ReleaseGate::new(config, vcs, builder, host);
    match command {
        Command::Build => gate.build(),
        Command::Publish { dry_run } => gate.publish(*dry_run),
    }
}
