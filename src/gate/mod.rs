//! Release resolver and gate
//!
//! [ReleaseGate::setup] resolves the release from the repository's tags.
//! [ReleaseGate::build] and [ReleaseGate::publish] then run an ordered list of
//! [step::Step]s against that context and stop at the first failure. Publish
//! performs no mutating action until every one of its checks has passed.

pub mod build;
pub mod publish;
pub mod step;

pub use publish::PublishAction;
pub use step::{run_steps, Step};

use std::path::PathBuf;

use crate::build::BuildSystem;
use crate::config::ReleaseConfig;
use crate::domain::ReleaseVersion;
use crate::error::{ReleaseError, Result};
use crate::git::Vcs;
use crate::host::ReleaseHost;
use crate::ui;
use crate::warning::GateWarning;

/// Everything resolved once per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseContext {
    pub version: ReleaseVersion,
    /// Commit the release tag points at
    pub tag_commit: String,
    /// Commit the floating tag points at
    pub floating_commit: String,
    pub release_dir: PathBuf,
}

/// Outcome of a gate that passed.
#[derive(Debug, Clone, PartialEq)]
pub struct GateReport {
    pub context: ReleaseContext,
    /// Names of the checks that passed, in order
    pub passed: Vec<&'static str>,
    pub warnings: Vec<GateWarning>,
    /// Publish actions performed, or planned on a dry run
    pub actions: Vec<PublishAction>,
    pub dry_run: bool,
}

/// The release gate, wired to its collaborators.
pub struct ReleaseGate<'a, V, B, H> {
    config: &'a ReleaseConfig,
    vcs: &'a V,
    builder: &'a B,
    host: &'a H,
}

impl<'a, V, B, H> ReleaseGate<'a, V, B, H>
where
    V: Vcs,
    B: BuildSystem,
    H: ReleaseHost,
{
    pub fn new(config: &'a ReleaseConfig, vcs: &'a V, builder: &'a B, host: &'a H) -> Self {
        ReleaseGate {
            config,
            vcs,
            builder,
            host,
        }
    }

    /// Resolves the release tag, its version and the commits of both tags.
    ///
    /// # Errors
    /// * `Resolution` - no matching annotated tag, or either tag does not
    ///   resolve to a commit
    pub fn setup(&self) -> Result<ReleaseContext> {
        let tag = self.vcs.resolve_tag(&self.config.tag_pattern)?;
        let version = ReleaseVersion::from_tag(&tag)?;
        let tag_commit = self.vcs.commit_of(&tag)?;

        let floating = &self.config.floating_tag;
        let floating_commit = self.vcs.commit_of(floating).map_err(|e| {
            ReleaseError::resolution(format!("floating tag '{}' is unusable: {}", floating, e))
        })?;

        let release_dir = self.config.release_dir(&tag);
        tracing::info!(
            tag = %tag,
            version = %version,
            commit = %tag_commit,
            floating_commit = %floating_commit,
            "resolved release"
        );

        Ok(ReleaseContext {
            version,
            tag_commit,
            floating_commit,
            release_dir,
        })
    }

    /// Non-fatal findings about the resolved release.
    ///
    /// Release tags are not required to sit on the mainline branch; a tag
    /// that does not is reported here so the operator can decide.
    pub fn warnings(&self, ctx: &ReleaseContext) -> Vec<GateWarning> {
        let mut warnings = Vec::new();

        if !ctx.version.is_semver() {
            warnings.push(GateWarning::NonSemverVersion {
                version: ctx.version.to_string(),
            });
        }

        let branch = &self.config.mainline;
        match self.vcs.is_ancestor(&ctx.tag_commit, branch) {
            Ok(true) => {}
            Ok(false) => warnings.push(GateWarning::TagNotOnMainline {
                tag: ctx.version.tag().to_string(),
                commit: ctx.tag_commit.clone(),
                branch: branch.clone(),
            }),
            Err(e) => warnings.push(GateWarning::MainlineUnresolved {
                branch: branch.clone(),
                reason: e.to_string(),
            }),
        }

        for warning in &warnings {
            tracing::warn!(%warning, "release warning");
            ui::display_warning(warning);
        }
        warnings
    }
}
