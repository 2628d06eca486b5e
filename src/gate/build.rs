use crate::build::{BuildSystem, BuildVars};
use crate::domain::artifact::reported_version;
use crate::domain::changelog::check_changelog;
use crate::error::{ReleaseError, Result};
use crate::git::Vcs;
use crate::host::ReleaseHost;
use crate::ui;

use super::{run_steps, GateReport, ReleaseContext, ReleaseGate, Step};

impl<'a, V, B, H> ReleaseGate<'a, V, B, H>
where
    V: Vcs,
    B: BuildSystem,
    H: ReleaseHost,
{
    /// Checks a release must pass before its build output is trusted, in order.
    pub fn build_steps() -> Vec<Step<Self>> {
        vec![
            Step::new("release directory is free", Self::check_release_dir_free),
            Step::new("checked out release tag", Self::checkout_release),
            Step::new("changelog matches version", Self::check_changelog_entry),
            Step::new("build and tests passed", Self::build_and_test),
            Step::new("artifact reports version", Self::check_artifact_version),
        ]
    }

    /// Checks out, verifies, builds and tests the resolved release into its
    /// release directory.
    ///
    /// On failure the release directory is left as it is for inspection.
    pub fn build(&self) -> Result<GateReport> {
        let ctx = self.setup()?;
        ui::display_status(&format!(
            "Building {} for version {} in {}",
            ctx.version.tag(),
            ctx.version,
            ctx.release_dir.display()
        ));

        let warnings = self.warnings(&ctx);
        let passed = run_steps(self, &ctx, &Self::build_steps())?;

        ui::display_success(&format!("Build OK: {}", ctx.release_dir.display()));
        Ok(GateReport {
            context: ctx,
            passed,
            warnings,
            actions: Vec::new(),
            dry_run: false,
        })
    }

    fn check_release_dir_free(&self, ctx: &ReleaseContext) -> Result<()> {
        if ctx.release_dir.exists() {
            return Err(ReleaseError::conflict(
                format!(
                    "Release directory {} already exists, you may want to",
                    ctx.release_dir.display()
                ),
                format!("rm -rf {}", ctx.release_dir.display()),
            ));
        }
        Ok(())
    }

    fn checkout_release(&self, ctx: &ReleaseContext) -> Result<()> {
        self.vcs.checkout(ctx.version.tag(), &ctx.release_dir)
    }

    fn check_changelog_entry(&self, ctx: &ReleaseContext) -> Result<()> {
        check_changelog(
            &ctx.release_dir.join(&self.config.changelog),
            ctx.version.as_str(),
        )
    }

    fn build_and_test(&self, ctx: &ReleaseContext) -> Result<()> {
        let vars = BuildVars::new(self.config, ctx.version.as_str());
        self.builder.build(&ctx.release_dir, &vars)?;
        self.builder.run_tests(&ctx.release_dir, &vars)
    }

    fn check_artifact_version(&self, ctx: &ReleaseContext) -> Result<()> {
        let artifact = ctx.release_dir.join(&self.config.artifact);
        let output = self.builder.artifact_version(&artifact)?;

        let reported = reported_version(&output).ok_or_else(|| {
            ReleaseError::validation(format!(
                "{} --version printed nothing; expected {}",
                artifact.display(),
                ctx.version
            ))
        })?;

        if reported != ctx.version.as_str() {
            return Err(ReleaseError::mismatch(
                &format!("{} version", self.config.artifact),
                reported,
                ctx.version.as_str(),
            ));
        }
        Ok(())
    }
}
