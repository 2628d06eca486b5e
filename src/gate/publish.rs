use std::fmt;
use std::path::PathBuf;

use crate::build::{BuildSystem, BuildVars};
use crate::error::{ReleaseError, Result};
use crate::git::Vcs;
use crate::host::ReleaseHost;
use crate::ui;

use super::{run_steps, GateReport, ReleaseContext, ReleaseGate, Step};

/// A mutating step of a publish, in the order it is carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishAction {
    /// Build-system `publish` target: container images tagged with the version
    PublishImages { version: String },
    CreateRelease {
        tag: String,
        name: String,
        description: String,
    },
    UploadAsset { tag: String, name: String },
    DeleteRelease { tag: String },
}

impl fmt::Display for PublishAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishAction::PublishImages { version } => {
                write!(f, "Publish container images for {}", version)
            }
            PublishAction::CreateRelease { tag, name, .. } => {
                write!(f, "Create release {} \"{}\"", tag, name)
            }
            PublishAction::UploadAsset { tag, name } => {
                write!(f, "Upload {} to release {}", name, tag)
            }
            PublishAction::DeleteRelease { tag } => write!(f, "Delete release {}", tag),
        }
    }
}

impl<'a, V, B, H> ReleaseGate<'a, V, B, H>
where
    V: Vcs,
    B: BuildSystem,
    H: ReleaseHost,
{
    /// Checks that must all pass before anything is published, in order.
    /// Local checks come first so a stale floating tag fails without
    /// touching the network.
    pub fn publish_steps() -> Vec<Step<Self>> {
        vec![
            Step::new("release build present", Self::check_build_present),
            Step::new("floating tag matches release tag", Self::check_floating_aligned),
            Step::new("release tag pushed", Self::check_tag_pushed),
            Step::new("floating tag pushed", Self::check_floating_pushed),
            Step::new("no existing release", Self::check_no_release),
        ]
    }

    /// Publishes an already-built release.
    ///
    /// With `dry_run` every check still runs but the actions are only
    /// reported.
    pub fn publish(&self, dry_run: bool) -> Result<GateReport> {
        let ctx = self.setup()?;
        ui::display_status(&format!("Checking {} is ready to publish", ctx.version.tag()));

        let warnings = self.warnings(&ctx);
        let passed = run_steps(self, &ctx, &Self::publish_steps())?;
        let actions = self.plan(&ctx)?;

        for action in &actions {
            if dry_run {
                ui::display_status(&format!("Would {}", action));
                continue;
            }
            ui::display_status(&action.to_string());
            self.perform(&ctx, action)?;
        }

        if !dry_run {
            ui::display_success(&format!("Published {}", ctx.version.tag()));
        }
        Ok(GateReport {
            context: ctx,
            passed,
            warnings,
            actions,
            dry_run,
        })
    }

    /// Actions a publish performs. The floating release is deleted only if
    /// it currently exists.
    pub fn plan(&self, ctx: &ReleaseContext) -> Result<Vec<PublishAction>> {
        let tag = ctx.version.tag().to_string();
        let floating = self.config.floating_tag.clone();
        let asset = self.config.artifact.clone();
        let version = ctx.version.as_str();

        let mut actions = vec![
            PublishAction::PublishImages {
                version: version.to_string(),
            },
            PublishAction::CreateRelease {
                tag: tag.clone(),
                name: self.config.release_name_for(version),
                description: self.config.release_description_for(version),
            },
            PublishAction::UploadAsset {
                tag,
                name: asset.clone(),
            },
        ];

        if self.host.release_exists(&floating)? {
            actions.push(PublishAction::DeleteRelease {
                tag: floating.clone(),
            });
        }

        actions.push(PublishAction::CreateRelease {
            tag: floating.clone(),
            name: self.config.latest_release_name_for(version),
            description: self.config.release_description_for(version),
        });
        actions.push(PublishAction::UploadAsset {
            tag: floating,
            name: asset,
        });

        Ok(actions)
    }

    fn artifact_path(&self, ctx: &ReleaseContext) -> PathBuf {
        ctx.release_dir.join(&self.config.artifact)
    }

    fn perform(&self, ctx: &ReleaseContext, action: &PublishAction) -> Result<()> {
        match action {
            PublishAction::PublishImages { version } => {
                let vars = BuildVars::new(self.config, version);
                self.builder.publish(&ctx.release_dir, &vars)
            }
            PublishAction::CreateRelease {
                tag,
                name,
                description,
            } => self.host.create_release(tag, name, description),
            PublishAction::UploadAsset { tag, name } => {
                self.host.upload_asset(tag, name, &self.artifact_path(ctx))
            }
            PublishAction::DeleteRelease { tag } => self.host.delete_release(tag),
        }
    }

    fn check_build_present(&self, ctx: &ReleaseContext) -> Result<()> {
        let artifact = self.artifact_path(ctx);
        if !ctx.release_dir.is_dir() || !artifact.is_file() {
            return Err(ReleaseError::build(format!(
                "No release build at {}; run the build command first",
                artifact.display()
            )));
        }
        Ok(())
    }

    fn check_floating_aligned(&self, ctx: &ReleaseContext) -> Result<()> {
        if ctx.tag_commit != ctx.floating_commit {
            let floating = &self.config.floating_tag;
            return Err(ReleaseError::conflict(
                format!(
                    "The tag {} ({}) does not point to the same commit as {} ({})",
                    floating,
                    ctx.floating_commit,
                    ctx.version.tag(),
                    ctx.tag_commit
                ),
                format!("git tag -af {} {}", floating, ctx.version.tag()),
            ));
        }
        Ok(())
    }

    fn check_tag_pushed(&self, ctx: &ReleaseContext) -> Result<()> {
        let url = self.config.remote_url();
        let tag = ctx.version.tag();

        if !self.vcs.tag_exists_remote(&url, tag, &ctx.tag_commit)? {
            return Err(ReleaseError::remote_state(
                format!(
                    "Tag {} is not on {}, or is not the same as the local tag",
                    tag, url
                ),
                vec![format!("git push {} {}", url, tag)],
            ));
        }
        Ok(())
    }

    fn check_floating_pushed(&self, ctx: &ReleaseContext) -> Result<()> {
        let url = self.config.remote_url();
        let floating = &self.config.floating_tag;

        if !self
            .vcs
            .tag_exists_remote(&url, floating, &ctx.floating_commit)?
        {
            return Err(ReleaseError::remote_state(
                format!(
                    "Tag {} is not on {}, or is not the same as the local tag",
                    floating, url
                ),
                vec![
                    format!("git tag -af {} {}", floating, ctx.version.tag()),
                    format!("git push -f {} {}", url, floating),
                ],
            ));
        }
        Ok(())
    }

    fn check_no_release(&self, ctx: &ReleaseContext) -> Result<()> {
        let tag = ctx.version.tag();
        if self.host.release_exists(tag)? {
            return Err(ReleaseError::conflict(
                format!("Release {} already exists", tag),
                self.config.release_page(tag),
            ));
        }
        Ok(())
    }
}
