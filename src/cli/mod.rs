//! Command-line surface: two subcommands and a couple of global flags.

pub mod orchestration;

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "release",
    version,
    about = "Build and publish versioned releases from annotated git tags",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Log collaborator calls to stderr")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check out, verify, build and test the latest release tag
    Build,
    /// Verify remote state and publish an already-built release
    Publish {
        #[arg(long, help = "Run every check but only report the publish actions")]
        dry_run: bool,
    },
}

/// What the process should do after looking at its arguments.
#[derive(Debug)]
pub enum Invocation {
    Run {
        command: Command,
        config: Option<String>,
        verbose: bool,
    },
    /// No or unrecognised arguments: print usage, exit successfully
    Usage,
    /// `--help` or `--version` output rendered by clap
    Info(clap::Error),
}

/// Interprets the raw arguments (including the program name).
pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(Cli {
            command: Some(command),
            config,
            verbose,
        }) => Invocation::Run {
            command,
            config,
            verbose,
        },
        Ok(_) => Invocation::Usage,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Info(e)
        }
        Err(_) => Invocation::Usage,
    }
}
