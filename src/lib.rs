pub mod build;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod exec;
pub mod gate;
pub mod git;
pub mod host;
pub mod ui;
pub mod warning;

pub use error::{ReleaseError, Result};
