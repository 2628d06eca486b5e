//! Domain logic - pure release rules independent of git, make or the host

pub mod artifact;
pub mod changelog;
pub mod tag;
pub mod version;

pub use changelog::latest_release_entry;
pub use tag::TagPattern;
pub use version::ReleaseVersion;
