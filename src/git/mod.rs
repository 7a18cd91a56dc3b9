//! Collaborator abstraction for tags, commit history and manifest versions
//!
//! The resolution engine never talks to a hosting service or a repository
//! directly. It consumes the [ReleaseSource] and [ManifestSource] traits:
//!
//! - [repository::Git2Source]: local repository backed by the `git2` crate
//! - [mock::MockSource]: in-memory tags and commits for tests
//! - [crate::manifest::ManifestFile]: reads `package.json` / `Cargo.toml`

pub mod mock;
pub mod repository;

pub use mock::MockSource;
pub use repository::Git2Source;

use crate::domain::{RawCommit, Tag};
use crate::error::Result;

/// Read access to release tags and paged commit history
pub trait ReleaseSource {
    /// All tags, most recent first
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// One page of commit history, newest first.
    ///
    /// `page` is 1-based. `git_ref` selects the branch or revision to walk;
    /// `None` means the default head. Pages past the end of history are
    /// empty. Calling this repeatedly with the same arguments must be safe.
    fn list_commits(
        &self,
        git_ref: Option<&str>,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<RawCommit>>;
}

/// Access to the version currently declared by the package manifest
pub trait ManifestSource {
    /// The manifest version, or `None` when the manifest declares none
    fn read_current_version(&self) -> Result<Option<String>>;
}

/// A missing manifest declares no version
impl<T: ManifestSource> ManifestSource for Option<T> {
    fn read_current_version(&self) -> Result<Option<String>> {
        match self {
            Some(manifest) => manifest.read_current_version(),
            None => Ok(None),
        }
    }
}
