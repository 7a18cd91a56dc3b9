use crate::domain::BumpType;
use crate::error::{BumpError, Result};
use semver::{BuildMetadata, Prerelease};
use std::fmt;

/// Semantic version of a release, including optional pre-release identifiers
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    inner: semver::Version,
}

impl Version {
    /// Create a new release version without pre-release identifiers
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            inner: semver::Version::new(major, minor, patch),
        }
    }

    /// Parse a version string as found after a tag prefix (e.g., "1.2.3", "2.0.0-beta.1").
    ///
    /// Surrounding whitespace and a single leading `v` or `=` are tolerated.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let clean = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('='))
            .unwrap_or(trimmed);

        let inner = semver::Version::parse(clean)
            .map_err(|e| BumpError::version(format!("Invalid version '{}': {}", raw, e)))?;

        Ok(Version { inner })
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    pub fn is_prerelease(&self) -> bool {
        !self.inner.pre.is_empty()
    }

    /// Increment the version for the given bump.
    ///
    /// A pre-release completes to its release version when it already sits at
    /// the bumped boundary (`2.0.0-rc.1` + major = `2.0.0`). Pre-release and
    /// build identifiers are always dropped. `BumpType::None` returns the
    /// version unchanged.
    pub fn bump(&self, bump: BumpType) -> Result<Self> {
        let current = &self.inner;
        let pre = self.is_prerelease();

        let (major, minor, patch) = match bump {
            BumpType::None => return Ok(self.clone()),
            BumpType::Major => {
                if pre && current.minor == 0 && current.patch == 0 {
                    (current.major, 0, 0)
                } else {
                    (increment(current.major)?, 0, 0)
                }
            }
            BumpType::Minor => {
                if pre && current.patch == 0 {
                    (current.major, current.minor, 0)
                } else {
                    (current.major, increment(current.minor)?, 0)
                }
            }
            BumpType::Patch => {
                if pre {
                    (current.major, current.minor, current.patch)
                } else {
                    (current.major, current.minor, increment(current.patch)?)
                }
            }
        };

        Ok(Version {
            inner: semver::Version {
                major,
                minor,
                patch,
                pre: Prerelease::EMPTY,
                build: BuildMetadata::EMPTY,
            },
        })
    }
}

fn increment(component: u64) -> Result<u64> {
    component
        .checked_add(1)
        .ok_or_else(|| BumpError::version("Just bumped version is invalid"))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}
