//! Domain logic - pure release rules independent of where history comes from

pub mod bump;
pub mod commit;
pub mod rule;
pub mod tag;
pub mod version;

pub use bump::BumpType;
pub use commit::{BumpEntry, RawCommit};
pub use rule::{default_rules, RuleBump, RuleMatcher, VersionRule};
pub use tag::{find_latest_tag, Tag};
pub use version::Version;
