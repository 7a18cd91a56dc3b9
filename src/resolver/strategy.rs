use crate::domain::{BumpType, Version};
use serde::{Deserialize, Serialize};

/// Named bumping strategy selected in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyName {
    /// Plain semver, no remapping
    None,
    /// While the major version is 0, every bump moves one level down:
    /// `0.0.1 -> BREAKING -> 0.1.0`, `0.1.0 -> feat -> 0.1.1`
    #[default]
    SemverUnstable,
    /// Always one level down, at any major version:
    /// `2.0.1 -> BREAKING -> 2.1.0`
    Unstable,
    /// Everything is a patch: `0.0.1 -> BREAKING -> 0.0.2`
    TooUnstable,
}

/// Remapping table for resolved bump types
#[derive(Debug, Clone, Copy)]
pub struct VersionMap {
    pub major: BumpType,
    pub minor: BumpType,
    pub patch: BumpType,
    /// Restricts the map to some current versions; always applicable when absent
    pub is_applicable: Option<fn(&Version) -> bool>,
}

impl VersionMap {
    pub fn applies_to(&self, current: &Version) -> bool {
        self.is_applicable.map_or(true, |check| check(current))
    }

    pub fn remap(&self, bump: BumpType) -> BumpType {
        match bump {
            BumpType::None => BumpType::None,
            BumpType::Patch => self.patch,
            BumpType::Minor => self.minor,
            BumpType::Major => self.major,
        }
    }
}

fn major_is_zero(version: &Version) -> bool {
    version.major() == 0
}

impl StrategyName {
    pub fn version_map(self) -> Option<VersionMap> {
        match self {
            StrategyName::None => None,
            StrategyName::SemverUnstable => Some(VersionMap {
                major: BumpType::Minor,
                minor: BumpType::Patch,
                patch: BumpType::Patch,
                is_applicable: Some(major_is_zero as fn(&Version) -> bool),
            }),
            StrategyName::Unstable => Some(VersionMap {
                major: BumpType::Minor,
                minor: BumpType::Patch,
                patch: BumpType::Patch,
                is_applicable: None,
            }),
            StrategyName::TooUnstable => Some(VersionMap {
                major: BumpType::Patch,
                minor: BumpType::Patch,
                patch: BumpType::Patch,
                is_applicable: None,
            }),
        }
    }

    /// Remap a resolved bump for a release currently at `current`
    pub fn apply(self, bump: BumpType, current: &Version) -> BumpType {
        if bump == BumpType::None {
            return bump;
        }
        match self.version_map() {
            Some(map) if map.applies_to(current) => map.remap(bump),
            _ => bump,
        }
    }
}
