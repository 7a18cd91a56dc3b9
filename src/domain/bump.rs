use crate::error::{BumpError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a version change.
///
/// Ordering follows priority: `None < Patch < Minor < Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    None,
    Patch,
    Minor,
    Major,
}

impl BumpType {
    /// Numeric priority of this bump (0..=3)
    pub fn level(self) -> u8 {
        match self {
            BumpType::None => 0,
            BumpType::Patch => 1,
            BumpType::Minor => 2,
            BumpType::Major => 3,
        }
    }

    /// Map a numeric priority back to a bump type
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(BumpType::None),
            1 => Some(BumpType::Patch),
            2 => Some(BumpType::Minor),
            3 => Some(BumpType::Major),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BumpType::None => "none",
            BumpType::Patch => "patch",
            BumpType::Minor => "minor",
            BumpType::Major => "major",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpType {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(BumpType::None),
            "patch" => Ok(BumpType::Patch),
            "minor" => Ok(BumpType::Minor),
            "major" => Ok(BumpType::Major),
            other => Err(BumpError::version(format!("Unknown bump type: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(BumpType::None < BumpType::Patch);
        assert!(BumpType::Patch < BumpType::Minor);
        assert!(BumpType::Minor < BumpType::Major);
    }

    #[test]
    fn test_level_round_trip() {
        for bump in [
            BumpType::None,
            BumpType::Patch,
            BumpType::Minor,
            BumpType::Major,
        ] {
            assert_eq!(BumpType::from_level(bump.level()), Some(bump));
        }
        assert_eq!(BumpType::from_level(4), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("minor".parse::<BumpType>().unwrap(), BumpType::Minor);
        assert!("huge".parse::<BumpType>().is_err());
        assert_eq!(BumpType::Major.to_string(), "major");
    }
}
