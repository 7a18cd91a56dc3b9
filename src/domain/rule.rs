use crate::domain::BumpType;
use regex::Regex;

/// How a rule recognises a commit line
#[derive(Debug, Clone)]
pub enum RuleMatcher {
    /// Matches conventional headers (`type(scope): ...`) of this type
    ConventionalType(String),
    /// Matches anywhere in the raw line
    Pattern(Regex),
}

/// What a matching rule does to the version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleBump {
    /// Drop the whole commit from release notes and version resolution
    Skip,
    Level(BumpType),
}

/// One entry of the ordered classification table
#[derive(Debug, Clone)]
pub struct VersionRule {
    pub matches: RuleMatcher,
    /// Start a new notes entry instead of extending the current one
    pub starts_new: bool,
    pub bump: RuleBump,
    /// Remove the matched marker from the note text
    pub strip_by_regex: bool,
    /// Notes section name; the bump name is used when absent
    pub notes_section: Option<String>,
}

impl VersionRule {
    /// Rule matching a conventional commit type
    pub fn conventional(commit_type: impl Into<String>, bump: RuleBump) -> Self {
        VersionRule {
            matches: RuleMatcher::ConventionalType(commit_type.into()),
            starts_new: true,
            bump,
            strip_by_regex: true,
            notes_section: None,
        }
    }

    /// Rule matching a free-form pattern
    pub fn pattern(regex: Regex, bump: RuleBump) -> Self {
        VersionRule {
            matches: RuleMatcher::Pattern(regex),
            starts_new: true,
            bump,
            strip_by_regex: true,
            notes_section: None,
        }
    }

    pub fn continues_entry(mut self) -> Self {
        self.starts_new = false;
        self
    }

    pub fn keep_marker(mut self) -> Self {
        self.strip_by_regex = false;
        self
    }

    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.notes_section = Some(section.into());
        self
    }

    /// Name of the release-notes group this rule feeds
    pub fn notes_rule(&self) -> String {
        match (&self.notes_section, self.bump) {
            (Some(section), _) => section.clone(),
            (None, RuleBump::Level(bump)) => bump.to_string(),
            (None, RuleBump::Skip) => "skip".to_string(),
        }
    }
}

/// Built-in classification table: `fix` → patch, `feat` → minor and a
/// `BREAKING` marker that escalates the current entry to major.
pub fn default_rules() -> Vec<VersionRule> {
    vec![
        VersionRule::conventional("fix", RuleBump::Level(BumpType::Patch)),
        VersionRule::conventional("feat", RuleBump::Level(BumpType::Minor)),
        VersionRule::pattern(
            Regex::new(r"BREAKING( CHANGE)?:?").expect("static regex"),
            RuleBump::Level(BumpType::Major),
        )
        .continues_entry(),
    ]
}
