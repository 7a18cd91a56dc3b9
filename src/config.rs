use crate::changelog::ChangelogStyle;
use crate::domain::{default_rules, BumpType, RuleBump, VersionRule};
use crate::error::{BumpError, Result};
use crate::notes::CommitLink;
use crate::preset::Preset;
use crate::resolver::StrategyName;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for git-bump.
///
/// Contains the first-release data, the bumping strategy, changelog style,
/// history paging limits and additional classification rules.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub initial_version: InitialVersionConfig,

    #[serde(default)]
    pub bumping_version_strategy: StrategyName,

    /// Link notes without PR/issue references to their commit
    #[serde(default = "default_true")]
    pub links_to_same_commit: bool,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    /// Repository used for commit links; taken from the `origin` remote when absent
    #[serde(default)]
    pub repository: Option<RepositoryConfig>,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Publishing preset name, see [`Preset::ALL`]
    #[serde(default)]
    pub preset: Option<String>,

    /// Replace the built-in fix/feat/BREAKING rules instead of extending them
    #[serde(default)]
    pub replace_default_rules: bool,

    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

fn default_true() -> bool {
    true
}

fn default_initial_version() -> String {
    "0.0.1".to_string()
}

fn default_initial_release_notes() -> String {
    "🎉 Initial release".to_string()
}

fn default_existing_release_notes() -> String {
    "🎉 First publish with automatic release tool".to_string()
}

fn default_page_size() -> usize {
    100
}

fn default_max_pages() -> usize {
    1000
}

/// Version and notes used when no release tag exists yet.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InitialVersionConfig {
    #[serde(default = "default_initial_version")]
    pub version: String,

    #[serde(default = "default_initial_release_notes")]
    pub release_notes: String,

    /// Notes when the package was already published before the first tag
    #[serde(default = "default_existing_release_notes")]
    pub release_notes_with_existing: String,
}

impl Default for InitialVersionConfig {
    fn default() -> Self {
        InitialVersionConfig {
            version: default_initial_version(),
            release_notes: default_initial_release_notes(),
            release_notes_with_existing: default_existing_release_notes(),
        }
    }
}

/// Changelog generator settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ChangelogConfig {
    #[serde(default)]
    pub style: ChangelogStyle,
}

/// GitHub-style repository coordinates.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    pub owner: String,
    pub repo: String,
}

/// Commit history paging.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HistoryConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Upper bound on fetched pages before the tag commit counts as unreachable
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            page_size: default_page_size(),
            max_pages: default_max_pages(),
        }
    }
}

/// Configuration for behavior customization.
///
/// Controls runtime behavior of git-bump without affecting version analysis.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Skip build and test steps of the publishing pipeline
    #[serde(default)]
    pub skip_scripts: bool,

    /// Dist-tag for `pnpm-monorepo` publishes
    #[serde(default = "default_publish_tag")]
    pub publish_tag: String,
}

fn default_publish_tag() -> String {
    "latest".to_string()
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            skip_scripts: false,
            publish_tag: default_publish_tag(),
        }
    }
}

/// An extra classification rule declared in the config file.
///
/// Exactly one of `conventional_type` and `pattern` must be set. `bump` is
/// `patch`, `minor`, `major` or `skip`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RuleConfig {
    #[serde(default)]
    pub conventional_type: Option<String>,

    #[serde(default)]
    pub pattern: Option<String>,

    pub bump: String,

    #[serde(default = "default_true")]
    pub starts_new: bool,

    #[serde(default = "default_true")]
    pub strip_marker: bool,

    #[serde(default)]
    pub notes_section: Option<String>,
}

impl RuleConfig {
    fn to_rule(&self) -> Result<VersionRule> {
        let bump = match self.bump.as_str() {
            "skip" => RuleBump::Skip,
            other => match other.parse::<BumpType>() {
                Ok(BumpType::None) | Err(_) => {
                    return Err(BumpError::config(format!(
                        "Rule bump must be patch, minor, major or skip, got '{}'",
                        other
                    )))
                }
                Ok(level) => RuleBump::Level(level),
            },
        };

        let mut rule = match (&self.conventional_type, &self.pattern) {
            (Some(commit_type), None) => VersionRule::conventional(commit_type.clone(), bump),
            (None, Some(pattern)) => {
                let regex = Regex::new(pattern).map_err(|e| {
                    BumpError::config(format!("Invalid rule pattern '{}': {}", pattern, e))
                })?;
                VersionRule::pattern(regex, bump)
            }
            _ => {
                return Err(BumpError::config(
                    "Rule needs exactly one of conventional_type or pattern",
                ))
            }
        };

        rule.starts_new = self.starts_new;
        rule.strip_by_regex = self.strip_marker;
        rule.notes_section = self.notes_section.clone();
        Ok(rule)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_version: InitialVersionConfig::default(),
            bumping_version_strategy: StrategyName::default(),
            links_to_same_commit: true,
            changelog: ChangelogConfig::default(),
            repository: None,
            history: HistoryConfig::default(),
            behavior: BehaviorConfig::default(),
            preset: None,
            replace_default_rules: false,
            rules: Vec::new(),
        }
    }
}

impl Config {
    /// The ordered classification table: built-in rules followed by configured ones
    pub fn version_rules(&self) -> Result<Vec<VersionRule>> {
        let mut rules = if self.replace_default_rules {
            Vec::new()
        } else {
            default_rules()
        };
        for rule in &self.rules {
            rules.push(rule.to_rule()?);
        }

        if rules.is_empty() {
            return Err(BumpError::config("No classification rules configured"));
        }
        Ok(rules)
    }

    /// Configured preset, rejecting unknown names
    pub fn preset(&self) -> Result<Option<Preset>> {
        self.preset.as_deref().map(str::parse::<Preset>).transpose()
    }

    /// How notes without references point at their commit
    pub fn commit_link(&self) -> CommitLink {
        match (&self.repository, self.links_to_same_commit) {
            (_, false) => CommitLink::Disabled,
            (Some(repo), true) => CommitLink::Markdown {
                owner: repo.owner.clone(),
                repo: repo.repo.clone(),
            },
            (None, true) => CommitLink::Bare,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitbump.toml` in current directory
/// 3. `.gitbump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitbump.toml").exists() {
        fs::read_to_string("./gitbump.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitbump.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse and validate configuration text
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| BumpError::config(e.to_string()))?;

    // surface bad rules and presets at load time
    config.version_rules()?;
    config.preset()?;
    if config.history.page_size == 0 || config.history.max_pages == 0 {
        return Err(BumpError::config(
            "history.page_size and history.max_pages must be positive",
        ));
    }
    Ok(config)
}
