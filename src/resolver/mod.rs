//! Version resolution: latest tag → history → classified notes → next version

pub mod strategy;

pub use strategy::{StrategyName, VersionMap};

use crate::analyzer::aggregate_commit;
use crate::config::Config;
use crate::domain::{find_latest_tag, BumpType, RawCommit, Version, VersionRule};
use crate::error::{BumpError, Result};
use crate::git::{ManifestSource, ReleaseSource};
use crate::history::HistoryWalker;
use crate::notes::{render_entry, CommitLink};
use tracing::{debug, info};

/// Options of a single resolution run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Prefix release tags carry, `v` by default
    pub tag_prefix: String,
    /// Prefix also accepted (and preferred per tag) in pre-release mode
    pub fallback_prefix: Option<String>,
    /// Skip history analysis and always bump patch
    pub auto_update: bool,
    /// Branch or revision whose history is walked; the default head when absent
    pub git_ref: Option<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            tag_prefix: "v".to_string(),
            fallback_prefix: None,
            auto_update: false,
            git_ref: None,
        }
    }
}

/// Release-note messages grouped by notes rule, in order of first use
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesByRule {
    groups: Vec<(String, Vec<String>)>,
}

impl NotesByRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: &str, message: String) {
        match self.groups.iter_mut().find(|(name, _)| name == rule) {
            Some((_, messages)) => messages.push(message),
            None => self.groups.push((rule.to_string(), vec![message])),
        }
    }

    pub fn get(&self, rule: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(name, _)| name == rule)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Release notes produced by a resolution run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseNotes {
    ByRule(NotesByRule),
    /// Fixed text used verbatim, e.g. for the first release
    RawOverride(String),
}

impl ReleaseNotes {
    /// Messages for a rule; `None` for raw overrides and unused rules
    pub fn messages(&self, rule: &str) -> Option<&[String]> {
        match self {
            ReleaseNotes::ByRule(notes) => notes.get(rule),
            ReleaseNotes::RawOverride(_) => None,
        }
    }
}

/// Outcome of [`resolve_next_version`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextVersionResult {
    pub bump_type: BumpType,
    /// `None` when no commit warranted a release
    pub next_version: Option<String>,
    pub commits_by_rule: ReleaseNotes,
    /// No tag yet, but the manifest already carries a published version
    pub using_in_existing_env: bool,
    pub latest_tag_commit_sha: Option<String>,
    pub latest_tag_name: Option<String>,
}

/// Classify commits (newest first) and collect their notes.
///
/// Returns the highest bump level seen across non-vetoed commits together
/// with the rendered messages grouped by notes rule.
pub fn analyze_commits(
    rules: &[VersionRule],
    commits: &[RawCommit],
    link: &CommitLink,
) -> Result<(BumpType, NotesByRule)> {
    let mut resolved_level = 0;
    let mut notes = NotesByRule::new();

    for commit in commits {
        let Some(entries) = aggregate_commit(rules, &commit.message) else {
            debug!(sha = ?commit.sha, "Commit vetoed by skip rule");
            continue;
        };

        for entry in entries {
            notes.push(
                &entry.notes_rule,
                render_entry(&entry, commit.sha.as_deref(), link),
            );
            resolved_level = resolved_level.max(entry.bump_level);
        }
    }

    let bump = BumpType::from_level(resolved_level).ok_or_else(|| {
        BumpError::version(format!("Unknown bump level {}", resolved_level))
    })?;
    Ok((bump, notes))
}

/// Resolve the next version and release notes from the latest release tag.
///
/// Without a matching tag the first-release data from the config is used
/// (or the manifest version, when the package was published before).
pub fn resolve_next_version<S, M>(
    source: &S,
    manifest: &M,
    config: &Config,
    options: &ResolveOptions,
) -> Result<NextVersionResult>
where
    S: ReleaseSource + ?Sized,
    M: ManifestSource + ?Sized,
{
    let tags = source.list_tags()?;
    let latest = find_latest_tag(
        &tags,
        &options.tag_prefix,
        options.fallback_prefix.as_deref(),
    );

    let Some((tag, prefix)) = latest else {
        return initial_release(manifest, config);
    };
    let tag_version = tag.version_part(prefix);
    debug!(tag = %tag.name, version = tag_version, sha = %tag.commit_sha, "Found latest tag");

    let mut result = if options.auto_update {
        let next = Version::parse(tag_version)?.bump(BumpType::Patch)?;
        NextVersionResult {
            bump_type: BumpType::Patch,
            next_version: Some(next.to_string()),
            commits_by_rule: ReleaseNotes::ByRule(NotesByRule::new()),
            using_in_existing_env: false,
            latest_tag_commit_sha: None,
            latest_tag_name: None,
        }
    } else {
        resolve_from_tag(
            source,
            config,
            tag_version,
            &tag.commit_sha,
            options.git_ref.as_deref(),
        )?
    };

    result.latest_tag_commit_sha = Some(tag.commit_sha.clone());
    result.latest_tag_name = Some(tag.name.clone());
    Ok(result)
}

/// Resolve against an already known tag version and commit
pub fn resolve_from_tag<S: ReleaseSource + ?Sized>(
    source: &S,
    config: &Config,
    tag_version: &str,
    tag_commit_sha: &str,
    git_ref: Option<&str>,
) -> Result<NextVersionResult> {
    let walker = HistoryWalker::new(config.history.page_size, config.history.max_pages);
    let commits = walker.commits_since(source, tag_commit_sha, git_ref)?;
    let rules = config.version_rules()?;

    let (resolved, notes) = analyze_commits(&rules, &commits, &config.commit_link())?;

    let mut bump_type = resolved;
    let mut next_version = None;
    if resolved != BumpType::None {
        let current = Version::parse(tag_version)?;
        bump_type = config.bumping_version_strategy.apply(resolved, &current);
        next_version = Some(current.bump(bump_type)?.to_string());
    }

    info!(
        commits = commits.len(),
        resolved = %resolved,
        bump = %bump_type,
        next = next_version.as_deref().unwrap_or("-"),
        "Resolved next version"
    );

    Ok(NextVersionResult {
        bump_type,
        next_version,
        commits_by_rule: ReleaseNotes::ByRule(notes),
        using_in_existing_env: false,
        latest_tag_commit_sha: None,
        latest_tag_name: None,
    })
}

fn initial_release<M: ManifestSource + ?Sized>(
    manifest: &M,
    config: &Config,
) -> Result<NextVersionResult> {
    let current = manifest.read_current_version()?;
    let initial = &config.initial_version;

    let result = match current {
        Some(version) if !version.starts_with("0.0.0") => {
            info!(version = %version, "No release tag found, package already versioned");
            NextVersionResult {
                bump_type: BumpType::None,
                next_version: Some(version),
                commits_by_rule: ReleaseNotes::RawOverride(
                    initial.release_notes_with_existing.clone(),
                ),
                using_in_existing_env: true,
                latest_tag_commit_sha: None,
                latest_tag_name: None,
            }
        }
        _ => {
            info!(version = %initial.version, "No release tag found, initial release");
            NextVersionResult {
                bump_type: BumpType::None,
                next_version: Some(initial.version.clone()),
                commits_by_rule: ReleaseNotes::RawOverride(initial.release_notes.clone()),
                using_in_existing_env: false,
                latest_tag_commit_sha: None,
                latest_tag_name: None,
            }
        }
    };
    Ok(result)
}
