//! Markdown release notes rendered from classified commit notes.

use crate::config::ChangelogConfig;
use crate::domain::BumpType;
use crate::resolver::ReleaseNotes;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static METADATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!-- bump-type:(\w+)(?: npm:(\S+))? -->").expect("metadata regex")
});
static BARE_SHA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ([\da-f]{40})\b").expect("sha regex"));
static ISSUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+)\b").expect("issue regex"));

/// Heading set used for the notes sections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangelogStyle {
    #[default]
    Default,
    Plain,
    Semver,
    Prisma,
    Gitmoji,
}

/// Section heading and its sort key; lower orders come first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteHeading {
    pub heading: String,
    pub order: i32,
}

impl NoteHeading {
    fn new(heading: &str, order: i32) -> Self {
        NoteHeading {
            heading: heading.to_string(),
            order,
        }
    }
}

impl ChangelogStyle {
    /// Heading for a notes rule; rules outside patch/minor/major get a plain `###` heading
    pub fn heading_for(self, rule: &str) -> NoteHeading {
        let (patch, minor, major) = match self {
            ChangelogStyle::Default => (
                "### Bug Fixes",
                "### New Features",
                "## 💥 BREAKING CHANGES",
            ),
            ChangelogStyle::Plain => ("### Bug Fixes", "### New Features", "## BREAKING CHANGES"),
            ChangelogStyle::Semver => ("### Patch Changes", "### Minor Changes", "## Major Changes"),
            ChangelogStyle::Prisma => (
                "### Patch Changes",
                "### Major improvements & new features",
                "# Breaking Changes",
            ),
            ChangelogStyle::Gitmoji => (
                "### 🐛 Bug Fixes",
                "## ✨ New Features",
                "# 💥 Breaking Changes",
            ),
        };

        match rule {
            "patch" => NoteHeading::new(patch, 0),
            "minor" => NoteHeading::new(minor, -1),
            "major" => NoteHeading::new(major, -2),
            other => NoteHeading::new(&format!("### {}", other), 0),
        }
    }
}

/// Values written into the metadata comment heading the notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogMetadata {
    pub bump_type: BumpType,
    /// Set for npm-flavored presets
    pub package_name: Option<String>,
}

impl ChangelogMetadata {
    fn render(&self) -> String {
        match &self.package_name {
            Some(name) => format!("<!-- bump-type:{} npm:{} -->", self.bump_type, name),
            None => format!("<!-- bump-type:{} -->", self.bump_type),
        }
    }
}

/// Metadata read back from a stored release body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseMetadata {
    pub bump_type: BumpType,
    pub package_name: Option<String>,
}

impl ReleaseMetadata {
    /// Parse the `<!-- bump-type:X npm:Y -->` line; `None` when absent or unknown
    pub fn parse(body: &str) -> Option<Self> {
        let caps = METADATA_RE.captures(body)?;
        let bump_type = caps[1].parse::<BumpType>().ok()?;
        Some(ReleaseMetadata {
            bump_type,
            package_name: caps.get(2).map(|m| m.as_str().to_string()),
        })
    }
}

/// Render release notes as markdown.
///
/// Raw overrides are returned verbatim. Otherwise each notes rule becomes a
/// `heading` block with one `- ` bullet per message; blocks are ordered by
/// heading order, keeping first-use order for equal orders.
pub fn render_changelog(
    notes: &ReleaseNotes,
    metadata: &ChangelogMetadata,
    config: &ChangelogConfig,
) -> String {
    let by_rule = match notes {
        ReleaseNotes::RawOverride(text) => return text.clone(),
        ReleaseNotes::ByRule(by_rule) => by_rule,
    };

    let mut blocks: Vec<(i32, String)> = by_rule
        .iter()
        .map(|(rule, messages)| {
            let heading = config.style.heading_for(rule);
            let bullets = messages
                .iter()
                .map(|message| format!("- {}", message))
                .collect::<Vec<_>>()
                .join("\n");
            (heading.order, format!("{}\n\n{}", heading.heading, bullets))
        })
        .collect();
    blocks.sort_by_key(|(order, _)| *order);

    let body = blocks
        .into_iter()
        .map(|(_, block)| block)
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n{}", metadata.render(), body)
}

/// Link bare commit shas and `#N` references in a release body to `repo_url`
pub fn link_references(body: &str, repo_url: &str) -> String {
    let repo_url = repo_url.trim_end_matches('/');
    let with_commits = BARE_SHA_RE.replace_all(body, |caps: &Captures| {
        let sha = &caps[1];
        format!(" [`{}`]({}/commit/{})", &sha[..7], repo_url, sha)
    });

    ISSUE_RE
        .replace_all(&with_commits, |caps: &Captures| {
            format!("[{}]({}/issues/{})", &caps[0], repo_url, &caps[1])
        })
        .into_owned()
}

/// A release already published on the hosting service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRelease {
    pub name: String,
    pub tag_name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub description: String,
}

/// Assemble a changelog document from published releases, newest first
pub fn render_release_history(releases: &[PublishedRelease], repo_url: &str) -> String {
    let repo_url = repo_url.trim_end_matches('/');
    let mut markdown = String::new();
    for release in releases {
        markdown.push_str(&format!(
            "\n## [{}]({}/releases/tag/{}) - {}\n{}",
            release.name,
            repo_url,
            release.tag_name,
            release.date,
            link_references(&release.description, repo_url)
        ));
    }
    markdown
}
