//! Release-note text normalization for a single classified entry.

use crate::domain::BumpEntry;
use regex::Regex;
use std::sync::LazyLock;

static PR_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(#(\d+)\)$").expect("pr reference regex"));
static CLOSING_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:closes|fixes|resolves) #(\d+)").expect("closing reference regex")
});
static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank run regex"));

/// How a commit without PR/issue references is pointed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitLink {
    /// `` [`abcdef0`](https://github.com/owner/repo/commit/<sha>) ``
    Markdown { owner: String, repo: String },
    /// The full sha as plain text
    Bare,
    Disabled,
}

impl CommitLink {
    fn render(&self, sha: &str) -> Option<String> {
        match self {
            CommitLink::Markdown { owner, repo } => {
                let short = sha.get(..7).unwrap_or(sha);
                Some(format!(
                    "[`{}`](https://github.com/{}/{}/commit/{})",
                    short, owner, repo, sha
                ))
            }
            CommitLink::Bare => Some(sha.to_string()),
            CommitLink::Disabled => None,
        }
    }
}

/// Normalize the text of one entry.
///
/// A trailing `(#N)` pull-request reference and inline
/// `closes|fixes|resolves #N` references are pulled out of the body, runs of
/// blank lines are collapsed, every line is trimmed, and exactly one
/// reference suffix is re-appended: the PR, else the closed issues, else the
/// commit link.
pub fn normalize_message(message: &str, sha: Option<&str>, link: &CommitLink) -> String {
    let pr_number = PR_REF_RE
        .captures(message)
        .map(|caps| caps[1].to_string());
    let body = PR_REF_RE.replace(message, "");

    // issue numbers stay digit strings; any length is a valid reference
    let mut closed_issues: Vec<&str> = Vec::new();
    for caps in CLOSING_REF_RE.captures_iter(&body) {
        let number = caps.get(1).map_or("", |m| m.as_str());
        if !closed_issues.contains(&number) {
            closed_issues.push(number);
        }
    }
    let body = CLOSING_REF_RE.replace_all(&body, "");
    let body = BLANK_RUN_RE.replace_all(&body, "\n\n");

    let mut normalized = body
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");

    if let Some(pr) = pr_number {
        normalized.push_str(&format!(" (#{})", pr));
    } else if !closed_issues.is_empty() {
        let refs = closed_issues
            .iter()
            .map(|n| format!("#{}", n))
            .collect::<Vec<_>>()
            .join(", ");
        normalized.push_str(&format!(" ({})", refs));
    } else if let Some(suffix) = sha.filter(|s| !s.is_empty()).and_then(|s| link.render(s)) {
        normalized.push(' ');
        normalized.push_str(&suffix);
    }

    normalized.trim().to_string()
}

/// Final bullet text of an entry: normalized message with a bold scope prefix
pub fn render_entry(entry: &BumpEntry, sha: Option<&str>, link: &CommitLink) -> String {
    let message = normalize_message(&entry.raw_message, sha, link);
    match &entry.scope {
        Some(scope) => format!("**{}**: {}", scope, message),
        None => message,
    }
}
