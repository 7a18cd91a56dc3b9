//! Pure formatting functions for UI output.
//!
//! `format_*` functions build the text, `display_*` functions print it.

use console::style;

use crate::preset::{Preset, PublishStep};
use crate::resolver::{NextVersionResult, ReleaseNotes};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Plain-text summary of a version decision.
///
/// Shows either:
/// - `From: v1.2.3 -> To: 1.3.0 (minor)` when a release tag was found
/// - `Initial version: 0.0.1` when no tag exists yet
/// - `Nothing to release since v1.2.3` when no commit warranted a bump
pub fn format_version_decision(result: &NextVersionResult) -> String {
    match (&result.latest_tag_name, &result.next_version) {
        (Some(tag), Some(next)) => {
            format!("From: {} -> To: {} ({})", tag, next, result.bump_type)
        }
        (Some(tag), None) => format!("Nothing to release since {}", tag),
        (None, Some(next)) if result.using_in_existing_env => {
            format!("Existing version: {} (no release tag yet)", next)
        }
        (None, Some(next)) => format!("Initial version: {}", next),
        (None, None) => "Nothing to release".to_string(),
    }
}

/// Count of release-note entries per section, e.g. `minor: 2, patch: 1`
pub fn format_notes_summary(notes: &ReleaseNotes) -> Option<String> {
    match notes {
        ReleaseNotes::RawOverride(_) => None,
        ReleaseNotes::ByRule(by_rule) if by_rule.is_empty() => None,
        ReleaseNotes::ByRule(by_rule) => Some(
            by_rule
                .iter()
                .map(|(rule, messages)| format!("{}: {}", rule, messages.len()))
                .collect::<Vec<_>>()
                .join(", "),
        ),
    }
}

/// Display the resolved version and a short notes summary.
pub fn display_version_decision(result: &NextVersionResult) {
    println!("\n{}", style("Version decision:").bold());
    println!("  {}", style(format_version_decision(result)).green());
    if let Some(summary) = format_notes_summary(&result.commits_by_rule) {
        println!("  Entries: {}", summary);
    }
}

/// Display rendered release notes under a heading.
pub fn display_changelog(changelog: &str) {
    println!("\n{}", style("Release notes:").bold().underlined());
    println!("{}", changelog);
}

/// Numbered publishing steps of a preset, or a note when there are none
pub fn format_publish_plan(preset: Preset, steps: &[PublishStep]) -> String {
    if steps.is_empty() {
        return format!("Preset {}: nothing to run", preset);
    }

    let mut lines = vec![format!("Preset {}:", preset)];
    for (index, step) in steps.iter().enumerate() {
        lines.push(format!("  {}. {}", index + 1, step));
    }
    lines.join("\n")
}

pub fn display_publish_plan(preset: Preset, steps: &[PublishStep]) {
    println!("\n{}", style("Publishing plan:").bold());
    println!("{}", format_publish_plan(preset, steps));
}
