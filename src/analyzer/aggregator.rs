use crate::analyzer::classifier::{classify_line, Classification, LineClass};
use crate::conventional;
use crate::domain::{BumpEntry, RuleMatcher, VersionRule};

/// Accumulates the entries of one commit.
///
/// `current` is the entry later lines may still extend; finished entries move
/// to `entries` when a new one starts.
#[derive(Debug, Default)]
pub struct CommitNotesBuilder {
    entries: Vec<BumpEntry>,
    current: Option<BumpEntry>,
    continuing: bool,
}

impl CommitNotesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one classified line
    pub fn push_classified(&mut self, line: &str, classification: Classification<'_>) {
        let rule = classification.rule;
        let text = marker_stripped(rule, line);
        let bump_level = classification.bump.level();
        let notes_rule = rule.notes_rule();
        self.continuing = true;

        if !rule.starts_new {
            if let Some(current) = self.current.as_mut() {
                current.bump_level = bump_level;
                current.notes_rule = notes_rule;
                current.raw_message.push('\n');
                current.raw_message.push_str(&text);
                return;
            }
        }

        let scope = conventional::parse_header(line)
            .and_then(|header| header.scope)
            .map(str::to_string);
        self.start_entry(BumpEntry {
            bump_level,
            notes_rule,
            raw_message: text,
            scope,
        });
    }

    /// Feed one line no rule matched
    pub fn push_unclassified(&mut self, line: &str) {
        if conventional::is_conventional(line) {
            self.continuing = false;
            return;
        }

        if !self.continuing {
            return;
        }
        if let Some(current) = self.current.as_mut() {
            current.raw_message.push('\n');
            current.raw_message.push_str(line);
        }
    }

    fn start_entry(&mut self, entry: BumpEntry) {
        if let Some(previous) = self.current.replace(entry) {
            self.entries.push(previous);
        }
    }

    pub fn finish(mut self) -> Vec<BumpEntry> {
        if let Some(last) = self.current.take() {
            self.entries.push(last);
        }
        self.entries
    }
}

fn marker_stripped(rule: &VersionRule, line: &str) -> String {
    if !rule.strip_by_regex {
        return line.to_string();
    }
    match &rule.matches {
        RuleMatcher::Pattern(regex) => regex.replace(line, "").into_owned(),
        RuleMatcher::ConventionalType(_) => conventional::strip_header(line),
    }
}

/// Split a commit message into release-note entries.
///
/// Returns `None` when a skip rule matched any line: the commit then
/// contributes nothing at all.
pub fn aggregate_commit(rules: &[VersionRule], message: &str) -> Option<Vec<BumpEntry>> {
    let mut builder = CommitNotesBuilder::new();

    for line in message.split('\n') {
        if line.trim().is_empty() {
            continue;
        }
        match classify_line(rules, line) {
            LineClass::Veto => return None,
            LineClass::Classified(classification) => builder.push_classified(line, classification),
            LineClass::Unclassified => builder.push_unclassified(line),
        }
    }

    Some(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{default_rules, BumpType, RuleBump};
    use regex::Regex;

    fn texts(entries: &[BumpEntry]) -> Vec<(&str, &str)> {
        entries
            .iter()
            .map(|e| (e.notes_rule.as_str(), e.raw_message.as_str()))
            .collect()
    }

    #[test]
    fn test_two_headers_make_two_entries() {
        let entries =
            aggregate_commit(&default_rules(), "fix: fix serious issue\nfeat: add new feature")
                .unwrap();
        assert_eq!(
            texts(&entries),
            vec![("patch", " fix serious issue"), ("minor", " add new feature")]
        );
    }

    #[test]
    fn test_breaking_merges_into_previous_entry() {
        let entries = aggregate_commit(
            &default_rules(),
            "fix: fix serious issue\nfeat: add new feature\nBREAKING config was removed",
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].bump_level, BumpType::Major.level());
        assert_eq!(entries[1].notes_rule, "major");
        assert_eq!(entries[1].raw_message, " add new feature\n config was removed");
    }

    #[test]
    fn test_breaking_first_line_starts_entry() {
        let entries = aggregate_commit(&default_rules(), "BREAKING CHANGE: dropped v1 api").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].notes_rule, "major");
        assert_eq!(entries[0].raw_message, " dropped v1 api");
    }

    #[test]
    fn test_scope_kept_on_merge() {
        let entries = aggregate_commit(
            &default_rules(),
            "feat(button): just adding feature\nBREAKING we broke anything",
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].scope.as_deref(), Some("button"));
        assert_eq!(entries[0].bump_level, 3);
    }

    #[test]
    fn test_body_lines_follow_classified_header() {
        let message = "\nfix: rare bug\n\nSome background\nfeat: new feature\nDescription";
        let entries = aggregate_commit(&default_rules(), message).unwrap();
        assert_eq!(
            texts(&entries),
            vec![
                ("patch", " rare bug\nSome background"),
                ("minor", " new feature\nDescription")
            ]
        );
    }

    #[test]
    fn test_unmatched_header_stops_continuation() {
        let message = "fix: some things\ntest: Fix tests\nTests were hard to fix";
        let entries = aggregate_commit(&default_rules(), message).unwrap();
        assert_eq!(texts(&entries), vec![("patch", " some things")]);
    }

    #[test]
    fn test_prose_before_any_entry_is_ignored() {
        let entries = aggregate_commit(&default_rules(), "Merge branch\nfix: later").unwrap();
        assert_eq!(texts(&entries), vec![("patch", " later")]);
    }

    #[test]
    fn test_non_conventional_commit_has_no_entries() {
        let entries = aggregate_commit(&default_rules(), "WIP fix: first fixes").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_skip_rule_vetoes_whole_commit() {
        let mut rules = default_rules();
        rules.push(VersionRule::conventional("chore", RuleBump::Skip));
        assert!(aggregate_commit(&rules, "feat: big thing\nchore: release").is_none());
    }

    #[test]
    fn test_keep_marker_when_stripping_disabled() {
        let rules = vec![VersionRule::pattern(
            Regex::new("SECURITY").unwrap(),
            RuleBump::Level(BumpType::Patch),
        )
        .keep_marker()];
        let entries = aggregate_commit(&rules, "SECURITY patched header parsing").unwrap();
        assert_eq!(entries[0].raw_message, "SECURITY patched header parsing");
    }
}
