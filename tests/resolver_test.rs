// tests/resolver_test.rs
use git_bump::config::{parse_config, Config};
use git_bump::domain::{BumpType, RawCommit, Tag};
use git_bump::error::BumpError;
use git_bump::git::MockSource;
use git_bump::resolver::{resolve_next_version, ReleaseNotes, ResolveOptions, StrategyName};

const TAG_SHA: &str = "123";

fn history(messages: &[&str]) -> Vec<RawCommit> {
    let mut commits: Vec<RawCommit> = messages.iter().map(|m| RawCommit::new(*m)).collect();
    commits.push(RawCommit::with_sha(TAG_SHA, "chore: release"));
    commits
}

fn source_at(tag: &str, messages: &[&str]) -> MockSource {
    MockSource::new()
        .with_tags(vec![Tag::new(tag, TAG_SHA)])
        .with_commits(history(messages))
}

fn resolve(source: &MockSource) -> git_bump::resolver::NextVersionResult {
    resolve_next_version(source, source, &Config::default(), &ResolveOptions::default())
        .expect("resolution should succeed")
}

fn messages<'a>(notes: &'a ReleaseNotes, rule: &str) -> Vec<&'a str> {
    notes
        .messages(rule)
        .unwrap_or_default()
        .iter()
        .map(String::as_str)
        .collect()
}

#[test]
fn test_minor_remapped_to_patch_below_one() {
    let source = source_at(
        "v0.0.9",
        &[
            "fix: fix serious issue\nfeat: add new feature",
            "feat: just adding feature",
            "fix: first fixes",
        ],
    );
    let result = resolve(&source);

    assert_eq!(result.bump_type, BumpType::Patch);
    assert_eq!(result.next_version.as_deref(), Some("0.0.10"));
    assert_eq!(
        messages(&result.commits_by_rule, "minor"),
        vec!["add new feature", "just adding feature"]
    );
    assert_eq!(
        messages(&result.commits_by_rule, "patch"),
        vec!["fix serious issue", "first fixes"]
    );
    assert_eq!(result.latest_tag_name.as_deref(), Some("v0.0.9"));
    assert_eq!(result.latest_tag_commit_sha.as_deref(), Some(TAG_SHA));
}

#[test]
fn test_initial_release_without_tags() {
    let source = MockSource::new()
        .with_manifest_version("0.0.0")
        .with_commits(vec![RawCommit::new("feat: first")]);
    let result = resolve(&source);

    assert_eq!(result.bump_type, BumpType::None);
    assert_eq!(result.next_version.as_deref(), Some("0.0.1"));
    assert_eq!(
        result.commits_by_rule,
        ReleaseNotes::RawOverride("🎉 Initial release".to_string())
    );
    assert!(!result.using_in_existing_env);
    assert_eq!(result.latest_tag_name, None);
    assert!(source.requested_pages().is_empty());
}

#[test]
fn test_initial_release_without_manifest_version() {
    let result = resolve(&MockSource::new());
    assert_eq!(result.next_version.as_deref(), Some("0.0.1"));
}

#[test]
fn test_breaking_marker_merges_into_feature() {
    let source = source_at(
        "v1.0.9",
        &["fix: fix serious issue\nfeat: add new feature\nBREAKING config was removed"],
    );
    let result = resolve(&source);

    assert_eq!(result.bump_type, BumpType::Major);
    assert_eq!(result.next_version.as_deref(), Some("2.0.0"));
    assert_eq!(
        messages(&result.commits_by_rule, "major"),
        vec!["add new feature\nconfig was removed"]
    );
    assert_eq!(
        messages(&result.commits_by_rule, "patch"),
        vec!["fix serious issue"]
    );
    assert!(result.commits_by_rule.messages("minor").is_none());
}

#[test]
fn test_scope_prefix_on_breaking_entry() {
    let source = source_at(
        "v0.0.7",
        &["feat(button): just adding feature\nBREAKING we broke anything"],
    );
    let result = resolve(&source);

    assert_eq!(
        messages(&result.commits_by_rule, "major"),
        vec!["**button**: just adding feature\nwe broke anything"]
    );
    // major below 1.0.0 is remapped to minor
    assert_eq!(result.bump_type, BumpType::Minor);
    assert_eq!(result.next_version.as_deref(), Some("0.1.0"));
}

#[test]
fn test_history_across_pages() {
    let mut commits: Vec<RawCommit> = (0..250)
        .map(|i| RawCommit::with_sha(format!("sha{}", i), format!("fix: change {}", i)))
        .collect();
    commits[150] = RawCommit::with_sha("sha150", "feat: released before");
    commits[200] = RawCommit::with_sha("sha200", "feat: BREAKING older than the tag");

    let source = MockSource::new()
        .with_tags(vec![Tag::new("v1.4.0", "sha150")])
        .with_commits(commits);
    let mut config = Config::default();
    config.links_to_same_commit = false;

    let result =
        resolve_next_version(&source, &source, &config, &ResolveOptions::default()).unwrap();

    assert_eq!(messages(&result.commits_by_rule, "patch").len(), 150);
    assert_eq!(
        messages(&result.commits_by_rule, "patch").last(),
        Some(&"change 149")
    );
    assert_eq!(result.bump_type, BumpType::Patch);
    assert_eq!(result.next_version.as_deref(), Some("1.4.1"));
    assert_eq!(source.requested_pages(), vec![1, 2]);
}

#[test]
fn test_unreachable_tag_is_an_error() {
    let source = MockSource::new()
        .with_tags(vec![Tag::new("v1.0.0", "rewritten")])
        .with_commits(vec![RawCommit::with_sha("a", "fix: x")]);
    let err = resolve_next_version(&source, &source, &Config::default(), &ResolveOptions::default())
        .unwrap_err();
    assert!(matches!(err, BumpError::TagNotReachable { .. }));
}

#[test]
fn test_skip_rule_vetoes_commit() {
    let config = parse_config(
        r#"
[[rules]]
pattern = '\[skip release\]'
bump = "skip"
"#,
    )
    .unwrap();
    let source = source_at(
        "v1.2.3",
        &["feat: hidden feature\n[skip release]", "fix: visible fix"],
    );
    let result =
        resolve_next_version(&source, &source, &config, &ResolveOptions::default()).unwrap();

    assert_eq!(result.bump_type, BumpType::Patch);
    assert_eq!(result.next_version.as_deref(), Some("1.2.4"));
    assert!(result.commits_by_rule.messages("minor").is_none());
}

#[test]
fn test_strategies() {
    let cases = [
        (StrategyName::None, "v0.3.1", "0.4.0"),
        (StrategyName::SemverUnstable, "v0.3.1", "0.3.2"),
        (StrategyName::SemverUnstable, "v1.3.1", "1.4.0"),
        (StrategyName::Unstable, "v1.3.1", "1.3.2"),
        (StrategyName::TooUnstable, "v5.0.0", "5.0.1"),
    ];

    for (strategy, tag, expected) in cases {
        let source = source_at(tag, &["feat: something"]);
        let config = Config {
            bumping_version_strategy: strategy,
            ..Config::default()
        };
        let result =
            resolve_next_version(&source, &source, &config, &ResolveOptions::default()).unwrap();
        assert_eq!(
            result.next_version.as_deref(),
            Some(expected),
            "{:?} at {}",
            strategy,
            tag
        );
    }
}

#[test]
fn test_fallback_prefix_checked_first() {
    let source = MockSource::new()
        .with_tags(vec![
            Tag::new("beta2.0.0-beta.1", TAG_SHA),
            Tag::new("v1.9.0", "older"),
        ])
        .with_commits(history(&["feat: new api"]));
    let options = ResolveOptions {
        fallback_prefix: Some("beta".to_string()),
        ..ResolveOptions::default()
    };
    let result = resolve_next_version(&source, &source, &Config::default(), &options).unwrap();

    assert_eq!(result.latest_tag_name.as_deref(), Some("beta2.0.0-beta.1"));
    // a pre-release at x.0.0 completes on minor
    assert_eq!(result.next_version.as_deref(), Some("2.0.0"));
}

#[test]
fn test_tags_without_digit_after_prefix_ignored() {
    let source = MockSource::new()
        .with_tags(vec![Tag::new("vnext", "x"), Tag::new("v2.1.0", TAG_SHA)])
        .with_commits(history(&["fix: a"]));
    let result = resolve(&source);
    assert_eq!(result.latest_tag_name.as_deref(), Some("v2.1.0"));
    assert_eq!(result.next_version.as_deref(), Some("2.1.1"));
}

#[test]
fn test_pull_request_reference_preferred_over_commit_link() {
    let source = MockSource::new()
        .with_tags(vec![Tag::new("v1.0.0", TAG_SHA)])
        .with_commits(vec![
            RawCommit::with_sha(
                "7f8468286354936e8817607d7a2087715bbe1854",
                "fix: fix serious issue (#42)",
            ),
            RawCommit::with_sha(
                "0123456789abcdef0123456789abcdef01234567",
                "fix: closes #7 other issue",
            ),
            RawCommit::with_sha(TAG_SHA, "chore: release"),
        ]);
    let config = parse_config(
        r#"
[repository]
owner = "user"
repo = "repository"
"#,
    )
    .unwrap();
    let result =
        resolve_next_version(&source, &source, &config, &ResolveOptions::default()).unwrap();

    assert_eq!(
        messages(&result.commits_by_rule, "patch"),
        vec!["fix serious issue (#42)", "other issue (#7)"]
    );
}
