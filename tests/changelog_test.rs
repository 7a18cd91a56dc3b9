// tests/changelog_test.rs
use git_bump::changelog::{render_changelog, ChangelogMetadata, ChangelogStyle, ReleaseMetadata};
use git_bump::config::{ChangelogConfig, Config};
use git_bump::domain::{BumpType, RawCommit, Tag};
use git_bump::git::MockSource;
use git_bump::resolver::{resolve_next_version, ResolveOptions};

fn release_source() -> MockSource {
    MockSource::new()
        .with_tags(vec![Tag::new("v0.0.9", "123")])
        .with_commits(vec![
            RawCommit::new("fix: fix serious issue\nfeat: add new feature\nBREAKING config was removed"),
            RawCommit::new("feat(button): just adding feature\nBREAKING we broke anything"),
            RawCommit::new("[smth] fix(library-action): first fixes"),
            RawCommit::new("feat: new feature!"),
            RawCommit::with_sha("123", "fix: already released"),
        ])
}

fn render(style: ChangelogStyle, package_name: Option<&str>) -> String {
    let source = release_source();
    let result =
        resolve_next_version(&source, &source, &Config::default(), &ResolveOptions::default())
            .unwrap();
    render_changelog(
        &result.commits_by_rule,
        &ChangelogMetadata {
            bump_type: result.bump_type,
            package_name: package_name.map(str::to_string),
        },
        &ChangelogConfig { style },
    )
}

#[test]
fn test_default_style_changelog() {
    assert_eq!(
        render(ChangelogStyle::Default, None),
        "<!-- bump-type:minor -->\n\
## 💥 BREAKING CHANGES\n\n\
- add new feature\nconfig was removed\n\
- **button**: just adding feature\nwe broke anything\n\
### New Features\n\n\
- new feature!\n\
### Bug Fixes\n\n\
- fix serious issue\n\
- **library-action**: first fixes"
    );
}

#[test]
fn test_gitmoji_style_changelog() {
    let changelog = render(ChangelogStyle::Gitmoji, Some("my-package"));
    assert!(changelog.starts_with("<!-- bump-type:minor npm:my-package -->\n# 💥 Breaking Changes\n\n"));
    assert!(changelog.contains("\n## ✨ New Features\n\n- new feature!\n"));
    assert!(changelog.ends_with("### 🐛 Bug Fixes\n\n- fix serious issue\n- **library-action**: first fixes"));
}

#[test]
fn test_metadata_round_trip_through_body() {
    let changelog = render(ChangelogStyle::Semver, Some("@scope/pkg"));
    let metadata = ReleaseMetadata::parse(&changelog).unwrap();
    assert_eq!(metadata.bump_type, BumpType::Minor);
    assert_eq!(metadata.package_name.as_deref(), Some("@scope/pkg"));
}

#[test]
fn test_initial_release_notes_verbatim() {
    let source = MockSource::new();
    let result =
        resolve_next_version(&source, &source, &Config::default(), &ResolveOptions::default())
            .unwrap();
    let changelog = render_changelog(
        &result.commits_by_rule,
        &ChangelogMetadata {
            bump_type: result.bump_type,
            package_name: None,
        },
        &ChangelogConfig::default(),
    );
    assert_eq!(changelog, "🎉 Initial release");
}
