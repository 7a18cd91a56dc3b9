use crate::domain::{RawCommit, Tag};
use crate::error::Result;
use crate::git::{ManifestSource, ReleaseSource};
use std::cell::RefCell;

/// In-memory source for testing without a repository
#[derive(Debug, Default)]
pub struct MockSource {
    tags: Vec<Tag>,
    commits: Vec<RawCommit>,
    pages: Option<Vec<Vec<RawCommit>>>,
    manifest_version: Option<String>,
    requested_pages: RefCell<Vec<usize>>,
}

impl MockSource {
    /// Create an empty mock source
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags, most recent first
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Commit history, newest first; paged by the requested page size
    pub fn with_commits(mut self, commits: Vec<RawCommit>) -> Self {
        self.commits = commits;
        self
    }

    /// Explicit pages returned verbatim regardless of the requested page size
    pub fn with_pages(mut self, pages: Vec<Vec<RawCommit>>) -> Self {
        self.pages = Some(pages);
        self
    }

    pub fn with_manifest_version(mut self, version: impl Into<String>) -> Self {
        self.manifest_version = Some(version.into());
        self
    }

    /// Page numbers requested so far, in call order
    pub fn requested_pages(&self) -> Vec<usize> {
        self.requested_pages.borrow().clone()
    }
}

impl ReleaseSource for MockSource {
    fn list_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn list_commits(
        &self,
        _git_ref: Option<&str>,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<RawCommit>> {
        self.requested_pages.borrow_mut().push(page);
        let index = page.saturating_sub(1);

        if let Some(pages) = &self.pages {
            return Ok(pages.get(index).cloned().unwrap_or_default());
        }

        Ok(self
            .commits
            .iter()
            .skip(index * per_page)
            .take(per_page)
            .cloned()
            .collect())
    }
}

impl ManifestSource for MockSource {
    fn read_current_version(&self) -> Result<Option<String>> {
        Ok(self.manifest_version.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_source_tags() {
        let source = MockSource::new().with_tags(vec![Tag::new("v1.0.0", "abc")]);
        let tags = source.list_tags().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].commit_sha, "abc");
    }

    #[test]
    fn test_mock_source_pages_by_size() {
        let commits = (0..5).map(|i| RawCommit::new(format!("fix: {}", i))).collect();
        let source = MockSource::new().with_commits(commits);

        assert_eq!(source.list_commits(None, 1, 2).unwrap().len(), 2);
        assert_eq!(source.list_commits(None, 3, 2).unwrap().len(), 1);
        assert!(source.list_commits(None, 4, 2).unwrap().is_empty());
        assert_eq!(source.requested_pages(), vec![1, 3, 4]);
    }

    #[test]
    fn test_mock_source_explicit_pages() {
        let source = MockSource::new().with_pages(vec![
            vec![RawCommit::new("a")],
            vec![RawCommit::new("b"), RawCommit::new("c")],
        ]);
        assert_eq!(source.list_commits(None, 2, 100).unwrap().len(), 2);
        assert!(source.list_commits(None, 3, 100).unwrap().is_empty());
    }

    #[test]
    fn test_mock_source_manifest() {
        assert_eq!(MockSource::new().read_current_version().unwrap(), None);
        let source = MockSource::new().with_manifest_version("1.4.0");
        assert_eq!(
            source.read_current_version().unwrap().as_deref(),
            Some("1.4.0")
        );
    }
}
