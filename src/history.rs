use crate::domain::RawCommit;
use crate::error::{BumpError, Result};
use crate::git::ReleaseSource;
use tracing::debug;

/// Pages backwards through commit history until the release tag's commit.
#[derive(Debug, Clone, Copy)]
pub struct HistoryWalker {
    page_size: usize,
    max_pages: usize,
}

impl HistoryWalker {
    pub fn new(page_size: usize, max_pages: usize) -> Self {
        HistoryWalker {
            page_size: page_size.max(1),
            max_pages: max_pages.max(1),
        }
    }

    /// Commits strictly newer than `tag_sha`, newest first.
    ///
    /// Pages are fetched one after another starting at page 1; the first page
    /// containing the tag commit ends the walk. An exhausted history or more
    /// than `max_pages` pages without the tag yields
    /// [`BumpError::TagNotReachable`].
    pub fn commits_since<S: ReleaseSource + ?Sized>(
        &self,
        source: &S,
        tag_sha: &str,
        git_ref: Option<&str>,
    ) -> Result<Vec<RawCommit>> {
        let mut collected = Vec::new();

        for page in 1..=self.max_pages {
            let fetched = source.list_commits(git_ref, page, self.page_size)?;
            debug!(page, fetched = fetched.len(), "Fetched commit page");

            if fetched.is_empty() {
                return Err(BumpError::TagNotReachable {
                    sha: tag_sha.to_string(),
                    pages: page - 1,
                });
            }

            if let Some(index) = fetched.iter().position(|c| c.has_sha(tag_sha)) {
                collected.extend(fetched.into_iter().take(index));
                return Ok(collected);
            }
            collected.extend(fetched);
        }

        Err(BumpError::TagNotReachable {
            sha: tag_sha.to_string(),
            pages: self.max_pages,
        })
    }
}

impl Default for HistoryWalker {
    fn default() -> Self {
        HistoryWalker::new(100, 1000)
    }
}
