/// One commit as returned by history pagination (newest first)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    /// Full commit sha; absent when the source does not expose it
    pub sha: Option<String>,
    pub message: String,
}

impl RawCommit {
    /// Create a commit without a known sha
    pub fn new(message: impl Into<String>) -> Self {
        RawCommit {
            sha: None,
            message: message.into(),
        }
    }

    /// Create a commit with a sha
    pub fn with_sha(sha: impl Into<String>, message: impl Into<String>) -> Self {
        RawCommit {
            sha: Some(sha.into()),
            message: message.into(),
        }
    }

    pub fn has_sha(&self, sha: &str) -> bool {
        self.sha.as_deref() == Some(sha)
    }
}

/// One classified unit of release-note text within a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpEntry {
    pub bump_level: u8,
    pub notes_rule: String,
    /// Marker-stripped text, possibly spanning several lines
    pub raw_message: String,
    /// Conventional-commit scope without parentheses
    pub scope: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_commit_constructors() {
        let plain = RawCommit::new("fix: a");
        assert_eq!(plain.sha, None);
        assert!(!plain.has_sha("abc"));

        let with_sha = RawCommit::with_sha("abc", "fix: a");
        assert!(with_sha.has_sha("abc"));
        assert!(!with_sha.has_sha("abd"));
    }
}
