/// A release tag and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub commit_sha: String,
}

impl Tag {
    /// Create a new tag
    pub fn new(name: impl Into<String>, commit_sha: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            commit_sha: commit_sha.into(),
        }
    }

    /// Check whether the tag name starts with `prefix` directly followed by a digit.
    ///
    /// `v1.2.3` satisfies `v`, while `very-old` and `v` alone do not.
    pub fn satisfies_prefix(&self, prefix: &str) -> bool {
        self.name
            .strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_digit())
    }

    /// Version part of the tag name after `prefix` (e.g., "v1.2.3" -> "1.2.3")
    pub fn version_part(&self, prefix: &str) -> &str {
        self.name.strip_prefix(prefix).unwrap_or(&self.name)
    }
}

/// Pick the latest release tag from a newest-first list.
///
/// For each tag the fallback prefix (pre-release mode) is checked before the
/// main prefix; the first satisfying tag wins. Returns the tag together with
/// the prefix it matched.
pub fn find_latest_tag<'a>(
    tags: &'a [Tag],
    tag_prefix: &'a str,
    fallback_prefix: Option<&'a str>,
) -> Option<(&'a Tag, &'a str)> {
    tags.iter().find_map(|tag| {
        if let Some(fallback) = fallback_prefix {
            if tag.satisfies_prefix(fallback) {
                return Some((tag, fallback));
            }
        }
        tag.satisfies_prefix(tag_prefix).then_some((tag, tag_prefix))
    })
}
