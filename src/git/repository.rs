use crate::domain::{RawCommit, Tag};
use crate::error::{BumpError, Result};
use crate::git::ReleaseSource;
use git2::{Oid, Repository as Git2Repo, Sort};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::path::Path;
use tracing::debug;

/// Local repository source backed by git2
pub struct Git2Source {
    repo: Git2Repo,
    walk: RefCell<Option<WalkCache>>,
}

/// Commit order of the last walked ref, reused across page requests
struct WalkCache {
    git_ref: Option<String>,
    oids: Vec<Oid>,
}

impl Git2Source {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Source::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Source {
            repo,
            walk: RefCell::new(None),
        }
    }

    /// Owner and name parsed from the `origin` remote URL, when it is a GitHub-style URL
    pub fn origin_owner_repo(&self) -> Option<(String, String)> {
        let remote = self.repo.find_remote("origin").ok()?;
        parse_owner_repo(remote.url()?)
    }
}

/// Extract `(owner, repo)` from `git@host:owner/repo.git` or `https://host/owner/repo(.git)`
pub fn parse_owner_repo(url: &str) -> Option<(String, String)> {
    let path = match url.split_once("://") {
        Some((_, rest)) => rest.split_once('/')?.1,
        None => url.split_once(':')?.1,
    };
    let mut parts = path.trim_end_matches('/').rsplitn(2, '/');
    let repo = parts.next()?.trim_end_matches(".git");
    let owner = parts.next()?.rsplit('/').next()?;

    if owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

impl Git2Source {
    /// Run `f` over the full commit order of `git_ref`, walking it only once per ref.
    ///
    /// Topological sorting makes libgit2 walk the whole graph before yielding
    /// the first commit, so later pages reuse the recorded order.
    fn with_walk<T>(&self, git_ref: Option<&str>, f: impl FnOnce(&[Oid]) -> T) -> Result<T> {
        let mut cache = self.walk.borrow_mut();
        let stale = cache
            .as_ref()
            .map_or(true, |walk| walk.git_ref.as_deref() != git_ref);

        if stale {
            let oids = self.walk_oids(git_ref)?;
            debug!(git_ref = git_ref.unwrap_or("HEAD"), commits = oids.len(), "Walked history");
            *cache = Some(WalkCache {
                git_ref: git_ref.map(str::to_string),
                oids,
            });
        }

        let oids = cache.as_ref().map(|walk| walk.oids.as_slice()).unwrap_or_default();
        Ok(f(oids))
    }

    fn walk_oids(&self, git_ref: Option<&str>) -> Result<Vec<Oid>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        match git_ref {
            Some(spec) => {
                let commit = self
                    .repo
                    .revparse_single(spec)
                    .and_then(|object| object.peel_to_commit())
                    .map_err(|e| {
                        BumpError::config(format!("Cannot resolve ref '{}': {}", spec, e))
                    })?;
                revwalk.push(commit.id())?;
            }
            None => revwalk.push_head()?,
        }

        Ok(revwalk.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

/// Order two tags on commits of the same time by the version after their prefix.
///
/// Parsable versions rank above unparsable ones; names decide otherwise.
fn compare_tag_versions(a: &Tag, b: &Tag) -> Ordering {
    let parse = |tag: &Tag| {
        let version = tag.name.trim_start_matches(|c: char| !c.is_ascii_digit());
        semver::Version::parse(version).ok()
    };

    match (parse(a), parse(b)) {
        (Some(a_version), Some(b_version)) => a_version
            .cmp(&b_version)
            .then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.name.cmp(&b.name),
    }
}

impl ReleaseSource for Git2Source {
    fn list_tags(&self) -> Result<Vec<Tag>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            // tags pointing at trees or blobs have no place in release history
            let commit = match reference.peel_to_commit() {
                Ok(commit) => commit,
                Err(e) => {
                    debug!(tag = name, error = %e, "Skipping tag without commit");
                    continue;
                }
            };
            tags.push((commit.time().seconds(), Tag::new(name, commit.id().to_string())));
        }

        tags.sort_by(|(a_time, a_tag), (b_time, b_tag)| {
            b_time
                .cmp(a_time)
                .then_with(|| compare_tag_versions(b_tag, a_tag))
        });

        Ok(tags.into_iter().map(|(_, tag)| tag).collect())
    }

    fn list_commits(
        &self,
        git_ref: Option<&str>,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<RawCommit>> {
        let skip = page.saturating_sub(1) * per_page;
        let oids: Vec<Oid> = self.with_walk(git_ref, |oids| {
            oids.iter().skip(skip).take(per_page).copied().collect()
        })?;

        let mut commits = Vec::with_capacity(oids.len());
        for oid in oids {
            let commit = self.repo.find_commit(oid)?;
            // non-UTF-8 bytes become replacement characters instead of an empty message
            let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();

            commits.push(RawCommit::with_sha(oid.to_string(), message));
        }

        Ok(commits)
    }
}
