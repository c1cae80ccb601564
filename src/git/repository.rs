use crate::error::Result;
use crate::git::{ChangeSource, DEFAULT_COMMIT_LIMIT};
use git2::{DescribeFormatOptions, DescribeOptions, Oid, Repository, Sort};
use std::path::Path;

/// History read from a git repository through `git2`
pub struct Git2ChangeSource {
    repo: Repository,
}

impl Git2ChangeSource {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Git2ChangeSource { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Repository) -> Self {
        Git2ChangeSource { repo }
    }

    /// Most recent tag reachable from HEAD, like `git describe --tags --abbrev=0`
    pub fn latest_tag(&self) -> Option<String> {
        let mut options = DescribeOptions::new();
        options.describe_tags();

        let describe = match self.repo.describe(&options) {
            Ok(describe) => describe,
            Err(e) => {
                tracing::debug!(error = %e, "no tag describes HEAD");
                return None;
            }
        };

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);
        describe.format(Some(&format)).ok()
    }

    /// Commit the range starts after, if any
    fn range_start(&self, since: Option<&str>) -> Result<Option<Oid>> {
        let boundary = match since {
            Some(tag) => tag.to_string(),
            None => match self.latest_tag() {
                Some(tag) => tag,
                None => format!("HEAD~{}", DEFAULT_COMMIT_LIMIT),
            },
        };

        match self.repo.revparse_single(&boundary) {
            Ok(object) => Ok(Some(object.peel_to_commit()?.id())),
            // shorter history than the default window: take all of it
            Err(_) if since.is_none() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl ChangeSource for Git2ChangeSource {
    fn oneline_log(&self, since: Option<&str>) -> Result<Vec<String>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        if let Some(start) = self.range_start(since)? {
            revwalk.hide(start)?;
        }

        let mut lines = Vec::new();
        for oid_result in revwalk {
            let commit = self.repo.find_commit(oid_result?)?;

            if commit.parent_count() > 1 {
                continue;
            }

            let short_id = commit.as_object().short_id()?;
            let short_id = short_id.as_str().unwrap_or_default().to_string();
            let summary = commit.summary().unwrap_or_default();

            lines.push(format!("{} {}", short_id, summary));
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Commit, Signature};
    use tempfile::TempDir;

    fn commit(repo: &Repository, message: &str) -> Oid {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<Commit> = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&Commit> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn messages(lines: &[String]) -> Vec<&str> {
        lines
            .iter()
            .map(|line| line.split_once(' ').unwrap().1)
            .collect()
    }

    #[test]
    fn test_history_since_latest_tag() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let tagged = commit(&repo, "Initial commit");
        repo.tag_lightweight("v1.0.0", &repo.find_object(tagged, None).unwrap(), false)
            .unwrap();
        commit(&repo, "Add reverb tail control");
        commit(&repo, "Fix crash on load\n\nLonger body text");

        let source = Git2ChangeSource::from_git2(repo);
        assert_eq!(source.latest_tag().as_deref(), Some("v1.0.0"));

        let lines = source.oneline_log(None).unwrap();
        assert_eq!(
            messages(&lines),
            vec!["Fix crash on load", "Add reverb tail control"]
        );
    }

    #[test]
    fn test_history_since_explicit_tag() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let first = commit(&repo, "First");
        repo.tag_lightweight("v0.1.0", &repo.find_object(first, None).unwrap(), false)
            .unwrap();
        let second = commit(&repo, "Second");
        repo.tag_lightweight("v0.2.0", &repo.find_object(second, None).unwrap(), false)
            .unwrap();
        commit(&repo, "Third");

        let source = Git2ChangeSource::from_git2(repo);
        let lines = source.oneline_log(Some("v0.1.0")).unwrap();
        assert_eq!(messages(&lines), vec!["Third", "Second"]);
    }

    #[test]
    fn test_short_untagged_history_is_fully_listed() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit(&repo, "One");
        commit(&repo, "Two");

        let source = Git2ChangeSource::from_git2(repo);
        assert_eq!(source.latest_tag(), None);
        let lines = source.oneline_log(None).unwrap();
        assert_eq!(messages(&lines), vec!["Two", "One"]);
    }

    #[test]
    fn test_unknown_since_tag_is_error() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit(&repo, "One");

        let source = Git2ChangeSource::from_git2(repo);
        assert!(source.oneline_log(Some("v9.9.9")).is_err());
    }
}
