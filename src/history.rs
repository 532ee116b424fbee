use crate::utils::Author;
use chrono::{Local, Offset};
use eyre::{Context, Result};
use git2::{ErrorCode, Repository, Signature, Time};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Kind of change a commit records; fixes the commit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// An active note was written.
    Export,
    /// A trashed note was written ahead of its removal.
    ExportToDelete,
    /// A trashed note was removed.
    Delete,
}

impl Change {
    pub fn message(self, filename: &str) -> String {
        match self {
            Change::Export => format!("Exported {}", filename),
            Change::ExportToDelete => format!("Exported to delete {}", filename),
            Change::Delete => format!("Deleted {}", filename),
        }
    }
}

/// How the output repository came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bootstrap {
    Initialized,
    Opened,
}

/// Create `dir` and initialise a repository in it, or open the repository
/// already living there when the directory cannot be created.
pub fn open_or_init(dir: &Path) -> Result<(Repository, Bootstrap)> {
    match fs::create_dir(dir) {
        Ok(()) => {
            let repo = Repository::init(dir).wrap_err_with(|| {
                format!("Failed to init git repository: {}", dir.display())
            })?;
            Ok((repo, Bootstrap::Initialized))
        }
        // Any failure here means "probably exists"; opening decides for real.
        Err(e) => {
            let repo = Repository::open(dir).wrap_err_with(|| {
                if e.kind() == ErrorKind::AlreadyExists {
                    format!("Failed to open existing git repository: {}", dir.display())
                } else {
                    format!(
                        "Unable to create {} ({}) and no git repository is there",
                        dir.display(),
                        e
                    )
                }
            })?;
            Ok((repo, Bootstrap::Opened))
        }
    }
}

/// Stages single files and commits them on `HEAD`.
pub struct HistoryRecorder {
    repo: Repository,
    author: Author,
}

impl HistoryRecorder {
    pub fn new(repo: Repository, author: Author) -> Self {
        Self { repo, author }
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Stage `filename` (relative to the work tree) and commit it.
    pub fn record_add(&self, filename: &str, message: &str) -> Result<()> {
        let mut index = self.repo.index().wrap_err("Unable to open git index")?;
        index
            .add_path(Path::new(filename))
            .wrap_err_with(|| format!("Unable to add file to worktree: {}", filename))?;
        index
            .write()
            .wrap_err_with(|| format!("Unable to write index for: {}", filename))?;
        self.commit(&mut index, message)
            .wrap_err_with(|| format!("Unable to commit file: {}", filename))
    }

    /// Stage the removal of `filename` and commit it. The file must already
    /// be gone from disk.
    pub fn record_remove(&self, filename: &str, message: &str) -> Result<()> {
        let mut index = self.repo.index().wrap_err("Unable to open git index")?;
        index
            .remove_path(Path::new(filename))
            .wrap_err_with(|| format!("Unable to remove file from index: {}", filename))?;
        index
            .write()
            .wrap_err_with(|| format!("Unable to write index for: {}", filename))?;
        self.commit(&mut index, message)
            .wrap_err_with(|| format!("Unable to commit removal of: {}", filename))
    }

    fn commit(&self, index: &mut git2::Index, message: &str) -> Result<()> {
        let tree_id = index.write_tree().wrap_err("Unable to write tree")?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.signature()?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit().wrap_err("HEAD is not a commit")?),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e).wrap_err("Unable to resolve HEAD"),
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .wrap_err("Unable to create commit")?;
        Ok(())
    }

    fn signature(&self) -> Result<Signature<'static>> {
        let now = Local::now();
        let offset_minutes = now.offset().fix().local_minus_utc() / 60;
        Signature::new(
            &self.author.name,
            &self.author.email,
            &Time::new(now.timestamp(), offset_minutes),
        )
        .wrap_err("Invalid commit author")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn messages(repo: &Repository) -> Vec<String> {
        let mut walk = repo.revwalk().unwrap();
        walk.set_sorting(git2::Sort::TOPOLOGICAL).unwrap();
        walk.push_head().unwrap();
        walk.map(|oid| {
            let commit = repo.find_commit(oid.unwrap()).unwrap();
            commit.message().unwrap().to_string()
        })
        .collect()
    }

    #[test]
    fn messages_are_deterministic() {
        assert_eq!(Change::Export.message("a.md"), "Exported a.md");
        assert_eq!(Change::ExportToDelete.message("a.md"), "Exported to delete a.md");
        assert_eq!(Change::Delete.message("a.md"), "Deleted a.md");
    }

    #[test]
    fn fresh_directory_is_initialised_then_reopened() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("journal");

        let (_, how) = open_or_init(&dir).unwrap();
        assert_eq!(how, Bootstrap::Initialized);
        assert!(dir.join(".git").is_dir());

        let (_, how) = open_or_init(&dir).unwrap();
        assert_eq!(how, Bootstrap::Opened);
    }

    #[test]
    fn existing_plain_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(open_or_init(tmp.path()).is_err());
    }

    #[test]
    fn add_then_remove_produces_two_commits() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("journal");
        let (repo, _) = open_or_init(&dir).unwrap();
        let recorder = HistoryRecorder::new(repo, Author::default());

        fs::write(dir.join("Note.md"), "body").unwrap();
        recorder.record_add("Note.md", "Exported to delete Note.md").unwrap();
        fs::remove_file(dir.join("Note.md")).unwrap();
        recorder.record_remove("Note.md", "Deleted Note.md").unwrap();

        let repo = recorder.repository();
        assert_eq!(
            messages(repo),
            vec!["Deleted Note.md", "Exported to delete Note.md"]
        );

        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert!(head.tree().unwrap().get_name("Note.md").is_none());
        let first = head.parent(0).unwrap();
        assert!(first.tree().unwrap().get_name("Note.md").is_some());
        assert_eq!(first.author().name(), Some("GitJournal Exporter"));
        assert_eq!(first.author().email(), Some("a@b.c"));
    }
}
