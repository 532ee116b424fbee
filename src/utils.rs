use std::path::PathBuf;

/// Name used on every commit unless the config file says otherwise.
pub const DEFAULT_AUTHOR_NAME: &str = "GitJournal Exporter";
pub const DEFAULT_AUTHOR_EMAIL: &str = "a@b.c";

/// Configuration required to run the export process.
/// This decouples the logic from how the arguments were parsed (CLI/Config file).
#[derive(Clone, Debug)]
pub struct ExportConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub author: Author,
    pub verbose: bool,
    pub quiet: bool,
}

/// Identity stamped on the commits we create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            name: DEFAULT_AUTHOR_NAME.to_string(),
            email: DEFAULT_AUTHOR_EMAIL.to_string(),
        }
    }
}

/// What happened to a single note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Written and committed; the file stays in the tree.
    Exported(String),
    /// Written, committed, removed and committed again.
    Trashed(String),
    /// Derived name was empty, nothing touched.
    Skipped,
}
