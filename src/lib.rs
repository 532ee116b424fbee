//! # simplenote-git-export
//!
//! A CLI tool that turns a [Simplenote](https://simplenote.com) export archive into a git
//! repository of Markdown notes, ready to be used as a [GitJournal](https://gitjournal.io) repo.
//!
//! ## What it does
//!
//! Simplenote exports a zip holding `source/notes.json`, with an `activeNotes` and a
//! `trashedNotes` array. Every note becomes `<first line>.md` with a small front-matter block
//! carrying its creation and modification dates, followed by the note exactly as written.
//!
//! Each note is committed on its own:
//!
//! - active notes get one commit, `Exported <file>`;
//! - trashed notes get two, `Exported to delete <file>` and then `Deleted <file>`, so the
//!   repository remembers what the note said as well as the fact that it was thrown away.
//!
//! ## Existing repositories
//!
//! When the output directory already exists it is opened as a git repository and new commits
//! are appended. Files from earlier runs are never rewritten; a note whose name is already taken
//! is written under `<name>_<suffix>.md` instead.
//!
//! ## Usage
//!
//! ```sh
//! simplenote-git-export -input notes.zip -output ~/journal
//! ```
//!
//! The commit author can be set in `~/.config/simplenote-git-export/config.toml`.

pub mod exporter;
pub mod history;
pub mod importer;
pub mod naming;
pub mod sequential;
pub mod utils;
