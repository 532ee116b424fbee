//! Reading the Simplenote export archive.
//!
//! The archive is a zip produced by simplenote.com. The only member we care
//! about is `source/notes.json`:
//!
//! ```json
//! {
//!   "activeNotes":  [{ "content": "...", "creationDate": "...", "lastModified": "..." }],
//!   "trashedNotes": [{ "content": "...", "creationDate": "...", "lastModified": "..." }]
//! }
//! ```
//!
//! Timestamps are carried through as opaque strings.
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use serde_json::value::RawValue;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// Archive member holding the notes document.
pub const NOTES_MEMBER: &str = "source/notes.json";

/// Upper bound on the buffer reserved up front for the member.
const MAX_SIZE_HINT: u64 = 16 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Active,
    Trashed,
}

/// One note from the export, either kept or trashed by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub content: String,
    pub creation_date: String,
    pub last_modified: String,
}

/// Decoded `source/notes.json`, notes in document order.
#[derive(Debug, Default)]
pub struct NotesDocument {
    pub active_notes: Vec<Note>,
    pub trashed_notes: Vec<Note>,
}

impl NotesDocument {
    pub fn len(&self) -> usize {
        self.active_notes.len() + self.trashed_notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Both arrays are required. Elements stay raw so one bad note cannot sink
// the others: raw scanning does not validate escapes.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    active_notes: Vec<Box<RawValue>>,
    trashed_notes: Vec<Box<RawValue>>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawNote {
    content: Option<Box<RawValue>>,
    creation_date: Option<Box<RawValue>>,
    last_modified: Option<Box<RawValue>>,
}

impl Note {
    /// Build a note from one array element. Anything that is not an object
    /// yields an empty note; fields that are missing, not strings, or fail to
    /// decode (e.g. lone surrogate escapes) become "".
    fn from_raw(raw: &RawValue) -> Self {
        let fields: RawNote = serde_json::from_str(raw.get()).unwrap_or_default();
        Self {
            content: lenient_string(fields.content.as_deref()),
            creation_date: lenient_string(fields.creation_date.as_deref()),
            last_modified: lenient_string(fields.last_modified.as_deref()),
        }
    }
}

fn lenient_string(raw: Option<&RawValue>) -> String {
    raw.and_then(|r| serde_json::from_str::<String>(r.get()).ok())
        .unwrap_or_default()
}

/// Open the archive at `path` and decode its notes document.
pub fn read_archive(path: &Path) -> Result<NotesDocument> {
    let file = File::open(path)
        .wrap_err_with(|| format!("Unable to open archive: {}", path.display()))?;
    read_notes(file).wrap_err_with(|| format!("Unable to read archive: {}", path.display()))
}

/// Decode the notes document from any seekable zip source.
pub fn read_notes<R: Read + Seek>(reader: R) -> Result<NotesDocument> {
    let mut archive = ZipArchive::new(reader).wrap_err("Not a valid zip archive")?;

    let mut member = archive.by_name(NOTES_MEMBER).map_err(|e| match e {
        ZipError::FileNotFound => eyre!("Archive has no {} member", NOTES_MEMBER),
        other => eyre::Report::new(other).wrap_err(format!("Unable to read {}", NOTES_MEMBER)),
    })?;

    // Declared size is only a hint; the header may lie.
    let mut json = Vec::with_capacity(member.size().min(MAX_SIZE_HINT) as usize);
    member
        .read_to_end(&mut json)
        .wrap_err_with(|| format!("Unable to read {} from archive", NOTES_MEMBER))?;

    parse_document(&json)
}

pub fn parse_document(json: &[u8]) -> Result<NotesDocument> {
    let raw: RawDocument =
        serde_json::from_slice(json).wrap_err_with(|| format!("Malformed {}", NOTES_MEMBER))?;
    Ok(NotesDocument {
        active_notes: raw.active_notes.iter().map(|n| Note::from_raw(n)).collect(),
        trashed_notes: raw.trashed_notes.iter().map(|n| Note::from_raw(n)).collect(),
    })
}
