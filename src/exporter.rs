use crate::importer::Note;
use crate::naming::{self, DerivedName, SUFFIX_LEN, SuffixSource};
use eyre::{Context, Result, eyre};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

/// How many suffixed names we try before giving up on a colliding note.
pub const MAX_SUFFIX_ATTEMPTS: usize = 16;

/// Render a note: front-matter block followed by the untouched content.
pub fn write_note_markdown<W: Write>(writer: &mut W, note: &Note) -> std::io::Result<()> {
    writeln!(writer, "---")?;
    writeln!(writer, "created: {}", note.creation_date)?;
    writeln!(writer, "modified: {}", note.last_modified)?;
    writeln!(writer, "---")?;
    writer.write_all(note.content.as_bytes())
}

/// Write `note` into `folder` as `<derived name>.md`.
///
/// Returns the file name relative to `folder`, or `None` when the note has
/// no usable name and nothing was written. When the plain name is taken,
/// `_` plus a short suffix from `suffixes` is inserted before the extension.
/// The file is fully written and closed when this returns.
pub fn write_note(
    folder: &Path,
    note: &Note,
    suffixes: &mut dyn SuffixSource,
) -> Result<Option<String>> {
    let stem = match naming::derive(&note.content) {
        DerivedName::Name(stem) => stem,
        DerivedName::Skip => return Ok(None),
    };

    let (filename, file) = create_unique(folder, &stem, suffixes)?;
    let mut writer = BufWriter::new(file);
    write_note_markdown(&mut writer, note)
        .and_then(|_| writer.flush())
        .wrap_err_with(|| format!("Unable to write file: {}", filename))?;

    Ok(Some(filename))
}

fn create_unique(
    folder: &Path,
    stem: &str,
    suffixes: &mut dyn SuffixSource,
) -> Result<(String, File)> {
    let plain = format!("{}.md", stem);
    if let Some(file) = create_new(folder, &plain)? {
        return Ok((plain, file));
    }

    for _ in 0..MAX_SUFFIX_ATTEMPTS {
        let candidate = format!("{}_{}.md", stem, suffixes.suffix(SUFFIX_LEN));
        if let Some(file) = create_new(folder, &candidate)? {
            return Ok((candidate, file));
        }
    }

    Err(eyre!(
        "Unable to find a free name for {} after {} attempts",
        plain,
        MAX_SUFFIX_ATTEMPTS
    ))
}

// `None` when something already sits at that path.
fn create_new(folder: &Path, filename: &str) -> Result<Option<File>> {
    let path = folder.join(filename);
    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(e).wrap_err_with(|| format!("Unable to create new file: {}", path.display())),
    }
}
