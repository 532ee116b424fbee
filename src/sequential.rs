use crate::exporter::write_note;
use crate::history::{Bootstrap, Change, HistoryRecorder, open_or_init};
use crate::importer::{self, Note, NoteKind, NotesDocument};
use crate::naming::{RandomSuffix, SuffixSource};
use crate::utils::{ExportConfig, ProcessResult};
use eyre::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

/// Per-run tallies, printed as the closing summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub exported: usize,
    pub trashed: usize,
    pub skipped: usize,
}

impl ExportSummary {
    fn count(&mut self, result: &ProcessResult) {
        match result {
            ProcessResult::Exported(_) => self.exported += 1,
            ProcessResult::Trashed(_) => self.trashed += 1,
            ProcessResult::Skipped => self.skipped += 1,
        }
    }
}

/// The main entry point for the export: read the archive, prepare the
/// repository, then replay every note into history.
pub fn execute(config: ExportConfig) -> Result<ExportSummary> {
    execute_with(&config, &mut RandomSuffix)
}

/// Same as [`execute`] with a caller-chosen suffix source.
pub fn execute_with(config: &ExportConfig, suffixes: &mut dyn SuffixSource) -> Result<ExportSummary> {
    let document = importer::read_archive(&config.input)?;

    let (repo, how) = open_or_init(&config.output)?;
    if config.verbose && !config.quiet {
        match how {
            Bootstrap::Initialized => eprintln!("Initialized repository in {}", config.output.display()),
            Bootstrap::Opened => eprintln!("Appending to existing repository in {}", config.output.display()),
        }
    }
    let recorder = HistoryRecorder::new(repo, config.author.clone());

    run_internal(&document, &recorder, &config.output, config, suffixes)
}

fn progress_bar(total: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
    {
        bar.set_style(style.progress_chars("=>-"));
    }
    bar.println(format!("Found {} notes.", total));
    bar
}

// The bar swallows println when it is not drawn (quiet, or stderr is not a tty).
fn report(pb: &ProgressBar, line: String) {
    if pb.is_hidden() {
        eprintln!("{}", line);
    } else {
        pb.println(line);
    }
}

fn run_internal(
    document: &NotesDocument,
    recorder: &HistoryRecorder,
    folder: &Path,
    config: &ExportConfig,
    suffixes: &mut dyn SuffixSource,
) -> Result<ExportSummary> {
    let pb = progress_bar(document.len() as u64, config.quiet);
    let mut summary = ExportSummary::default();

    let passes = [
        (NoteKind::Active, &document.active_notes),
        (NoteKind::Trashed, &document.trashed_notes),
    ];
    for (kind, notes) in passes {
        for note in notes {
            let result = process_note(note, kind, recorder, folder, suffixes)?;
            if config.verbose && !config.quiet {
                let line = match &result {
                    ProcessResult::Exported(name) => format!("Exported: {}", name),
                    ProcessResult::Trashed(name) => format!("Deleted:  {}", name),
                    ProcessResult::Skipped => "Skipped:  note without a title line".to_string(),
                };
                report(&pb, line);
            }
            summary.count(&result);
            pb.inc(1);
        }
    }

    pb.finish_and_clear();

    if !config.quiet {
        eprintln!(
            "Done. {} exported, {} trashed, {} skipped.",
            summary.exported, summary.trashed, summary.skipped
        );
    }

    Ok(summary)
}

fn remove_exported(folder: &Path, filename: &str) -> Result<()> {
    fs::remove_file(folder.join(filename))
        .wrap_err_with(|| format!("Unable to remove file from worktree: {}", filename))
}

/// Write one note and record it. Trashed notes get a second commit that
/// removes the file again, so history keeps both their content and their
/// deletion.
pub fn process_note(
    note: &Note,
    kind: NoteKind,
    recorder: &HistoryRecorder,
    folder: &Path,
    suffixes: &mut dyn SuffixSource,
) -> Result<ProcessResult> {
    let Some(filename) = write_note(folder, note, suffixes)? else {
        return Ok(ProcessResult::Skipped);
    };

    match kind {
        NoteKind::Active => {
            recorder.record_add(&filename, &Change::Export.message(&filename))?;
            Ok(ProcessResult::Exported(filename))
        }
        NoteKind::Trashed => {
            recorder.record_add(&filename, &Change::ExportToDelete.message(&filename))?;
            remove_exported(folder, &filename)?;
            recorder.record_remove(&filename, &Change::Delete.message(&filename))?;
            Ok(ProcessResult::Trashed(filename))
        }
    }
}
