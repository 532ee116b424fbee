#![allow(dead_code)]

use git2::Repository;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::FileOptions;

/// One `{content, creationDate, lastModified}` entry.
pub fn note_json(content: &str, created: &str, modified: &str) -> serde_json::Value {
    serde_json::json!({
        "content": content,
        "creationDate": created,
        "lastModified": modified,
    })
}

/// Write a Simplenote-style archive to `path`.
pub fn write_archive(path: &Path, active: Vec<serde_json::Value>, trashed: Vec<serde_json::Value>) {
    let doc = serde_json::json!({ "activeNotes": active, "trashedNotes": trashed });
    write_raw_archive(path, &doc.to_string());
}

/// Write an archive whose `source/notes.json` is exactly `json`.
pub fn write_raw_archive(path: &Path, json: &str) {
    let mut zip = ZipWriter::new(File::create(path).expect("create archive"));
    zip.start_file("source/notes.json", FileOptions::default())
        .expect("start member");
    zip.write_all(json.as_bytes()).expect("write member");
    zip.finish().expect("finish archive");
}

/// Commit messages from HEAD back to the root.
pub fn commit_messages(repo: &Repository) -> Vec<String> {
    let mut walk = repo.revwalk().expect("revwalk");
    walk.set_sorting(git2::Sort::TOPOLOGICAL).expect("sorting");
    walk.push_head().expect("push head");
    walk.map(|oid| {
        repo.find_commit(oid.expect("oid"))
            .expect("commit")
            .message()
            .unwrap_or_default()
            .to_string()
    })
    .collect()
}

/// Sorted entry names in the tree of the HEAD commit.
pub fn head_files(repo: &Repository) -> Vec<String> {
    let tree = repo
        .head()
        .expect("head")
        .peel_to_tree()
        .expect("tree");
    let mut names: Vec<String> = tree
        .iter()
        .filter_map(|e| e.name().map(str::to_string))
        .collect();
    names.sort();
    names
}

/// Raw bytes of `name` as stored in the tree of `commit`.
pub fn blob_at(repo: &Repository, commit: &git2::Commit, name: &str) -> Option<String> {
    let entry = commit.tree().ok()?.get_name(name)?.to_object(repo).ok()?;
    let blob = entry.peel_to_blob().ok()?;
    Some(String::from_utf8_lossy(blob.content()).into_owned())
}
