//! The per-file build pipeline.
//!
//! Walks the mod's working tree once, routes every file through the
//! classifier, and either copies it verbatim or diffs it against its
//! baseline counterpart into a `.patch` file. Files are independent
//! units of work; one file's failure is recorded and the run continues.
//! Processing is sequential, which keeps the diagnostic output in a
//! stable order.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};
use walkdir::WalkDir;

use crate::classify::{classify, Category, ClassifyTables};
use crate::config::BuildConfig;
use crate::json_patch::codec::to_json_patch;
use crate::json_patch::types::Op;
use crate::json_patch_diff::diff;
use crate::strip_comments::strip_comments;

/// A per-file failure. None of these abort the run.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to load {path}: {reason}")]
    AssetRead { path: PathBuf, reason: String },
    #[error("failed to copy mod file to {dest}: {source}")]
    Copy {
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write mod patch file to {dest}: {source}")]
    PatchWrite {
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What the pipeline did with one file.
#[derive(Debug, PartialEq, Eq)]
pub enum FileAction {
    Skipped,
    Copied(PathBuf),
    /// A patch file was written; carries the emitted operation count.
    Patched(PathBuf, usize),
}

/// One file's outcome, success or failure.
#[derive(Debug)]
pub struct FileOutcome {
    pub relative: PathBuf,
    pub result: Result<FileAction, FileError>,
}

/// Everything that happened during a run. The aggregate failure flag is
/// derived from the per-file outcomes, never toggled independently.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BuildReport {
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| o.result.is_err())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Run the whole pipeline over the configured working tree.
pub fn build(config: &BuildConfig, tables: &ClassifyTables) -> BuildReport {
    let mut report = BuildReport::default();
    let walker = WalkDir::new(&config.working_dir)
        .follow_links(false)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| config.working_dir.clone());
                record(
                    &mut report,
                    path.clone(),
                    Err(FileError::AssetRead { path, reason: err.to_string() }),
                );
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        // strip_prefix cannot fail: the walker only yields paths under
        // the working root.
        let relative = match entry.path().strip_prefix(&config.working_dir) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };
        let result = process_file(config, tables, &relative, entry.path());
        record(&mut report, relative, result);
    }
    report
}

fn record(report: &mut BuildReport, relative: PathBuf, result: Result<FileAction, FileError>) {
    match &result {
        Ok(FileAction::Skipped) => debug!(file = %relative.display(), "skipped"),
        Ok(FileAction::Copied(dest)) => {
            info!(dest = %dest.display(), "copied mod file")
        }
        Ok(FileAction::Patched(dest, ops)) => {
            info!(dest = %dest.display(), ops, "created mod patch file")
        }
        Err(err) => error!(file = %relative.display(), %err, "failed"),
    }
    report.outcomes.push(FileOutcome { relative, result });
}

fn process_file(
    config: &BuildConfig,
    tables: &ClassifyTables,
    relative: &Path,
    source: &Path,
) -> Result<FileAction, FileError> {
    let baseline = config.asset_path(relative);
    let baseline_exists = baseline.is_file();
    match classify(relative, tables, baseline_exists) {
        Category::Skip => Ok(FileAction::Skipped),
        Category::CopyVerbatim => {
            if !baseline_exists {
                debug!(
                    file = %relative.display(),
                    "no counterpart in Starbound assets, copying whole"
                );
            }
            let dest = config.dest_path(relative);
            copy_verbatim(source, &dest)?;
            Ok(FileAction::Copied(dest))
        }
        Category::Diff => {
            let baseline_doc = load_document(&baseline)?;
            let modified_doc = load_document(source)?;
            let ops = diff(&baseline_doc, &modified_doc);
            let dest = config.patch_path(relative);
            let text = render_patch(&ops).map_err(|e| FileError::PatchWrite {
                dest: dest.clone(),
                source: std::io::Error::other(e),
            })?;
            write_atomic(&dest, text.as_bytes())
                .map_err(|source| FileError::PatchWrite { dest: dest.clone(), source })?;
            Ok(FileAction::Patched(dest, ops.len()))
        }
    }
}

/// Read, strip comments, and parse one asset document.
fn load_document(path: &Path) -> Result<Value, FileError> {
    let read_err = |e: String| FileError::AssetRead { path: path.to_path_buf(), reason: e };
    let raw = fs::read_to_string(path).map_err(|e| read_err(e.to_string()))?;
    serde_json::from_str(&strip_comments(&raw)).map_err(|e| read_err(e.to_string()))
}

fn copy_verbatim(source: &Path, dest: &Path) -> Result<(), FileError> {
    let copy_err = |source| FileError::Copy { dest: dest.to_path_buf(), source };
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(copy_err)?;
    }
    fs::copy(source, dest).map_err(copy_err)?;
    Ok(())
}

/// Serialize a patch: tab-indented pretty printing with CRLF line
/// endings, matching the format Starbound modders expect.
pub fn render_patch(ops: &[Op]) -> Result<String, serde_json::Error> {
    use serde::Serialize;

    let wire = to_json_patch(ops);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    wire.serialize(&mut ser)?;
    // serde_json only emits \n for formatting; string contents escape
    // theirs, so a blanket substitution is safe.
    let text = String::from_utf8_lossy(&buf).replace('\n', "\r\n");
    Ok(text)
}

/// Write via a sibling temp file and rename, so a failed write never
/// leaves a truncated patch at the destination.
fn write_atomic(dest: &Path, contents: &[u8]) -> std::io::Result<()> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
    tmp.write_all(contents)?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_empty_patch() {
        assert_eq!(render_patch(&[]).unwrap(), "[]");
    }

    #[test]
    fn render_uses_tabs_and_crlf() {
        let ops = vec![Op::Replace { path: vec!["maxHealth".into()], value: json!(150) }];
        let text = render_patch(&ops).unwrap();
        assert_eq!(
            text,
            "[\r\n\t{\r\n\t\t\"op\": \"replace\",\r\n\t\t\"path\": \"/maxHealth\",\r\n\t\t\"value\": 150\r\n\t}\r\n]"
        );
        assert!(!text.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn render_keeps_escaped_newlines_in_strings() {
        let ops = vec![Op::Add { path: vec!["desc".into()], value: json!("line1\nline2") }];
        let text = render_patch(&ops).unwrap();
        // The string's newline stays escaped; only formatting newlines
        // become CRLF.
        assert!(text.contains("line1\\nline2"));
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let dest = dir.path().join("out/file.patch");
        write_atomic(&dest, b"first").unwrap();
        write_atomic(&dest, b"second").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "second");
    }
}
