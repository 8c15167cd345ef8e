//! Per-file routing: diff the file, copy it verbatim, or skip it.
//!
//! Classification is a pure, total function of the file name and whether
//! a baseline counterpart exists. Extension matching is case-sensitive
//! and exact (the Starbound assets really do contain both `.png` and
//! `.PNG` files).

use std::path::Path;

/// Routing decision for one working-tree file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Never processed and never produces output.
    Skip,
    /// Copied byte for byte to the destination.
    CopyVerbatim,
    /// Diffed against its baseline counterpart into a `.patch` file.
    Diff,
}

/// The static routing tables.
///
/// The defaults mirror the extension lists the Starbound modding
/// community settled on; callers embedding the library can supply their
/// own.
#[derive(Debug, Clone)]
pub struct ClassifyTables {
    /// Extensions that are excluded from output entirely.
    pub skip_extensions: Vec<&'static str>,
    /// Extensions of binary or non-JSON formats that must ship whole.
    pub copy_extensions: Vec<&'static str>,
    /// Exact basenames (metadata sentinels and the like) that must ship
    /// whole regardless of extension.
    pub copy_basenames: Vec<&'static str>,
}

impl Default for ClassifyTables {
    fn default() -> Self {
        Self {
            // Disabled assets should not propagate into a distributable
            // patch set. The stray .ase ships with the vanilla assets.
            skip_extensions: vec![".disabled", ".objectdisabled", ".ase"],
            copy_extensions: vec![
                ".md", ".png", ".PNG", ".wav", ".ogg", ".ttf", ".lua", ".txt", ".psd",
                ".pdn", ".broken", ".db",
            ],
            copy_basenames: vec!["_metadata", ".metadata", ".gitignore", ".git", "_previewimage"],
        }
    }
}

/// Extension of `path` including the leading dot, or `""` if there is
/// none. Dotfiles like `.gitignore` have no extension; they are matched
/// by basename instead.
fn extension_of(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => String::new(),
    }
}

/// Decide how one file is routed.
///
/// Precedence: skip extension, then copy-only extension or basename,
/// then a missing baseline counterpart (a brand-new file has nothing to
/// diff against and ships whole), and only then `Diff`. Unknown or
/// absent extensions fall through to `Diff`: anything not known to be
/// binary is assumed to be a JSON-like asset.
pub fn classify(relative_path: &Path, tables: &ClassifyTables, baseline_exists: bool) -> Category {
    let ext = extension_of(relative_path);
    if tables.skip_extensions.contains(&ext.as_str()) {
        return Category::Skip;
    }
    let basename = relative_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if tables.copy_extensions.contains(&ext.as_str())
        || tables.copy_basenames.contains(&basename.as_str())
    {
        return Category::CopyVerbatim;
    }
    if !baseline_exists {
        return Category::CopyVerbatim;
    }
    Category::Diff
}
