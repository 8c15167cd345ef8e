//! `sb-buildpatches` — turns a modder's locally edited copy of the
//! Starbound assets into a distributable set of `.patch` files.
//!
//! The interesting parts live in two modules:
//!
//! - [`json_patch_diff`] — the structural diff that compares a baseline
//!   asset document against its modified version and emits an ordered
//!   JSON Patch (RFC 6902 `add`/`remove`/`replace`) operation sequence.
//! - [`classify`] — the per-file routing decision: diff the file, copy it
//!   verbatim, or skip it entirely.
//!
//! Everything else is plumbing around them: [`json_patch`] holds the
//! operation model, wire codec, and an applier used to verify round
//! trips; [`builder`] walks the working tree and drives the per-file
//! pipeline; [`strip_comments`] handles the non-standard comments
//! Starbound asset files are allowed to carry.

pub mod builder;
pub mod classify;
pub mod config;
pub mod json_patch;
pub mod json_patch_diff;
pub mod strip_comments;

pub use builder::{build, BuildReport, FileError, FileOutcome};
pub use classify::{classify, Category, ClassifyTables};
pub use config::{BuildConfig, ConfigError};
pub use json_patch_diff::diff;
