//! Core types for the JSON Patch module.

use serde_json::Value;
use thiserror::Error;

pub use buildpatches_json_pointer::Path;

#[derive(Debug, Error, PartialEq)]
pub enum PatchError {
    #[error("path does not resolve to an existing location")]
    NotFound,
    #[error("invalid array index")]
    InvalidIndex,
    #[error("target is neither an object nor an array")]
    InvalidTarget,
    #[error("invalid operation: {0}")]
    InvalidOp(String),
}

/// A single JSON Patch operation.
///
/// `path` is stored parsed (a sequence of reference tokens); the wire
/// form in [`super::codec`] renders it as an RFC 6901 pointer string.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: Path, value: Value },
    Remove { path: Path },
    Replace { path: Path, value: Value },
}

impl Op {
    /// The wire-format operation name.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Op::Add { path, .. } => path,
            Op::Remove { path } => path,
            Op::Replace { path, .. } => path,
        }
    }
}
