//! JSON Patch operation model (the RFC 6902 subset the diff emits).
//!
//! # Operations
//!
//! Only `add`, `remove`, and `replace` are modeled: the diff never emits
//! `copy`/`move`/`test`, so the applier does not accept them either — a
//! patch is valid exactly when this tool could have produced it.

pub mod apply;
pub mod codec;
pub mod types;

pub use apply::{apply_op, apply_patch};
pub use codec::{from_json, from_json_patch, to_json, to_json_patch};
pub use types::{Op, PatchError};
