//! Wire codec for JSON Patch operations.
//!
//! An operation serializes to `{"op": ..., "path": ..., "value": ...}`
//! with `path` as an RFC 6901 pointer string; a patch is an array of
//! these. Field order is fixed so that serialized patches are
//! byte-for-byte reproducible.

use serde_json::{json, Value};

use buildpatches_json_pointer::{format_pointer, try_parse_pointer, Path};

use super::types::{Op, PatchError};

/// Serialize one operation to its wire form.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": format_pointer(path),
            "value": value,
        }),
        Op::Remove { path } => json!({
            "op": "remove",
            "path": format_pointer(path),
        }),
        Op::Replace { path, value } => json!({
            "op": "replace",
            "path": format_pointer(path),
            "value": value,
        }),
    }
}

/// Serialize an operation sequence to a wire-form patch array.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

fn decode_path(obj: &Value) -> Result<Path, PatchError> {
    let ptr = obj
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("missing or non-string \"path\"".into()))?;
    try_parse_pointer(ptr).map_err(|e| PatchError::InvalidOp(e.to_string()))
}

fn decode_value(obj: &Value) -> Result<Value, PatchError> {
    obj.get("value")
        .cloned()
        .ok_or_else(|| PatchError::InvalidOp("missing \"value\"".into()))
}

/// Decode one wire-form operation.
pub fn from_json(obj: &Value) -> Result<Op, PatchError> {
    let name = obj
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::InvalidOp("missing or non-string \"op\"".into()))?;
    let path = decode_path(obj)?;
    match name {
        "add" => Ok(Op::Add { path, value: decode_value(obj)? }),
        "remove" => Ok(Op::Remove { path }),
        "replace" => Ok(Op::Replace { path, value: decode_value(obj)? }),
        other => Err(PatchError::InvalidOp(format!("unknown op: {other}"))),
    }
}

/// Decode a wire-form patch array.
pub fn from_json_patch(patch: &Value) -> Result<Vec<Op>, PatchError> {
    let arr = patch
        .as_array()
        .ok_or_else(|| PatchError::InvalidOp("patch must be an array".into()))?;
    arr.iter().map(from_json).collect()
}
