//! JSON Patch apply logic.
//!
//! Replays an operation sequence against a document in place. Not part of
//! the patch-building pipeline itself; it exists to verify the round-trip
//! property of the diff (`apply(baseline, diff(baseline, modified))` must
//! reproduce `modified`) and as a convenience for downstream consumers.

use serde_json::Value;

use buildpatches_json_pointer::{get_mut, is_valid_index, Token};

use super::types::{Op, PatchError};

/// Array index token: decimal digits, no leading zeros, no sign.
fn parse_index(token: &str) -> Result<usize, PatchError> {
    if !is_valid_index(token) {
        return Err(PatchError::InvalidIndex);
    }
    token.parse().map_err(|_| PatchError::InvalidIndex)
}

fn apply_add(doc: &mut Value, path: &[Token], value: Value) -> Result<(), PatchError> {
    if path.is_empty() {
        *doc = value;
        return Ok(());
    }
    let (parent_path, key) = path.split_at(path.len() - 1);
    let key = &key[0];
    let parent = get_mut(doc, parent_path).ok_or(PatchError::NotFound)?;
    match parent {
        Value::Object(map) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        Value::Array(arr) => {
            if key == "-" {
                arr.push(value);
                return Ok(());
            }
            let idx = parse_index(key)?;
            if idx > arr.len() {
                return Err(PatchError::InvalidIndex);
            }
            arr.insert(idx, value);
            Ok(())
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_remove(doc: &mut Value, path: &[Token]) -> Result<(), PatchError> {
    if path.is_empty() {
        return Err(PatchError::InvalidTarget);
    }
    let (parent_path, key) = path.split_at(path.len() - 1);
    let key = &key[0];
    let parent = get_mut(doc, parent_path).ok_or(PatchError::NotFound)?;
    match parent {
        Value::Object(map) => {
            map.remove(key).ok_or(PatchError::NotFound)?;
            Ok(())
        }
        Value::Array(arr) => {
            let idx = parse_index(key)?;
            if idx >= arr.len() {
                return Err(PatchError::NotFound);
            }
            arr.remove(idx);
            Ok(())
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

fn apply_replace(doc: &mut Value, path: &[Token], value: Value) -> Result<(), PatchError> {
    if path.is_empty() {
        *doc = value;
        return Ok(());
    }
    let (parent_path, key) = path.split_at(path.len() - 1);
    let key = &key[0];
    let parent = get_mut(doc, parent_path).ok_or(PatchError::NotFound)?;
    match parent {
        Value::Object(map) => {
            let slot = map.get_mut(key).ok_or(PatchError::NotFound)?;
            *slot = value;
            Ok(())
        }
        Value::Array(arr) => {
            let idx = parse_index(key)?;
            let slot = arr.get_mut(idx).ok_or(PatchError::NotFound)?;
            *slot = value;
            Ok(())
        }
        _ => Err(PatchError::InvalidTarget),
    }
}

/// Apply a single operation to `doc` in place.
pub fn apply_op(doc: &mut Value, op: &Op) -> Result<(), PatchError> {
    match op {
        Op::Add { path, value } => apply_add(doc, path, value.clone()),
        Op::Remove { path } => apply_remove(doc, path),
        Op::Replace { path, value } => apply_replace(doc, path, value.clone()),
    }
}

/// Apply an operation sequence to `doc` in place, stopping at the first
/// failing operation.
///
/// The document is left in whatever state the successful prefix produced;
/// callers that need all-or-nothing semantics should apply to a clone.
pub fn apply_patch(doc: &mut Value, ops: &[Op]) -> Result<(), PatchError> {
    for op in ops {
        apply_op(doc, op)?;
    }
    Ok(())
}
