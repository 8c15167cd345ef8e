//! Structural diff: generate a JSON Patch from two document trees.
//!
//! The diff is structural rather than minimal-edit-distance: arrays are
//! compared position by position instead of searching for moved or
//! reordered elements. Asset files in this domain are rarely reordered,
//! and positional comparison is linear and fully deterministic, which
//! matters because the emitted operation order is the de facto format
//! contract for anything that consumes `.patch` files.
//!
//! Emission order, fixed and tested:
//!
//! - type mismatch anywhere ⇒ one `replace` of the whole subtree;
//! - objects ⇒ `remove` for dropped keys (baseline key order), then the
//!   modified document's keys in order, each either an `add` (new key)
//!   or a recursive descent (shared key);
//! - arrays ⇒ recurse over the common prefix in ascending index order,
//!   then `add` trailing elements ascending, or `remove` trailing
//!   elements from the highest index down so no pending removal ever
//!   targets an index past the current array bound.

use serde_json::{Map, Value};

use buildpatches_json_pointer::{Path, Token};

use crate::json_patch::types::Op;

/// Generate the operation sequence that transforms `baseline` into
/// `modified` when applied in order.
///
/// Equal inputs produce an empty sequence. The diff itself cannot fail:
/// every pair of trees has a valid emission.
pub fn diff(baseline: &Value, modified: &Value) -> Vec<Op> {
    let mut ops = Vec::new();
    diff_at(&mut ops, &[], baseline, modified);
    ops
}

fn child(path: &[Token], token: impl ToString) -> Path {
    let mut p = path.to_vec();
    p.push(token.to_string());
    p
}

fn diff_at(ops: &mut Vec<Op>, path: &[Token], baseline: &Value, modified: &Value) {
    if baseline == modified {
        return;
    }
    match (baseline, modified) {
        (Value::Object(base), Value::Object(modif)) => diff_object(ops, path, base, modif),
        (Value::Array(base), Value::Array(modif)) => diff_array(ops, path, base, modif),
        // Differing primitives, and any type change: the subtree is
        // replaced atomically.
        _ => ops.push(Op::Replace { path: path.to_vec(), value: modified.clone() }),
    }
}

fn diff_object(
    ops: &mut Vec<Op>,
    path: &[Token],
    baseline: &Map<String, Value>,
    modified: &Map<String, Value>,
) {
    // Removals first, so no later sibling operation can reference a key
    // that is about to disappear.
    for key in baseline.keys() {
        if !modified.contains_key(key) {
            ops.push(Op::Remove { path: child(path, key) });
        }
    }
    for (key, modified_val) in modified {
        match baseline.get(key) {
            None => ops.push(Op::Add { path: child(path, key), value: modified_val.clone() }),
            Some(baseline_val) => diff_at(ops, &child(path, key), baseline_val, modified_val),
        }
    }
}

fn diff_array(ops: &mut Vec<Op>, path: &[Token], baseline: &[Value], modified: &[Value]) {
    let common = baseline.len().min(modified.len());
    for i in 0..common {
        diff_at(ops, &child(path, i), &baseline[i], &modified[i]);
    }
    if modified.len() > baseline.len() {
        for i in baseline.len()..modified.len() {
            ops.push(Op::Add { path: child(path, i), value: modified[i].clone() });
        }
    } else {
        // Highest index first: removing an element shifts everything
        // after it, so descending order keeps every pending removal
        // inside the current array bound.
        for i in (modified.len()..baseline.len()).rev() {
            ops.push(Op::Remove { path: child(path, i) });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_patch::apply::apply_patch;
    use crate::json_patch::codec::to_json_patch;
    use serde_json::json;

    fn roundtrip(baseline: Value, modified: Value) -> Vec<Op> {
        let ops = diff(&baseline, &modified);
        let mut doc = baseline;
        apply_patch(&mut doc, &ops).expect("patch must apply cleanly");
        assert_eq!(doc, modified, "applied patch must reproduce the modified tree");
        ops
    }

    #[test]
    fn equal_docs_emit_nothing() {
        for v in [json!(null), json!(1), json!("x"), json!([1, {"a": 2}]), json!({})] {
            assert!(diff(&v, &v).is_empty());
        }
    }

    #[test]
    fn primitive_change_is_replace() {
        let ops = roundtrip(json!({"hp": 1}), json!({"hp": 2}));
        assert_eq!(
            to_json_patch(&ops),
            json!([{"op": "replace", "path": "/hp", "value": 2}])
        );
    }

    #[test]
    fn type_change_replaces_whole_subtree() {
        let ops = roundtrip(json!({"a": {"deep": [1, 2]}}), json!({"a": [1, 2]}));
        assert_eq!(
            to_json_patch(&ops),
            json!([{"op": "replace", "path": "/a", "value": [1, 2]}])
        );
    }

    #[test]
    fn root_type_change_is_single_root_replace() {
        let ops = roundtrip(json!([1]), json!({"a": 1}));
        assert_eq!(
            to_json_patch(&ops),
            json!([{"op": "replace", "path": "", "value": {"a": 1}}])
        );
    }

    #[test]
    fn int_to_float_is_a_change() {
        let ops = roundtrip(json!({"speed": 1}), json!({"speed": 1.0}));
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].op_name(), "replace");
    }

    #[test]
    fn object_key_removed() {
        let ops = roundtrip(json!({"a": 1, "b": 2}), json!({"a": 1}));
        assert_eq!(to_json_patch(&ops), json!([{"op": "remove", "path": "/b"}]));
    }

    #[test]
    fn object_key_added() {
        let ops = roundtrip(json!({"a": 1}), json!({"a": 1, "b": 2}));
        assert_eq!(
            to_json_patch(&ops),
            json!([{"op": "add", "path": "/b", "value": 2}])
        );
    }

    #[test]
    fn object_removals_precede_additions() {
        let ops = roundtrip(json!({"old": 1, "keep": 2}), json!({"keep": 2, "new": 3}));
        assert_eq!(
            to_json_patch(&ops),
            json!([
                {"op": "remove", "path": "/old"},
                {"op": "add", "path": "/new", "value": 3},
            ])
        );
    }

    #[test]
    fn array_trailing_growth_adds_ascending() {
        let ops = roundtrip(json!([1]), json!([1, 2, 3]));
        assert_eq!(
            to_json_patch(&ops),
            json!([
                {"op": "add", "path": "/1", "value": 2},
                {"op": "add", "path": "/2", "value": 3},
            ])
        );
    }

    #[test]
    fn array_shrink_removes_from_highest_index_down() {
        let ops = roundtrip(json!({"a": [1, 2, 3]}), json!({"a": [1]}));
        assert_eq!(
            to_json_patch(&ops),
            json!([
                {"op": "remove", "path": "/a/2"},
                {"op": "remove", "path": "/a/1"},
            ])
        );
    }

    #[test]
    fn array_interior_edit_recurses_by_index() {
        let ops = roundtrip(json!([{"hp": 1}, {"hp": 2}]), json!([{"hp": 1}, {"hp": 9}]));
        assert_eq!(
            to_json_patch(&ops),
            json!([{"op": "replace", "path": "/1/hp", "value": 9}])
        );
    }

    #[test]
    fn array_interior_edit_plus_shrink() {
        // Interior edits are emitted during the common-prefix pass,
        // before the trailing removals.
        let ops = roundtrip(json!([1, 2, 3, 4]), json!([1, 9]));
        assert_eq!(
            to_json_patch(&ops),
            json!([
                {"op": "replace", "path": "/1", "value": 9},
                {"op": "remove", "path": "/3"},
                {"op": "remove", "path": "/2"},
            ])
        );
    }

    #[test]
    fn keys_needing_pointer_escapes() {
        let ops = roundtrip(json!({"a/b": 1, "c~d": 2}), json!({"a/b": 9, "c~d": 2}));
        assert_eq!(
            to_json_patch(&ops),
            json!([{"op": "replace", "path": "/a~1b", "value": 9}])
        );
    }

    #[test]
    fn null_is_a_value_not_an_absence() {
        let ops = roundtrip(json!({"a": null}), json!({"a": 1}));
        assert_eq!(
            to_json_patch(&ops),
            json!([{"op": "replace", "path": "/a", "value": 1}])
        );
        let ops = roundtrip(json!({"a": 1}), json!({"a": null}));
        assert_eq!(
            to_json_patch(&ops),
            json!([{"op": "replace", "path": "/a", "value": null}])
        );
    }

    #[test]
    fn deterministic_for_equal_inputs() {
        let baseline = json!({"z": [1, 2], "a": {"x": 1, "y": [true, false]}});
        let modified = json!({"a": {"y": [false]}, "b": 3});
        assert_eq!(diff(&baseline, &modified), diff(&baseline, &modified));
    }

    #[test]
    fn end_to_end_example() {
        let baseline = json!({"maxHealth": 100, "tags": ["a", "b"]});
        let modified = json!({"maxHealth": 150, "tags": ["a", "b", "c"]});
        let ops = roundtrip(baseline, modified);
        assert_eq!(
            to_json_patch(&ops),
            json!([
                {"op": "replace", "path": "/maxHealth", "value": 150},
                {"op": "add", "path": "/tags/2", "value": "c"},
            ])
        );
    }

    #[test]
    fn deeply_nested_mixed_roundtrip() {
        let baseline = json!({
            "name": "gun",
            "stats": {"dmg": 10, "spread": 0.5, "tags": ["kinetic", "two-handed"]},
            "frames": [[0, 1], [2, 3], [4, 5]],
        });
        let modified = json!({
            "name": "gun",
            "stats": {"dmg": 12, "tags": ["kinetic"], "element": "fire"},
            "frames": [[0, 1], [2, 9]],
        });
        roundtrip(baseline, modified);
    }
}
