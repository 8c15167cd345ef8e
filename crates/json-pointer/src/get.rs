use serde_json::Value;

use crate::Token;

/// Look up the value at `path`, or `None` if any step fails to resolve.
///
/// The `-` end-of-array token never resolves to an existing element.
pub fn get<'a>(doc: &'a Value, path: &[Token]) -> Option<&'a Value> {
    let mut current = doc;
    for token in path {
        match current {
            Value::Object(map) => {
                current = map.get(token)?;
            }
            Value::Array(arr) => {
                if token == "-" {
                    return None;
                }
                let idx: usize = token.parse().ok()?;
                current = arr.get(idx)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Mutable variant of [`get`].
pub fn get_mut<'a>(doc: &'a mut Value, path: &[Token]) -> Option<&'a mut Value> {
    let mut current = doc;
    for token in path {
        match current {
            Value::Object(map) => {
                current = map.get_mut(token)?;
            }
            Value::Array(arr) => {
                if token == "-" {
                    return None;
                }
                let idx: usize = token.parse().ok()?;
                current = arr.get_mut(idx)?;
            }
            _ => return None,
        }
    }
    Some(current)
}
