//! Queries over schema-less profile JSON
//!
//! Backend profiles have no fixed shape: the same field can sit at a
//! different depth from one account to the next. These helpers walk a
//! [`Value`] depth-first without knowing its layout. Arrays are visited in
//! order, objects in document order. Nothing here mutates the tree or
//! fails; absence is an empty result.

use serde_json::Value;

/// Gather every element of arrays stored under `name`, at any depth
///
/// Keys match case-insensitively. An array value is flattened one level
/// into the result; any other value under a matching key is searched like
/// a regular entry. Duplicates are kept in traversal order.
pub fn collect_by_key_casefold<'a>(tree: &'a Value, name: &str) -> Vec<&'a Value> {
    let name = name.to_lowercase();
    let mut found = Vec::new();
    collect_into(tree, &name, &mut found);
    found
}

fn collect_into<'a>(tree: &'a Value, name: &str, found: &mut Vec<&'a Value>) {
    match tree {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::Array(items) if key.to_lowercase() == name => found.extend(items),
                    _ => collect_into(value, name, found),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_into(item, name, found);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

/// First value stored under the exact `key`, depth-first
///
/// A direct hit on an object wins over anything nested in its siblings.
/// A direct hit holding `null` stops the search inside that object but
/// counts as a miss for the enclosing level, which keeps looking.
pub fn find_first_by_key<'a>(tree: &'a Value, key: &str) -> Option<&'a Value> {
    match tree {
        Value::Object(map) => {
            if let Some(value) = map.get(key) {
                return (!value.is_null()).then_some(value);
            }
            map.values().find_map(|value| find_first_by_key(value, key))
        }
        Value::Array(items) => items.iter().find_map(|item| find_first_by_key(item, key)),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
    }
}

/// Sum integers stored under keys containing `substring`, at any depth
///
/// A key matches when its lower-cased form contains `substring`. Only
/// integer values are added; a matching key holding anything else is
/// searched like a non-matching one, so its own children count only if
/// their keys match too. Booleans and floats are not integers.
pub fn sum_by_key_substring(tree: &Value, substring: &str) -> i64 {
    match tree {
        Value::Object(map) => map.iter().fold(0i64, |total, (key, value)| {
            let contribution = match as_integer(value) {
                Some(n) if key.to_lowercase().contains(substring) => n,
                _ => sum_by_key_substring(value, substring),
            };
            total.saturating_add(contribution)
        }),
        Value::Array(items) => items
            .iter()
            .fold(0i64, |total, item| total.saturating_add(sum_by_key_substring(item, substring))),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => 0,
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX)),
        _ => None,
    }
}

/// Truthiness as the backend's own tooling sees it
///
/// `null`, `false`, zero, the empty string, and empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Text for display: strings verbatim, anything else as compact JSON
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Read a points value leniently
///
/// Integers pass through, floats truncate, numeric strings parse.
/// Anything else is zero.
pub fn as_score(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(0)
        }
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => 0,
    }
}
