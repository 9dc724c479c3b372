//! Order-insensitive structural comparison of JSON documents.
//!
//! Mapping keys are compared as sets and arrays as multisets, so two
//! documents that only differ in key or item order are equivalent. Scalars
//! compare by value and type: `1` and `1.0` differ.

use std::fmt;

use serde_json::Value;

/// A single difference between an old and a new document.
///
/// Paths are JSON Pointers (RFC 6901). For array items the index refers to
/// the item's position in the side it was found in.
#[derive(Debug, Clone, PartialEq)]
pub enum Difference {
    Added { path: String, value: Value },
    Removed { path: String, value: Value },
    Changed { path: String, old: Value, new: Value },
}

impl Difference {
    pub fn path(&self) -> &str {
        match self {
            Difference::Added { path, .. }
            | Difference::Removed { path, .. }
            | Difference::Changed { path, .. } => path,
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::Added { path, value } => write!(f, "+ {path}: {value}"),
            Difference::Removed { path, value } => write!(f, "- {path}: {value}"),
            Difference::Changed { path, old, new } => write!(f, "~ {path}: {old} -> {new}"),
        }
    }
}

/// Every difference between `old` and `new`. Empty means equivalent.
pub fn diff(old: &Value, new: &Value) -> Vec<Difference> {
    let mut out = Vec::new();
    diff_at(String::new(), old, new, &mut out);
    out
}

/// Whether two values are equal ignoring key and array order.
pub fn equivalent(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| equivalent(v, w)))
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && {
                let (unmatched_old, unmatched_new) = match_items(x, y);
                unmatched_old.is_empty() && unmatched_new.is_empty()
            }
        }
        _ => a == b,
    }
}

fn diff_at(path: String, old: &Value, new: &Value, out: &mut Vec<Difference>) {
    match (old, new) {
        (Value::Object(a), Value::Object(b)) => {
            for (key, va) in a {
                let child = child_path(&path, key);
                match b.get(key) {
                    Some(vb) => diff_at(child, va, vb, out),
                    None => out.push(Difference::Removed {
                        path: child,
                        value: va.clone(),
                    }),
                }
            }
            for (key, vb) in b {
                if !a.contains_key(key) {
                    out.push(Difference::Added {
                        path: child_path(&path, key),
                        value: vb.clone(),
                    });
                }
            }
        }
        (Value::Array(a), Value::Array(b)) => diff_items(&path, a, b, out),
        _ if old == new => {}
        _ => out.push(Difference::Changed {
            path,
            old: old.clone(),
            new: new.clone(),
        }),
    }
}

fn diff_items(path: &str, a: &[Value], b: &[Value], out: &mut Vec<Difference>) {
    let (unmatched_old, unmatched_new) = match_items(a, b);

    // A single replaced container is reported as nested changes.
    if let ([i], [j]) = (unmatched_old.as_slice(), unmatched_new.as_slice()) {
        let both_objects = a[*i].is_object() && b[*j].is_object();
        let both_arrays = a[*i].is_array() && b[*j].is_array();
        if both_objects || both_arrays {
            diff_at(child_path(path, &i.to_string()), &a[*i], &b[*j], out);
            return;
        }
    }

    for i in unmatched_old {
        out.push(Difference::Removed {
            path: child_path(path, &i.to_string()),
            value: a[i].clone(),
        });
    }
    for j in unmatched_new {
        out.push(Difference::Added {
            path: child_path(path, &j.to_string()),
            value: b[j].clone(),
        });
    }
}

/// Pair up equivalent items; returns the indices left over on each side.
fn match_items(a: &[Value], b: &[Value]) -> (Vec<usize>, Vec<usize>) {
    let mut taken = vec![false; b.len()];
    let mut unmatched_old = Vec::new();

    for (i, va) in a.iter().enumerate() {
        let found = b
            .iter()
            .enumerate()
            .position(|(j, vb)| !taken[j] && equivalent(va, vb));
        match found {
            Some(j) => taken[j] = true,
            None => unmatched_old.push(i),
        }
    }

    let unmatched_new = taken
        .iter()
        .enumerate()
        .filter(|(_, t)| !**t)
        .map(|(j, _)| j)
        .collect();
    (unmatched_old, unmatched_new)
}

fn child_path(parent: &str, token: &str) -> String {
    let escaped = token.replace('~', "~0").replace('/', "~1");
    format!("{parent}/{escaped}")
}
