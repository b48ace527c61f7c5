use std::fmt;
use serde_json::Value;

/// One point where two JSON documents disagree
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    /// Location of the difference, e.g. `$.transactions[2].fee`
    pub path: String,
    pub kind: DifferenceKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DifferenceKind {
    /// Both sides have a value at the path and they differ
    Changed { left: Value, right: Value },
    /// Only the right document has a value at the path
    MissingLeft { right: Value },
    /// Only the left document has a value at the path
    MissingRight { left: Value },
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DifferenceKind::Changed { left, right } => {
                write!(f, "{}: {} != {}", self.path, left, right)
            }
            DifferenceKind::MissingLeft { right } => {
                write!(f, "{}: <missing> != {}", self.path, right)
            }
            DifferenceKind::MissingRight { left } => {
                write!(f, "{}: {} != <missing>", self.path, left)
            }
        }
    }
}

/// Structural diff of two JSON documents.
///
/// Objects are compared key by key, arrays index by index; any other pair of values
/// (including values of different types) is compared as a whole. Returns an empty list
/// when the documents are equal.
pub fn diff_json(left: &Value, right: &Value) -> Vec<Difference> {
    let mut differences = Vec::new();
    diff_at("$".to_string(), left, right, &mut differences);
    differences
}

fn diff_at(path: String, left: &Value, right: &Value, out: &mut Vec<Difference>) {
    match (left, right) {
        (Value::Object(left_map), Value::Object(right_map)) => {
            for (key, left_value) in left_map {
                let child = format!("{}.{}", path, key);
                match right_map.get(key) {
                    Some(right_value) => diff_at(child, left_value, right_value, out),
                    None => out.push(Difference {
                        path: child,
                        kind: DifferenceKind::MissingRight {
                            left: left_value.clone(),
                        },
                    }),
                }
            }
            for (key, right_value) in right_map {
                if !left_map.contains_key(key) {
                    out.push(Difference {
                        path: format!("{}.{}", path, key),
                        kind: DifferenceKind::MissingLeft {
                            right: right_value.clone(),
                        },
                    });
                }
            }
        }
        (Value::Array(left_items), Value::Array(right_items)) => {
            let longest = left_items.len().max(right_items.len());
            for index in 0..longest {
                let child = format!("{}[{}]", path, index);
                match (left_items.get(index), right_items.get(index)) {
                    (Some(l), Some(r)) => diff_at(child, l, r, out),
                    (Some(l), None) => out.push(Difference {
                        path: child,
                        kind: DifferenceKind::MissingRight { left: l.clone() },
                    }),
                    (None, Some(r)) => out.push(Difference {
                        path: child,
                        kind: DifferenceKind::MissingLeft { right: r.clone() },
                    }),
                    (None, None) => {}
                }
            }
        }
        _ => {
            if left != right {
                out.push(Difference {
                    path,
                    kind: DifferenceKind::Changed {
                        left: left.clone(),
                        right: right.clone(),
                    },
                });
            }
        }
    }
}
