use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::{PathError, Result};
use crate::path::{FieldPath, Segment};

/// Value(s) produced by [`get_field`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    /// The path ended on a single value.
    Value(&'a Value),
    /// The path fanned out over a collection; one entry per element.
    Many(Vec<Resolved<'a>>),
}

impl<'a> Resolved<'a> {
    /// The single resolved value, if the path did not fan out.
    pub fn as_value(&self) -> Option<&'a Value> {
        match self {
            Resolved::Value(value) => Some(value),
            Resolved::Many(_) => None,
        }
    }

    /// Clone into an owned value; fan-out results become arrays.
    pub fn into_value(self) -> Value {
        match self {
            Resolved::Value(value) => value.clone(),
            Resolved::Many(items) => {
                Value::Array(items.into_iter().map(Resolved::into_value).collect())
            }
        }
    }
}

impl FieldPath {
    /// True iff the path fully resolves inside `node`.
    ///
    /// Never fails: a missing key, a bad position or an index on a scalar all
    /// simply mean the field is absent.
    pub fn exists_in(&self, node: &Value) -> bool {
        has_segments(node, self.segments())
    }

    /// Read the value(s) the path addresses inside `node`.
    pub fn resolve<'a>(&self, node: &'a Value) -> Result<Resolved<'a>> {
        get_segments(node, self.segments(), self.as_str())
    }
}

/// Check whether `path` resolves inside `node`.
///
/// Only a malformed path is an error; absence is `Ok(false)`.
pub fn has_field(node: &Value, path: &str) -> Result<bool> {
    Ok(FieldPath::parse(path)?.exists_in(node))
}

/// Read the value(s) at `path` inside `node`.
pub fn get_field<'a>(node: &'a Value, path: &str) -> Result<Resolved<'a>> {
    FieldPath::parse(path)?.resolve(node)
}

/// Every dot-path reachable by descending through mappings only.
///
/// Sequences are leaves here: their elements are not enumerated.
pub fn flatten(node: &Value) -> BTreeSet<String> {
    let mut fields = BTreeSet::new();
    collect_fields(node, None, &mut fields);
    fields
}

fn collect_fields(node: &Value, prefix: Option<&str>, fields: &mut BTreeSet<String>) {
    let Value::Object(map) = node else {
        return;
    };

    for (key, value) in map {
        let full_key = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        collect_fields(value, Some(&full_key), fields);
        fields.insert(full_key);
    }
}

fn has_segments(node: &Value, segments: &[Segment]) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return true;
    };
    let Some(value) = node.get(segment.name.as_str()) else {
        return false;
    };

    match (value, segment.index.as_deref()) {
        (Value::Array(items), None) => {
            rest.is_empty() || items.iter().all(|item| has_segments(item, rest))
        }
        (Value::Object(map), None) => {
            rest.is_empty() || map.values().all(|item| has_segments(item, rest))
        }
        (Value::Array(items), Some(index)) => index
            .parse::<usize>()
            .ok()
            .and_then(|position| items.get(position))
            .is_some_and(|item| has_segments(item, rest)),
        (Value::Object(map), Some(key)) => map
            .get(key)
            .is_some_and(|item| has_segments(item, rest)),
        (_, Some(_)) => false,
        (scalar, None) => has_segments(scalar, rest),
    }
}

fn get_segments<'a>(node: &'a Value, segments: &[Segment], path: &str) -> Result<Resolved<'a>> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(Resolved::Value(node));
    };
    let value = node
        .get(segment.name.as_str())
        .ok_or_else(|| PathError::FieldNotFound {
            path: path.to_string(),
            field: segment.name.clone(),
        })?;

    match (value, segment.index.as_deref()) {
        (Value::Array(_) | Value::Object(_), None) if rest.is_empty() => Ok(Resolved::Value(value)),
        (Value::Array(items), None) => items
            .iter()
            .map(|item| get_segments(item, rest, path))
            .collect::<Result<Vec<_>>>()
            .map(Resolved::Many),
        (Value::Object(map), None) => map
            .values()
            .map(|item| get_segments(item, rest, path))
            .collect::<Result<Vec<_>>>()
            .map(Resolved::Many),
        (Value::Array(items), Some(index)) => {
            let item = index
                .parse::<usize>()
                .ok()
                .and_then(|position| items.get(position))
                .ok_or_else(|| PathError::IndexOutOfRange {
                    path: path.to_string(),
                    field: segment.name.clone(),
                    index: index.to_string(),
                })?;
            get_segments(item, rest, path)
        }
        (Value::Object(map), Some(key)) => {
            let item = map.get(key).ok_or_else(|| PathError::FieldNotFound {
                path: path.to_string(),
                field: format!("{}[{key}]", segment.name),
            })?;
            get_segments(item, rest, path)
        }
        (_, Some(_)) => Err(PathError::NotIndexable {
            path: path.to_string(),
            field: segment.name.clone(),
        }),
        (scalar, None) => get_segments(scalar, rest, path),
    }
}
