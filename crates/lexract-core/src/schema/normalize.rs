use super::{SchemaNode, DEFS_KEY};
use crate::error::SchemaError;
use serde_json::Value;

/// Keys the generation service's strict schema validator rejects outright.
const STRIPPED_KEYS: &[&str] = &[DEFS_KEY, "default", "anyOf"];

/// Flatten a schema into the reference-free form the generation service accepts.
///
/// Steps:
/// 1. Replace every reference with the `$defs` entry named by its last path
///    segment, recursively
/// 2. Drop `$defs`, `default` and `anyOf` at every depth
/// 3. Drop `title` when it is a plain string (metadata), keep it when it is
///    a field definition
/// 4. Recurse into maps and sequences
///
/// Normalizing an already normalized schema returns it unchanged.
pub fn normalize(schema: &SchemaNode) -> Result<SchemaNode, SchemaError> {
    let defs = schema.get(DEFS_KEY);
    let mut resolving = Vec::new();
    normalize_node(schema, defs, &mut resolving)
}

/// [`normalize`] over a `serde_json::Value`.
pub fn normalize_value(schema: &Value) -> Result<Value, SchemaError> {
    let node = SchemaNode::from(schema.clone());
    Ok(normalize(&node)?.to_value())
}

fn normalize_node(
    node: &SchemaNode,
    defs: Option<&SchemaNode>,
    resolving: &mut Vec<String>,
) -> Result<SchemaNode, SchemaError> {
    match node {
        SchemaNode::Ref(reference) => {
            let name = reference.rsplit('/').next().unwrap_or(reference.as_str());
            if resolving.iter().any(|r| r == name) {
                return Err(SchemaError::RecursiveReference {
                    reference: reference.clone(),
                });
            }
            let target = defs
                .and_then(|d| d.get(name))
                .ok_or_else(|| SchemaError::UnresolvedReference {
                    reference: reference.clone(),
                })?;

            resolving.push(name.to_string());
            let resolved = normalize_node(target, defs, resolving);
            resolving.pop();
            resolved
        }
        SchemaNode::Map(entries) => {
            let mut out = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                if is_stripped(key, value) {
                    continue;
                }
                out.push((key.clone(), normalize_node(value, defs, resolving)?));
            }
            Ok(SchemaNode::Map(out))
        }
        SchemaNode::Seq(items) => items
            .iter()
            .map(|item| normalize_node(item, defs, resolving))
            .collect::<Result<Vec<_>, _>>()
            .map(SchemaNode::Seq),
        SchemaNode::Scalar(v) => Ok(SchemaNode::Scalar(v.clone())),
    }
}

fn is_stripped(key: &str, value: &SchemaNode) -> bool {
    if STRIPPED_KEYS.contains(&key) {
        return true;
    }
    // A "title" map is a property called title, not metadata
    key == "title" && value.as_str().is_some()
}
