pub mod normalize;
pub mod record;

pub use normalize::{normalize, normalize_value};
pub use record::record_schema;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Key of the side-table holding named sub-schemas.
pub const DEFS_KEY: &str = "$defs";

/// Key marking a reference node.
pub const REF_KEY: &str = "$ref";

/// A JSON-Schema-like document as a plain tree.
///
/// References get their own variant so that resolution never has to
/// probe maps for a `$ref` key. Map entries keep their declared order.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Map(Vec<(String, SchemaNode)>),
    Seq(Vec<SchemaNode>),
    Ref(String),
    Scalar(Value),
}

impl SchemaNode {
    /// Look up a key in a map node.
    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SchemaNode::Scalar(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// True if any reference node remains anywhere in the tree.
    pub fn contains_ref(&self) -> bool {
        match self {
            SchemaNode::Ref(_) => true,
            SchemaNode::Map(entries) => entries.iter().any(|(_, v)| v.contains_ref()),
            SchemaNode::Seq(items) => items.iter().any(SchemaNode::contains_ref),
            SchemaNode::Scalar(_) => false,
        }
    }

    /// True if `key` appears as a map key anywhere in the tree.
    pub fn contains_key(&self, key: &str) -> bool {
        match self {
            SchemaNode::Map(entries) => entries
                .iter()
                .any(|(k, v)| k == key || v.contains_key(key)),
            SchemaNode::Seq(items) => items.iter().any(|i| i.contains_key(key)),
            SchemaNode::Ref(_) | SchemaNode::Scalar(_) => false,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            SchemaNode::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
            SchemaNode::Seq(items) => Value::Array(items.iter().map(SchemaNode::to_value).collect()),
            SchemaNode::Ref(reference) => {
                let mut map = serde_json::Map::new();
                map.insert(REF_KEY.to_string(), Value::String(reference.clone()));
                Value::Object(map)
            }
            SchemaNode::Scalar(v) => v.clone(),
        }
    }
}

impl From<Value> for SchemaNode {
    /// A map whose `$ref` is a string becomes a reference node; any sibling
    /// keys next to it are dropped, since the referenced entry replaces the
    /// whole node.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(reference)) = map.get(REF_KEY) {
                    return SchemaNode::Ref(reference.clone());
                }
                SchemaNode::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            Value::Array(items) => SchemaNode::Seq(items.into_iter().map(Into::into).collect()),
            other => SchemaNode::Scalar(other),
        }
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
