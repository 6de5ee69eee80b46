//! Wire shapes produced by the conversion library
//!
//! The graph shape is deserialized with serde. Field names follow the
//! converters (`parent`, `is_leaf`) and also accept the camelCase spellings.
//! Ids and values may arrive as numbers; they are kept as display strings.
//! A node's `parent` distinguishes an explicit `null` (a declared root) from
//! a missing field (parent inferred from links).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A node of the `{nodes, links}` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    #[serde(deserialize_with = "stringish")]
    pub id: String,
    #[serde(default, deserialize_with = "stringish")]
    pub label: String,
    #[serde(default, deserialize_with = "stringish")]
    pub value: String,
    #[serde(default)]
    pub depth: Option<usize>,
    #[serde(
        default,
        alias = "parentId",
        alias = "parent_id",
        deserialize_with = "present_stringish"
    )]
    pub parent: Option<Option<String>>,
    #[serde(default, alias = "isLeaf")]
    pub is_leaf: Option<bool>,
}

/// A link of the `{nodes, links}` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    #[serde(alias = "sourceId", deserialize_with = "stringish")]
    pub source: String,
    #[serde(alias = "targetId", deserialize_with = "stringish")]
    pub target: String,
}

/// The `{nodes, links}` payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphPayload {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphEdge>,
}

/// Which of the two payload shapes a value has
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// `{nodes, links}`
    Graph,
    /// `{name, children | value}`
    Tree,
}

impl PayloadShape {
    /// Detect the shape from the top-level keys
    pub fn detect(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        if map.contains_key("nodes") && map.contains_key("links") {
            Some(PayloadShape::Graph)
        } else if map.contains_key("name")
            && (map.contains_key("children") || map.contains_key("value"))
        {
            Some(PayloadShape::Tree)
        } else {
            None
        }
    }
}

/// Render a JSON scalar the way labels show it
pub fn scalar_to_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn stringish<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        other => scalar_to_display(&other),
    })
}

/// Only called when the field is present, so the outer `Some` marks presence
fn present_stringish<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(match value {
        Value::Null => None,
        other => Some(scalar_to_display(&other)),
    }))
}
