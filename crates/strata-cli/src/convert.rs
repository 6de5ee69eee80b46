//! JSON and YAML documents to visualization payloads
//!
//! Any document becomes either a flat `{nodes, links}` graph (sequential ids
//! from 1, containers valued by their size) or a nested `{name, children}`
//! tree. JSON arrays show a bare count (`"3"`); JSON objects and every YAML
//! container show `"3 items"`.

use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};

use strata::model::{scalar_to_display, PayloadShape};
use strata::view::Converter;
use strata::SourceFormat;

/// Converts JSON or YAML source text into one payload shape
#[derive(Debug, Clone, Copy)]
pub struct DataConverter {
    shape: PayloadShape,
}

impl DataConverter {
    pub fn new(shape: PayloadShape) -> Self {
        Self { shape }
    }

    pub fn graph() -> Self {
        Self::new(PayloadShape::Graph)
    }

    pub fn tree() -> Self {
        Self::new(PayloadShape::Tree)
    }

    pub fn shape(&self) -> PayloadShape {
        self.shape
    }
}

impl Converter for DataConverter {
    fn convert(&self, source: &str, format: SourceFormat) -> Result<String> {
        let document = parse_document(source, format)?;
        let payload = match self.shape {
            PayloadShape::Graph => graph_payload(&document, format),
            PayloadShape::Tree => tree_payload(None, &document),
        };
        Ok(serde_json::to_string(&payload)?)
    }
}

fn parse_document(source: &str, format: SourceFormat) -> Result<Value> {
    match format {
        SourceFormat::Json => serde_json::from_str(source).context("Failed to parse JSON"),
        SourceFormat::Yaml => serde_yaml::from_str(source).context("Failed to parse YAML"),
        other => bail!("{} input is not supported", other),
    }
}

struct GraphBuilder {
    format: SourceFormat,
    nodes: Vec<Value>,
    links: Vec<Value>,
    next_id: usize,
}

impl GraphBuilder {
    fn array_value(&self, len: usize) -> String {
        match self.format {
            SourceFormat::Json => len.to_string(),
            _ => format!("{} items", len),
        }
    }

    fn visit(&mut self, value: &Value, parent: Option<&str>, depth: usize, key: Option<&str>) {
        let id = self.next_id.to_string();
        self.next_id += 1;

        let (label, text, is_leaf) = match value {
            Value::Object(map) => (key.unwrap_or("Object"), format!("{} items", map.len()), false),
            Value::Array(items) => (key.unwrap_or("Array"), self.array_value(items.len()), false),
            scalar => (key.unwrap_or("Value"), scalar_to_display(scalar), true),
        };

        self.nodes.push(json!({
            "id": id,
            "label": label,
            "value": text,
            "depth": depth,
            "parent": parent,
            "is_leaf": is_leaf,
        }));
        if let Some(parent) = parent {
            self.links.push(json!({ "source": parent, "target": id }));
        }

        match value {
            Value::Object(map) => {
                for (k, v) in map {
                    self.visit(v, Some(&id), depth + 1, Some(k));
                }
            }
            Value::Array(items) => {
                for (i, v) in items.iter().enumerate() {
                    self.visit(v, Some(&id), depth + 1, Some(&i.to_string()));
                }
            }
            _ => {}
        }
    }
}

fn graph_payload(document: &Value, format: SourceFormat) -> Value {
    let mut builder = GraphBuilder {
        format,
        nodes: Vec::new(),
        links: Vec::new(),
        next_id: 1,
    };
    builder.visit(document, None, 0, None);
    json!({ "nodes": builder.nodes, "links": builder.links })
}

fn tree_payload(key: Option<&str>, value: &Value) -> Value {
    let mut node = Map::new();
    match value {
        Value::Object(map) => {
            node.insert("name".into(), key.unwrap_or("root").into());
            let children: Vec<Value> = map
                .iter()
                .map(|(k, v)| tree_payload(Some(k), v))
                .collect();
            node.insert("children".into(), children.into());
        }
        Value::Array(items) => {
            node.insert("name".into(), key.unwrap_or("array").into());
            let children: Vec<Value> = items
                .iter()
                .enumerate()
                .map(|(i, v)| tree_payload(Some(&i.to_string()), v))
                .collect();
            node.insert("children".into(), children.into());
        }
        scalar => {
            node.insert("name".into(), key.unwrap_or("value").into());
            node.insert("value".into(), scalar.clone());
        }
    }
    Value::Object(node)
}
