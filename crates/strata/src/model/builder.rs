//! Payload normalization
//!
//! Turns either payload shape into a [`RenderModel`] and enforces the model
//! invariants: one root, `depth == depth(parent) + 1`, every node reachable.

use std::collections::{HashMap, VecDeque};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, span, trace, warn, Level};

use super::{
    scalar_to_display, GraphPayload, ModelEdge, ModelNode, PayloadShape, RenderModel,
};
use crate::core::{BuilderConfig, Result, VizError};

/// Builds render models from decoded payloads
#[derive(Debug, Clone, Default)]
pub struct GraphModelBuilder {
    config: BuilderConfig,
}

impl GraphModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Decode JSON text and build
    ///
    /// Blank text is [`VizError::EmptyInput`]; text that is not JSON is
    /// [`VizError::Decode`].
    pub fn build_str(&self, payload: &str) -> Result<RenderModel> {
        if payload.trim().is_empty() {
            return Err(VizError::EmptyInput);
        }
        let value: Value = serde_json::from_str(payload)?;
        self.build(&value)
    }

    /// Build from a decoded payload
    pub fn build(&self, payload: &Value) -> Result<RenderModel> {
        let build_span = span!(Level::INFO, "build_model");
        let _enter = build_span.enter();

        if payload.is_null() {
            return Err(VizError::EmptyInput);
        }

        let model = match PayloadShape::detect(payload) {
            Some(PayloadShape::Graph) => self.build_graph(payload)?,
            Some(PayloadShape::Tree) => self.build_tree(payload)?,
            None => {
                warn!("Payload matches neither the graph nor the tree shape");
                return Err(VizError::invalid_shape(
                    "expected {nodes, links} or {name, children | value}",
                ));
            }
        };

        info!(
            shape = ?model.shape(),
            node_count = model.node_count(),
            edge_count = model.edge_count(),
            dropped_edges = model.dropped_edges(),
            "Model built"
        );
        Ok(model)
    }

    fn build_graph(&self, payload: &Value) -> Result<RenderModel> {
        let graph = GraphPayload::deserialize(payload)
            .map_err(|e| VizError::invalid_shape(format!("graph payload: {}", e)))?;
        if graph.nodes.is_empty() {
            debug!("Graph payload has no nodes");
            return Err(VizError::EmptyInput);
        }

        let mut index: HashMap<&str, usize> = HashMap::with_capacity(graph.nodes.len());
        for (i, node) in graph.nodes.iter().enumerate() {
            if index.insert(node.id.as_str(), i).is_some() {
                return Err(VizError::invalid_shape(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
        }

        let mut edges = Vec::with_capacity(graph.links.len());
        let mut dropped = 0;
        for link in &graph.links {
            match (index.get(link.source.as_str()), index.get(link.target.as_str())) {
                (Some(&source), Some(&target)) if source != target => {
                    edges.push(ModelEdge { source, target });
                }
                (Some(_), Some(_)) => {
                    trace!(id = %link.source, "Dropping self link");
                    dropped += 1;
                }
                _ => {
                    if self.config.strict_links {
                        return Err(VizError::invalid_shape(format!(
                            "link {} -> {} references a missing node",
                            link.source, link.target
                        )));
                    }
                    warn!(
                        source = %link.source,
                        target = %link.target,
                        "Dropping link with a dangling endpoint"
                    );
                    dropped += 1;
                }
            }
        }

        // A node without a parent field takes its first incoming link as
        // parent. An explicit null parent is a declared root.
        let mut first_incoming: Vec<Option<usize>> = vec![None; graph.nodes.len()];
        for edge in &edges {
            first_incoming[edge.target].get_or_insert(edge.source);
        }

        let mut parents = Vec::with_capacity(graph.nodes.len());
        for (i, node) in graph.nodes.iter().enumerate() {
            let parent = match &node.parent {
                Some(Some(pid)) => {
                    let p = *index.get(pid.as_str()).ok_or_else(|| {
                        VizError::invalid_shape(format!(
                            "node '{}' names missing parent '{}'",
                            node.id, pid
                        ))
                    })?;
                    if p == i {
                        return Err(VizError::invalid_shape(format!(
                            "node '{}' is its own parent",
                            node.id
                        )));
                    }
                    Some(p)
                }
                Some(None) => None,
                None => first_incoming[i],
            };
            parents.push(parent);
        }

        let mut nodes: Vec<ModelNode> = graph
            .nodes
            .iter()
            .zip(&parents)
            .map(|(node, &parent)| ModelNode {
                id: node.id.clone(),
                label: node.label.clone(),
                value: node.value.clone(),
                depth: node.depth.unwrap_or(0),
                parent,
                children: Vec::new(),
                is_leaf: false,
            })
            .collect();
        for (i, parent) in parents.iter().enumerate() {
            if let Some(p) = *parent {
                nodes[p].children.push(i);
            }
        }

        let root = single_root(&nodes)?;
        assign_depths(&mut nodes, root, true)?;
        for (node, payload_node) in nodes.iter_mut().zip(&graph.nodes) {
            node.is_leaf = payload_node.is_leaf.unwrap_or(node.children.is_empty());
        }

        Ok(RenderModel::from_parts(
            nodes,
            edges,
            root,
            PayloadShape::Graph,
            dropped,
        ))
    }

    fn build_tree(&self, payload: &Value) -> Result<RenderModel> {
        let mut nodes: Vec<ModelNode> = Vec::new();
        let mut edges = Vec::new();
        // (value, parent index, path of names for error messages)
        let mut stack: Vec<(&Value, Option<usize>, String)> = vec![(payload, None, String::new())];

        while let Some((value, parent, parent_path)) = stack.pop() {
            let map = value.as_object().ok_or_else(|| {
                VizError::invalid_shape(format!("tree node under '{}' is not an object", parent_path))
            })?;
            let name = map
                .get("name")
                .map(scalar_to_display)
                .ok_or_else(|| {
                    VizError::invalid_shape(format!("tree node under '{}' has no name", parent_path))
                })?;
            let path = if parent_path.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", parent_path, name)
            };

            let children = tree_children(map, &path)?;
            let index = nodes.len();
            let value_text = map.get("value").map(scalar_to_display).unwrap_or_default();
            nodes.push(ModelNode {
                id: (index + 1).to_string(),
                label: name,
                value: value_text,
                depth: 0,
                parent,
                children: Vec::new(),
                is_leaf: children.is_none(),
            });
            if let Some(p) = parent {
                nodes[p].children.push(index);
                edges.push(ModelEdge {
                    source: p,
                    target: index,
                });
            }
            if let Some(children) = children {
                for child in children.iter().rev() {
                    stack.push((child, Some(index), path.clone()));
                }
            }
        }

        assign_depths(&mut nodes, 0, false)?;
        Ok(RenderModel::from_parts(nodes, edges, 0, PayloadShape::Tree, 0))
    }
}

/// `Some(children)` for containers, `None` for leaves; mixed or empty nodes
/// are rejected
fn tree_children<'a>(map: &'a Map<String, Value>, path: &str) -> Result<Option<&'a Vec<Value>>> {
    match (map.get("value"), map.get("children")) {
        (Some(_), Some(_)) => Err(VizError::invalid_shape(format!(
            "tree node '{}' has both value and children",
            path
        ))),
        (None, None) => Err(VizError::invalid_shape(format!(
            "tree node '{}' has neither value nor children",
            path
        ))),
        (Some(_), None) => Ok(None),
        (None, Some(children)) => children.as_array().map(Some).ok_or_else(|| {
            VizError::invalid_shape(format!("children of '{}' is not an array", path))
        }),
    }
}

fn single_root(nodes: &[ModelNode]) -> Result<usize> {
    let roots: Vec<usize> = nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.parent.is_none())
        .map(|(i, _)| i)
        .collect();
    match roots.as_slice() {
        [root] => Ok(*root),
        [] => Err(VizError::invalid_shape(
            "no root node: every node has a parent",
        )),
        many => {
            let ids: Vec<&str> = many.iter().take(5).map(|&i| nodes[i].id.as_str()).collect();
            Err(VizError::invalid_shape(format!(
                "expected exactly one root, found {} ({})",
                many.len(),
                ids.join(", ")
            )))
        }
    }
}

/// Breadth-first depth assignment from the root
///
/// Nodes the walk never reaches sit on a parent cycle.
fn assign_depths(nodes: &mut [ModelNode], root: usize, check_payload: bool) -> Result<()> {
    let mut seen = vec![false; nodes.len()];
    let mut queue = VecDeque::from([(root, 0usize)]);
    let mut corrected = 0;
    seen[root] = true;

    while let Some((i, depth)) = queue.pop_front() {
        if check_payload && nodes[i].depth != depth {
            corrected += 1;
        }
        nodes[i].depth = depth;
        for k in 0..nodes[i].children.len() {
            let child = nodes[i].children[k];
            if !seen[child] {
                seen[child] = true;
                queue.push_back((child, depth + 1));
            }
        }
    }

    if corrected > 0 {
        debug!(corrected, "Payload depths disagreed with the parent chain");
    }

    let unreached = seen.iter().filter(|s| !**s).count();
    if unreached > 0 {
        return Err(VizError::invalid_shape(format!(
            "{} node(s) unreachable from the root (parent cycle)",
            unreached
        )));
    }
    Ok(())
}
