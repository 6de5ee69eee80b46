//! Normalized render model
//!
//! Both payload shapes are flattened into one [`RenderModel`]: nodes in payload
//! (or pre-order) order, parent/children by index, a single root and the
//! drawable edges. The model is immutable once built; layout engines copy
//! whatever they mutate.

mod builder;
mod payload;

pub use builder::*;
pub use payload::*;

use std::collections::HashMap;

/// A node of the normalized model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode {
    pub id: String,
    /// Semantic type tag or key name
    pub label: String,
    /// Display value; empty for tree containers
    pub value: String,
    /// Distance from the root
    pub depth: usize,
    pub parent: Option<usize>,
    /// Children in payload order
    pub children: Vec<usize>,
    pub is_leaf: bool,
}

/// A drawable edge between two model nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelEdge {
    pub source: usize,
    pub target: usize,
}

/// Immutable snapshot handed to the layout engines
#[derive(Debug, Clone)]
pub struct RenderModel {
    nodes: Vec<ModelNode>,
    edges: Vec<ModelEdge>,
    root: usize,
    shape: PayloadShape,
    dropped_edges: usize,
    index: HashMap<String, usize>,
}

impl RenderModel {
    pub(crate) fn from_parts(
        nodes: Vec<ModelNode>,
        edges: Vec<ModelEdge>,
        root: usize,
        shape: PayloadShape,
        dropped_edges: usize,
    ) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
        Self {
            nodes,
            edges,
            root,
            shape,
            dropped_edges,
            index,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ModelNode> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &ModelEdge> {
        self.edges.iter()
    }

    /// Node by position
    pub fn node(&self, index: usize) -> &ModelNode {
        &self.nodes[index]
    }

    /// Node by payload id
    pub fn get_node(&self, id: &str) -> Option<&ModelNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn shape(&self) -> PayloadShape {
        self.shape
    }

    /// Links dropped because an endpoint did not resolve
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf).count()
    }

    /// Node indices grouped by depth, preserving model order within a depth
    pub fn depth_buckets(&self) -> Vec<Vec<usize>> {
        let mut buckets = vec![Vec::new(); self.max_depth() + 1];
        for (i, node) in self.nodes.iter().enumerate() {
            buckets[node.depth].push(i);
        }
        buckets
    }

    /// Number of edges touching each node
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.nodes.len()];
        for edge in &self.edges {
            degrees[edge.source] += 1;
            degrees[edge.target] += 1;
        }
        degrees
    }
}
