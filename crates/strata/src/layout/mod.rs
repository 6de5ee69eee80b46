//! Layout engines
//!
//! A layout engine takes an immutable [`RenderModel`] and the host size and
//! produces a [`LayoutResult`]: one positioned node per model node (same
//! order) and the edges to draw. Layered engines are pure functions of their
//! inputs; the force engine is deterministic for a given seed.
//!
//! ```rust
//! use strata::core::Size;
//! use strata::layout::{ColumnLayout, LayoutEngine};
//! use strata::model::GraphModelBuilder;
//!
//! let model = GraphModelBuilder::new()
//!     .build_str(r#"{"name":"root","children":[{"name":"a","value":1}]}"#)
//!     .unwrap();
//! let layout = ColumnLayout::new().layout(&model, Size::new(800.0, 600.0)).unwrap();
//! assert_eq!(layout.nodes.len(), 2);
//! assert_eq!(layout.nodes[1].x, 50.0 + 160.0 + 80.0);
//! ```

mod columns;
mod tree;

pub use columns::*;
pub use tree::*;

use crate::core::{EdgePath, Point, Result, Size, VizConfig, ViewKind, VizError};
use crate::force::ForceLayout;
use crate::model::RenderModel;

/// Which point of a node's footprint `x`/`y` refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Boxes: `x`/`y` is the top-left corner
    TopLeft,
    /// Circles: `x`/`y` is the center
    Center,
}

/// Position data for a laid out node
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    /// Index into the model's nodes
    pub index: usize,
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub anchor: Anchor,
}

impl PositionedNode {
    /// Center of the node's footprint
    pub fn center(&self) -> Point {
        match self.anchor {
            Anchor::TopLeft => Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0),
            Anchor::Center => Point::new(self.x, self.y),
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Position data for a laid out edge
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedEdge {
    pub source: usize,
    pub target: usize,
    pub path: EdgePath,
}

/// Output of a layout engine
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// One entry per model node, in model order
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<PositionedEdge>,
    pub width: f64,
    pub height: f64,
}

impl LayoutResult {
    /// Fail with a layout error if any coordinate is NaN or infinite
    pub fn ensure_finite(&self) -> Result<()> {
        if let Some(node) = self.nodes.iter().find(|n| !n.is_finite()) {
            return Err(VizError::layout(format!(
                "node '{}' has a non-finite position",
                node.id
            )));
        }
        if let Some(edge) = self.edges.iter().find(|e| !e.path.is_finite()) {
            return Err(VizError::layout(format!(
                "edge {} -> {} has a non-finite path",
                edge.source, edge.target
            )));
        }
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(VizError::layout("layout extent is not finite"));
        }
        Ok(())
    }
}

/// Trait for layout engines
pub trait LayoutEngine {
    /// Position every node of the model
    fn layout(&self, model: &RenderModel, size: Size) -> Result<LayoutResult>;

    /// Engine name, used in logs
    fn name(&self) -> &'static str;
}

/// The engine a view draws with
pub fn engine_for(view: ViewKind, config: &VizConfig) -> Box<dyn LayoutEngine> {
    match view {
        ViewKind::Tree => Box::new(TreeLayout::with_config(config.tree.clone())),
        ViewKind::Columns => Box::new(ColumnLayout::with_config(config.columns.clone())),
        ViewKind::Force => Box::new(ForceLayout::with_config(config.force.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_by_anchor() {
        let mut node = PositionedNode {
            index: 0,
            id: "1".to_string(),
            x: 10.0,
            y: 20.0,
            width: 160.0,
            height: 40.0,
            anchor: Anchor::TopLeft,
        };
        assert_eq!(node.center(), Point::new(90.0, 40.0));
        node.anchor = Anchor::Center;
        assert_eq!(node.center(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_ensure_finite_rejects_nan() {
        let result = LayoutResult {
            nodes: vec![PositionedNode {
                index: 0,
                id: "1".to_string(),
                x: f64::NAN,
                y: 0.0,
                width: 0.0,
                height: 0.0,
                anchor: Anchor::Center,
            }],
            edges: Vec::new(),
            width: 100.0,
            height: 100.0,
        };
        assert!(matches!(result.ensure_finite(), Err(VizError::Layout { .. })));
    }

    #[test]
    fn test_engine_names() {
        let config = VizConfig::default();
        assert_eq!(engine_for(ViewKind::Tree, &config).name(), "tree");
        assert_eq!(engine_for(ViewKind::Columns, &config).name(), "columns");
        assert_eq!(engine_for(ViewKind::Force, &config).name(), "force");
    }
}
