//! Depth-column layout
//!
//! Nodes are bucketed by depth; every bucket is a column of fixed-size boxes
//! centered vertically on the canvas. Edges are horizontal link curves from
//! the right edge of the source box to the left edge of the target box.

use tracing::{debug, span, trace, Level};

use super::{Anchor, LayoutEngine, LayoutResult, PositionedEdge, PositionedNode};
use crate::core::{ColumnLayoutConfig, EdgePath, Point, Result, Size};
use crate::model::RenderModel;

/// Column layout engine
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    config: ColumnLayoutConfig,
}

impl ColumnLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ColumnLayoutConfig) -> Self {
        Self { config }
    }

    /// x of the column holding nodes at `depth`
    pub fn column_x(&self, depth: usize) -> f64 {
        self.config.origin_x + depth as f64 * (self.config.node_width + self.config.h_spacing)
    }
}

impl LayoutEngine for ColumnLayout {
    fn layout(&self, model: &RenderModel, size: Size) -> Result<LayoutResult> {
        let layout_span = span!(
            Level::INFO,
            "layout_columns",
            node_count = model.node_count(),
            edge_count = model.edge_count()
        );
        let _enter = layout_span.enter();

        let c = &self.config;
        let mut slots: Vec<Option<PositionedNode>> = vec![None; model.node_count()];

        for (depth, bucket) in model.depth_buckets().iter().enumerate() {
            let n = bucket.len() as f64;
            let bucket_height = n * c.node_height + (n - 1.0).max(0.0) * c.v_spacing;
            let start_y = (size.height - bucket_height) / 2.0;
            let x = self.column_x(depth);
            trace!(depth, count = bucket.len(), start_y, "Placing column");

            for (row, &index) in bucket.iter().enumerate() {
                slots[index] = Some(PositionedNode {
                    index,
                    id: model.node(index).id.clone(),
                    x,
                    y: start_y + row as f64 * (c.node_height + c.v_spacing),
                    width: c.node_width,
                    height: c.node_height,
                    anchor: Anchor::TopLeft,
                });
            }
        }

        // Every node sits in exactly one depth bucket.
        let nodes: Vec<PositionedNode> = slots.into_iter().flatten().collect();

        let edges = model
            .edges()
            .map(|edge| {
                let s = &nodes[edge.source];
                let t = &nodes[edge.target];
                PositionedEdge {
                    source: edge.source,
                    target: edge.target,
                    path: EdgePath::horizontal_link(
                        Point::new(s.x + s.width, s.y + s.height / 2.0),
                        Point::new(t.x, t.y + t.height / 2.0),
                    ),
                }
            })
            .collect();

        let right = nodes
            .iter()
            .map(|n| n.x + n.width)
            .fold(0.0_f64, f64::max);
        let bottom = nodes
            .iter()
            .map(|n| n.y + n.height)
            .fold(size.height, f64::max);

        debug!(columns = model.max_depth() + 1, "Column layout complete");
        Ok(LayoutResult {
            nodes,
            edges,
            width: right + c.origin_x,
            height: bottom,
        })
    }

    fn name(&self) -> &'static str {
        "columns"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GraphModelBuilder;

    fn model() -> RenderModel {
        GraphModelBuilder::new()
            .build_str(
                r#"{"name":"root","children":[{"name":"a","value":"1"},{"name":"b","children":[{"name":"c","value":"2"}]}]}"#,
            )
            .unwrap()
    }

    #[test]
    fn test_column_positions() {
        let layout = ColumnLayout::new()
            .layout(&model(), Size::new(800.0, 600.0))
            .unwrap();
        let root = &layout.nodes[0];
        assert_eq!(root.x, 50.0);
        assert_eq!(root.y, (600.0 - 40.0) / 2.0);

        // a and b share depth 1: height 40 + 30 + 40 = 110
        let a = &layout.nodes[1];
        let b = &layout.nodes[2];
        assert_eq!(a.x, 290.0);
        assert_eq!(b.x, 290.0);
        assert_eq!(a.y, (600.0 - 110.0) / 2.0);
        assert_eq!(b.y, a.y + 70.0);

        assert_eq!(layout.nodes[3].x, 530.0);
    }

    #[test]
    fn test_edges_run_right_edge_to_left_edge() {
        let layout = ColumnLayout::new()
            .layout(&model(), Size::new(800.0, 600.0))
            .unwrap();
        let edge = &layout.edges[0];
        assert_eq!(edge.path.from(), Point::new(210.0, 300.0));
        assert_eq!(edge.path.to().x, 290.0);
        assert!(matches!(edge.path, EdgePath::Cubic { .. }));
    }

    #[test]
    fn test_extent_covers_boxes() {
        let layout = ColumnLayout::new()
            .layout(&model(), Size::new(300.0, 100.0))
            .unwrap();
        for node in &layout.nodes {
            assert!(node.x + node.width <= layout.width);
            assert!(node.y + node.height <= layout.height);
        }
    }

    #[test]
    fn test_idempotent() {
        let engine = ColumnLayout::new();
        let m = model();
        let size = Size::new(640.0, 480.0);
        assert_eq!(engine.layout(&m, size).unwrap(), engine.layout(&m, size).unwrap());
    }
}
