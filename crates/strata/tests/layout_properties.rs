//! Property tests for the layout engines over random hierarchies

use proptest::prelude::*;
use proptest::sample::Index;
use serde_json::json;

use strata::force::ForceLayout;
use strata::layout::{ColumnLayout, LayoutEngine, LayoutResult, TreeLayout};
use strata::model::{GraphModelBuilder, RenderModel};
use strata::Size;

/// Node `i + 1` hangs off one of the nodes before it
fn hierarchy() -> impl Strategy<Value = Vec<Index>> {
    prop::collection::vec(any::<Index>(), 0..40)
}

fn graph_payload(parents: &[Index]) -> serde_json::Value {
    let mut nodes = vec![json!({"id": "0", "label": "Object", "value": "root"})];
    let mut links = Vec::new();
    for (i, pick) in parents.iter().enumerate() {
        let id = i + 1;
        let parent = pick.index(id);
        nodes.push(json!({"id": id.to_string(), "label": "k", "value": id, "parent": parent.to_string()}));
        links.push(json!({"source": parent.to_string(), "target": id.to_string()}));
    }
    json!({"nodes": nodes, "links": links})
}

fn model(parents: &[Index]) -> RenderModel {
    GraphModelBuilder::new()
        .build(&graph_payload(parents))
        .expect("generated payloads are valid")
}

fn assert_finite(layout: &LayoutResult) {
    assert!(layout.nodes.iter().all(|n| n.is_finite()));
    for edge in &layout.edges {
        assert!(edge.source < layout.nodes.len() && edge.target < layout.nodes.len());
        assert!(edge.path.is_finite());
    }
}

proptest! {
    #[test]
    fn prop_depth_is_parent_depth_plus_one(parents in hierarchy()) {
        let m = model(&parents);
        prop_assert_eq!(m.node(m.root()).depth, 0);
        for node in m.nodes() {
            if let Some(p) = node.parent {
                prop_assert_eq!(node.depth, m.node(p).depth + 1);
            }
        }
    }

    #[test]
    fn prop_columns_share_x_per_depth(parents in hierarchy()) {
        let m = model(&parents);
        let engine = ColumnLayout::new();
        let layout = engine.layout(&m, Size::default()).unwrap();
        prop_assert_eq!(layout.nodes.len(), m.node_count());
        for placed in &layout.nodes {
            prop_assert_eq!(placed.x, engine.column_x(m.node(placed.index).depth));
        }
        assert_finite(&layout);
    }

    #[test]
    fn prop_columns_do_not_overlap(parents in hierarchy()) {
        let m = model(&parents);
        let layout = ColumnLayout::new().layout(&m, Size::default()).unwrap();
        for bucket in m.depth_buckets() {
            for pair in bucket.windows(2) {
                let (a, b) = (&layout.nodes[pair[0]], &layout.nodes[pair[1]]);
                prop_assert!(b.y >= a.y + a.height);
            }
        }
    }

    #[test]
    fn prop_tree_depth_grows_rightward(parents in hierarchy()) {
        let m = model(&parents);
        let layout = TreeLayout::new().layout(&m, Size::new(900.0, 700.0)).unwrap();
        for node in m.nodes() {
            if let Some(p) = node.parent {
                let index = m.index_of(&node.id).unwrap();
                prop_assert!(layout.nodes[index].x > layout.nodes[p].x);
            }
        }
        assert_finite(&layout);
    }

    #[test]
    fn prop_layered_layouts_are_idempotent(parents in hierarchy()) {
        let m = model(&parents);
        let size = Size::new(1024.0, 768.0);
        let columns = ColumnLayout::new();
        prop_assert_eq!(columns.layout(&m, size).unwrap(), columns.layout(&m, size).unwrap());
        let tree = TreeLayout::new();
        prop_assert_eq!(tree.layout(&m, size).unwrap(), tree.layout(&m, size).unwrap());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_force_is_deterministic_and_finite(parents in hierarchy()) {
        let m = model(&parents);
        let engine = ForceLayout::new();
        let first = engine.layout(&m, Size::default()).unwrap();
        let second = engine.layout(&m, Size::default()).unwrap();
        prop_assert_eq!(&first, &second);
        assert_finite(&first);
    }
}
