//! Edge case tests for payload normalization and rendering
//!
//! Tests for boundary conditions, malformed payloads, and error handling.

// =============================================================================
// Empty Input Tests
// =============================================================================

mod empty_inputs {
    use strata::model::GraphModelBuilder;
    use strata::{render, Size, ThemeKind, ViewKind, VizError};

    #[test]
    fn test_blank_text_is_empty_input() {
        let err = GraphModelBuilder::new().build_str(" \n\t ").unwrap_err();
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_null_payload_is_empty_input() {
        let err = GraphModelBuilder::new().build_str("null").unwrap_err();
        assert!(matches!(err, VizError::EmptyInput));
    }

    #[test]
    fn test_empty_render_draws_nothing() {
        for view in [ViewKind::Columns, ViewKind::Tree, ViewKind::Force] {
            let scene = render("", view, ThemeKind::Light, Size::default()).unwrap();
            assert!(scene.is_empty());
            assert!(scene.overlay.is_none());
        }
    }

    #[test]
    fn test_graph_without_nodes_is_invalid() {
        let err = GraphModelBuilder::new()
            .build_str(r#"{"nodes": [], "links": []}"#)
            .unwrap_err();
        assert!(matches!(err, VizError::InvalidShape { .. }));
    }
}

// =============================================================================
// Malformed Payload Tests
// =============================================================================

mod malformed_payloads {
    use strata::model::GraphModelBuilder;
    use strata::VizError;

    fn build(payload: &str) -> VizError {
        GraphModelBuilder::new().build_str(payload).unwrap_err()
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(build("{nodes: ["), VizError::Decode { .. }));
    }

    #[test]
    fn test_unrecognized_object() {
        assert!(matches!(build(r#"{"items": [1, 2]}"#), VizError::InvalidShape { .. }));
    }

    #[test]
    fn test_top_level_array() {
        assert!(matches!(build("[]"), VizError::InvalidShape { .. }));
    }

    #[test]
    fn test_duplicate_ids() {
        let err = build(r#"{"nodes":[{"id":"1"},{"id":"1"}],"links":[]}"#);
        assert!(err.to_string().contains("duplicate"), "{err}");
    }

    #[test]
    fn test_two_roots() {
        let err = build(r#"{"nodes":[{"id":"1"},{"id":"2"}],"links":[]}"#);
        assert!(err.to_string().contains("exactly one root"), "{err}");
    }

    #[test]
    fn test_parent_cycle_is_unreachable() {
        let err = build(
            r#"{"nodes":[{"id":"r"},{"id":"a","parent":"b"},{"id":"b","parent":"a"}],"links":[]}"#,
        );
        assert!(err.to_string().contains("unreachable"), "{err}");
    }

    #[test]
    fn test_parent_names_missing_node() {
        let err = build(r#"{"nodes":[{"id":"1"},{"id":"2","parent":"7"}],"links":[]}"#);
        assert!(matches!(err, VizError::InvalidShape { .. }));
    }
}

// =============================================================================
// Link Resolution Tests
// =============================================================================

mod links {
    use strata::core::BuilderConfig;
    use strata::model::GraphModelBuilder;
    use strata::VizError;

    const DANGLING: &str = r#"{"nodes":[{"id":"1","parent":null,"label":"Object","value":"1 items"}],"links":[{"source":"1","target":"2"}]}"#;

    #[test]
    fn test_dangling_target_is_dropped() {
        let model = GraphModelBuilder::new().build_str(DANGLING).unwrap();
        assert_eq!(model.node_count(), 1);
        assert_eq!(model.edge_count(), 0);
        assert_eq!(model.dropped_edges(), 1);
    }

    #[test]
    fn test_dangling_target_rejected_when_strict() {
        let builder = GraphModelBuilder::with_config(BuilderConfig { strict_links: true });
        let err = builder.build_str(DANGLING).unwrap_err();
        assert!(matches!(err, VizError::InvalidShape { .. }));
    }

    #[test]
    fn test_self_link_is_dropped() {
        let model = GraphModelBuilder::new()
            .build_str(
                r#"{"nodes":[{"id":"1"},{"id":"2","parent":"1"}],"links":[{"source":"1","target":"1"},{"source":"1","target":"2"}]}"#,
            )
            .unwrap();
        assert_eq!(model.edge_count(), 1);
    }

    #[test]
    fn test_parent_inferred_from_links() {
        let model = GraphModelBuilder::new()
            .build_str(
                r#"{"nodes":[{"id":"a"},{"id":"b"},{"id":"c"}],"links":[{"source":"a","target":"b"},{"source":"b","target":"c"}]}"#,
            )
            .unwrap();
        let c = model.get_node("c").unwrap();
        assert_eq!(c.depth, 2);
        assert_eq!(model.node(c.parent.unwrap()).id, "b");
    }

    #[test]
    fn test_supplied_depth_is_corrected() {
        let model = GraphModelBuilder::new()
            .build_str(
                r#"{"nodes":[{"id":"1","depth":5},{"id":"2","parent":"1","depth":0}],"links":[{"source":"1","target":"2"}]}"#,
            )
            .unwrap();
        assert_eq!(model.get_node("1").unwrap().depth, 0);
        assert_eq!(model.get_node("2").unwrap().depth, 1);
    }
}

// =============================================================================
// Tree Payload Tests
// =============================================================================

mod tree_payloads {
    use strata::model::GraphModelBuilder;
    use strata::{render, Size, ThemeKind, ViewKind, VizError};

    #[test]
    fn test_value_and_children_is_invalid() {
        let err = GraphModelBuilder::new()
            .build_str(r#"{"name":"r","children":[{"name":"x","value":1,"children":[]}]}"#)
            .unwrap_err();
        assert!(matches!(err, VizError::InvalidShape { .. }));
        assert!(err.to_string().contains("r/x"), "{err}");
    }

    #[test]
    fn test_neither_value_nor_children_is_invalid() {
        let err = GraphModelBuilder::new()
            .build_str(r#"{"name":"r","children":[{"name":"x"}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("neither"), "{err}");
    }

    #[test]
    fn test_empty_children_is_a_container() {
        let model = GraphModelBuilder::new()
            .build_str(r#"{"name":"r","children":[{"name":"empty","children":[]}]}"#)
            .unwrap();
        let empty = model.get_node("2").unwrap();
        assert_eq!(empty.label, "empty");
        assert!(empty.children.is_empty());
        assert!(!empty.is_leaf);
    }

    #[test]
    fn test_null_value_is_displayed() {
        let model = GraphModelBuilder::new()
            .build_str(r#"{"name":"r","children":[{"name":"n","value":null}]}"#)
            .unwrap();
        assert_eq!(model.get_node("2").unwrap().value, "null");
    }

    #[test]
    fn test_single_leaf_root() {
        let scene = render(r#"{"name":"solo","value":"1"}"#, ViewKind::Tree, ThemeKind::Light, Size::default())
            .unwrap();
        assert_eq!(scene.nodes.len(), 1);
        assert!(scene.edges.is_empty());
        assert!(scene.nodes[0].is_finite());
    }
}

// =============================================================================
// Rendering Edge Cases
// =============================================================================

mod rendering {
    use strata::{render, render_svg, Size, ThemeKind, ViewKind};

    #[test]
    fn test_long_labels_are_truncated() {
        let long = "x".repeat(80);
        let payload = format!(r#"{{"name":"root","children":[{{"name":"{long}","value":"v"}}]}}"#);
        let scene = render(&payload, ViewKind::Columns, ThemeKind::Light, Size::default()).unwrap();
        let label = scene.labels.iter().find(|l| l.text.starts_with('x')).unwrap();
        assert!(label.text.ends_with('…'));
        assert!(label.text.chars().count() <= 20);
    }

    #[test]
    fn test_markup_in_labels_is_escaped() {
        let payload = r#"{"name":"<root>","children":[{"name":"a&b","value":"\"q\""}]}"#;
        let svg = render_svg(payload, ViewKind::Tree, ThemeKind::Light, Size::default()).unwrap();
        assert!(svg.contains("&lt;root&gt;"));
        assert!(svg.contains("a&amp;b"));
        assert!(!svg.contains("<root>"));
    }

    #[test]
    fn test_tiny_canvas_stays_finite() {
        let payload = r#"{"name":"r","children":[{"name":"a","value":1},{"name":"b","value":2}]}"#;
        for view in [ViewKind::Columns, ViewKind::Tree, ViewKind::Force] {
            let scene = render(payload, view, ThemeKind::Light, Size::new(1.0, 1.0)).unwrap();
            assert!(scene.nodes.iter().all(|n| n.is_finite()), "{view}");
        }
    }
}
