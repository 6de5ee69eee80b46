//! Integration tests for the public API

use strata::prelude::*;
use strata::{render, render_svg, render_with_config};

const TREE: &str = r#"{
  "name": "config",
  "children": [
    {"name": "name", "value": "\"strata\""},
    {"name": "version", "value": 3},
    {"name": "features", "children": [
      {"name": "0", "value": "svg"},
      {"name": "1", "value": "force"}
    ]}
  ]
}"#;

const GRAPH: &str = r#"{
  "nodes": [
    {"id": 1, "label": "Object", "value": "2 items", "parent": null, "is_leaf": false},
    {"id": 2, "label": "users", "value": "1 items", "parent": 1, "is_leaf": false},
    {"id": 3, "label": "0", "value": "ada", "parent": 2, "is_leaf": true},
    {"id": 4, "label": "active", "value": "true", "parent": 1, "is_leaf": true}
  ],
  "links": [
    {"source": 1, "target": 2},
    {"source": 2, "target": 3},
    {"source": 1, "target": 4}
  ]
}"#;

#[test]
fn test_render_tree_view() {
    let scene = render(TREE, ViewKind::Tree, ThemeKind::Light, Size::new(900.0, 700.0)).unwrap();
    assert_eq!(scene.nodes.len(), 6);
    assert_eq!(scene.edges.len(), 5);
    // Quoted values are shown unquoted under the leaf name
    assert!(scene.labels.iter().any(|l| l.text == "strata"));
    assert!(scene.labels.iter().any(|l| l.text == "version"));
}

#[test]
fn test_render_columns_view() {
    let scene = render(GRAPH, ViewKind::Columns, ThemeKind::Light, Size::default()).unwrap();
    assert_eq!(scene.nodes.len(), 4);
    let texts: Vec<&str> = scene.labels.iter().map(|l| l.text.as_str()).collect();
    assert!(texts.contains(&"Object [2 items]"));
    assert!(texts.contains(&"active: true"));
}

#[test]
fn test_render_force_view_is_finite() {
    let scene = render(GRAPH, ViewKind::Force, ThemeKind::Dark, Size::default()).unwrap();
    assert_eq!(scene.nodes.len(), 4);
    assert!(scene.nodes.iter().all(|n| n.is_finite()));
    assert!(scene.edges.iter().all(|e| e.path.is_finite()));
}

#[test]
fn test_render_svg_document() {
    let svg = render_svg(GRAPH, ViewKind::Columns, ThemeKind::Light, Size::default()).unwrap();
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches("<rect data-index").count(), 4);
    assert_eq!(svg.matches("<path").count(), 3);
}

#[test]
fn test_render_with_custom_config() {
    let config = VizConfig::from_json_str(r#"{"columns": {"node_width": 100, "h_spacing": 20}}"#)
        .unwrap();
    let scene =
        render_with_config(GRAPH, ViewKind::Columns, ThemeKind::Light, Size::default(), &config)
            .unwrap();
    let depth_one = scene.node_shape(1).unwrap().center();
    // origin 50 + one column of 100 + 20, then half a box
    assert_eq!(depth_one.x, 50.0 + 120.0 + 50.0);
}

#[test]
fn test_staged_pipeline_matches_one_shot() {
    let size = Size::new(800.0, 600.0);
    let model = GraphModelBuilder::new().build_str(TREE).unwrap();
    let layout = TreeLayout::new().layout(&model, size).unwrap();
    let renderer = InteractiveRenderer::new(RenderConfig::default(), Theme::light());
    let staged = renderer.build_scene(&model, &layout, ViewKind::Tree, size).unwrap();

    let one_shot = render(TREE, ViewKind::Tree, ThemeKind::Light, size).unwrap();
    assert_eq!(staged.to_svg(), one_shot.to_svg());
}

#[test]
fn test_numeric_ids_are_normalized() {
    let model = GraphModelBuilder::new().build_str(GRAPH).unwrap();
    assert_eq!(model.get_node("3").unwrap().label, "0");
    assert_eq!(model.node(model.root()).id, "1");
    assert_eq!(model.leaf_count(), 2);
}

#[test]
fn test_view_and_theme_names() {
    assert_eq!(ViewKind::from_str("force"), Some(ViewKind::Force));
    assert_eq!(ViewKind::from_str("TREE"), Some(ViewKind::Tree));
    assert_eq!(ViewKind::from_str("radial"), None);
    assert_eq!(ThemeKind::from_str("dark"), Some(ThemeKind::Dark));
}

#[test]
fn test_config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strata.json");
    std::fs::write(&path, r#"{"force": {"max_ticks": 50, "seed": 7}, "render": {"max_label_width": 8}}"#)
        .unwrap();

    let config = VizConfig::load(&path).unwrap();
    assert_eq!(config.force.max_ticks, 50);
    assert_eq!(config.force.seed, 7);
    assert_eq!(config.render.max_label_width, 8);
    assert_eq!(config.columns, strata::core::ColumnLayoutConfig::default());
}

#[test]
fn test_config_rejects_inverted_zoom() {
    let err = VizConfig::from_json_str(r#"{"render": {"min_zoom": 5, "max_zoom": 1}}"#).unwrap_err();
    assert!(matches!(err, VizError::Config { .. }));
}
