//! Scene building for each view

use tracing::{debug, span, Level};

use super::interaction::{HoverStyle, Interaction};
use super::scene::{EdgeShape, NodeShape, NodeStyle, Scene, TextAnchor, TextShape};
use super::{Palette, Theme};
use crate::core::{strip_quotes, truncate_label, Point, RenderConfig, Result, Size, ViewKind, VizError};
use crate::force::Simulation;
use crate::layout::LayoutResult;
use crate::model::{ModelNode, RenderModel};

const COLUMN_CORNER_RADIUS: f64 = 5.0;
const COLUMN_TEXT_INSET: f64 = 10.0;
const TREE_LABEL_GAP: f64 = 8.0;
const FORCE_LABEL_GAP: f64 = 4.0;
/// Baseline shift that centers a line of text on its anchor
const CENTER_DY: f64 = 0.31;
const VALUE_DY: f64 = 1.3;
const VALUE_FONT_SIZE: f64 = 10.0;

/// Builds and updates scenes
#[derive(Debug, Clone, Default)]
pub struct InteractiveRenderer {
    config: RenderConfig,
    theme: Theme,
    palette: Palette,
}

impl InteractiveRenderer {
    pub fn new(config: RenderConfig, theme: Theme) -> Self {
        let palette = config
            .label_colors
            .iter()
            .fold(Palette::default(), |palette, (label, color)| {
                palette.with_label(label.as_str(), color.as_str())
            });
        Self {
            config,
            theme,
            palette,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// A blank canvas in the current theme
    pub fn empty_scene(&self, size: Size) -> Scene {
        let mut scene = Scene::empty(size, self.theme.background);
        scene.font_family = self.config.font_family.clone();
        scene
    }

    /// A blank canvas showing `message`
    pub fn error_scene(&self, size: Size, message: impl Into<String>) -> Scene {
        let mut scene = Scene::error(
            size,
            self.theme.background,
            message,
            self.theme.error_text,
        );
        scene.font_family = self.config.font_family.clone();
        scene
    }

    /// Pointer handling matched to this renderer's view settings
    pub fn interaction(&self, view: ViewKind) -> Interaction {
        let hover = HoverStyle {
            stroke: self.theme.hover.to_string(),
            stroke_width: self.config.hover_stroke_width,
            fill: (view == ViewKind::Tree).then(|| self.theme.hover.to_string()),
            grow: if view == ViewKind::Tree { 1.5 } else { 1.0 },
        };
        Interaction::new(
            view,
            self.config.min_zoom,
            self.config.max_zoom,
            self.config.zoom_step,
            hover,
        )
    }

    /// Build the drawables for one pass
    pub fn build_scene(
        &self,
        model: &RenderModel,
        layout: &LayoutResult,
        view: ViewKind,
        size: Size,
    ) -> Result<Scene> {
        let scene_span = span!(
            Level::INFO,
            "build_scene",
            view = %view,
            node_count = layout.nodes.len(),
            edge_count = layout.edges.len()
        );
        let _enter = scene_span.enter();

        layout.ensure_finite()?;
        if layout.nodes.len() != model.node_count() {
            return Err(VizError::layout(format!(
                "layout placed {} of {} nodes",
                layout.nodes.len(),
                model.node_count()
            )));
        }

        let mut scene = self.empty_scene(size);

        let (link, link_width) = match view {
            ViewKind::Columns => (self.theme.column_link, 1.0),
            ViewKind::Tree | ViewKind::Force => (self.theme.link, self.config.stroke_width),
        };
        scene.edges = layout
            .edges
            .iter()
            .map(|e| EdgeShape {
                source: e.source,
                target: e.target,
                path: e.path,
                stroke: link.to_string(),
                stroke_width: link_width,
            })
            .collect();

        for placed in &layout.nodes {
            let node = model.node(placed.index);
            let is_root = placed.index == model.root();
            let center = placed.center();

            match view {
                ViewKind::Columns => {
                    scene.nodes.push(NodeShape::Rect {
                        index: placed.index,
                        x: placed.x,
                        y: placed.y,
                        width: placed.width,
                        height: placed.height,
                        rx: COLUMN_CORNER_RADIUS,
                        style: NodeStyle {
                            fill: self.node_color(node, is_root).to_string(),
                            stroke: self.theme.box_stroke.to_string(),
                            stroke_width: 1.0,
                        },
                    });
                    let offset = Point::new(COLUMN_TEXT_INSET - placed.width / 2.0, 0.0);
                    scene.labels.push(self.label(
                        placed.index,
                        center,
                        offset,
                        column_text(node, is_root),
                        TextAnchor::Start,
                        self.config.font_size,
                        self.theme.box_text,
                        0.0,
                        true,
                    ));
                }
                ViewKind::Tree => {
                    let leaf = node.children.is_empty();
                    scene.nodes.push(NodeShape::Circle {
                        index: placed.index,
                        cx: center.x,
                        cy: center.y,
                        r: self.config.tree_node_radius,
                        style: NodeStyle {
                            fill: if leaf {
                                self.theme.tree_leaf_fill
                            } else {
                                self.theme.tree_internal_fill
                            }
                            .to_string(),
                            stroke: self.theme.tree_stroke.to_string(),
                            stroke_width: self.config.stroke_width,
                        },
                    });
                    let (dx, anchor) = if leaf {
                        (TREE_LABEL_GAP, TextAnchor::Start)
                    } else {
                        (-TREE_LABEL_GAP, TextAnchor::End)
                    };
                    scene.labels.push(self.label(
                        placed.index,
                        center,
                        Point::new(dx, 0.0),
                        node.label.clone(),
                        anchor,
                        self.config.font_size,
                        self.theme.text,
                        CENTER_DY,
                        false,
                    ));
                    if leaf && !node.value.is_empty() {
                        scene.labels.push(self.label(
                            placed.index,
                            center,
                            Point::new(TREE_LABEL_GAP, 0.0),
                            strip_quotes(&node.value).to_string(),
                            TextAnchor::Start,
                            VALUE_FONT_SIZE,
                            self.theme.value_text,
                            VALUE_DY,
                            false,
                        ));
                    }
                }
                ViewKind::Force => {
                    let r = placed.width / 2.0;
                    scene.nodes.push(NodeShape::Circle {
                        index: placed.index,
                        cx: center.x,
                        cy: center.y,
                        r,
                        style: NodeStyle {
                            fill: self.node_color(node, is_root).to_string(),
                            stroke: self.theme.tree_stroke.to_string(),
                            stroke_width: self.config.stroke_width,
                        },
                    });
                    scene.labels.push(self.label(
                        placed.index,
                        center,
                        Point::new(r + FORCE_LABEL_GAP, 0.0),
                        node.label.clone(),
                        TextAnchor::Start,
                        self.config.font_size,
                        self.theme.text,
                        CENTER_DY,
                        false,
                    ));
                }
            }
        }

        if let Some(shape) = scene.nodes.iter().find(|n| !n.is_finite()) {
            return Err(VizError::layout(format!(
                "node {} has a non-finite shape",
                shape.index()
            )));
        }

        debug!(
            nodes = scene.nodes.len(),
            labels = scene.labels.len(),
            "Scene built"
        );
        Ok(scene)
    }

    /// Move every node, edge endpoint and label to the simulation's positions
    pub fn sync_positions(&self, scene: &mut Scene, simulation: &Simulation) {
        let positions: Vec<Point> = simulation.positions().collect();
        for shape in &mut scene.nodes {
            if let Some(&p) = positions.get(shape.index()) {
                shape.set_center(p);
            }
        }
        for edge in &mut scene.edges {
            if let (Some(&from), Some(&to)) = (positions.get(edge.source), positions.get(edge.target)) {
                edge.path = edge.path.with_endpoints(from, to);
            }
        }
        for label in &mut scene.labels {
            if let Some(&p) = label.node.and_then(|i| positions.get(i)) {
                label.x = p.x + label.offset.x;
                label.y = p.y + label.offset.y;
            }
        }
    }

    fn node_color(&self, node: &ModelNode, is_root: bool) -> &str {
        self.palette
            .color_for(&node.label, &node.value, node.is_leaf, is_root)
    }

    #[allow(clippy::too_many_arguments)]
    fn label(
        &self,
        node: usize,
        center: Point,
        offset: Point,
        text: String,
        anchor: TextAnchor,
        font_size: f64,
        fill: &str,
        dy: f64,
        middle_baseline: bool,
    ) -> TextShape {
        TextShape {
            node: Some(node),
            offset,
            x: center.x + offset.x,
            y: center.y + offset.y,
            text: truncate_label(&text, self.config.max_label_width),
            anchor,
            font_size,
            fill: fill.to_string(),
            dy,
            middle_baseline,
        }
    }
}

/// `label: value`, or `label [value]` for the root
fn column_text(node: &ModelNode, is_root: bool) -> String {
    if is_root {
        format!("{} [{}]", node.label, node.value)
    } else {
        format!("{}: {}", node.label, node.value)
    }
}
