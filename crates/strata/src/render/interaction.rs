//! Pointer interaction: pan, zoom, hover and node drag
//!
//! Screen coordinates come from the host; hit tests run in graph space
//! through the scene's single top-level transform. Node drags are handed to
//! the live simulation in the force view. Every other view pans instead.

use tracing::trace;

use super::scene::{NodeShape, NodeStyle, Scene};
use crate::core::{Point, ViewKind};
use crate::force::Simulation;

/// How a hovered node is emphasized
#[derive(Debug, Clone, PartialEq)]
pub struct HoverStyle {
    pub stroke: String,
    pub stroke_width: f64,
    /// Replacement fill, if the view recolors hovered nodes
    pub fill: Option<String>,
    /// Radius multiplier for circles
    pub grow: f64,
}

#[derive(Debug, Clone)]
struct HoverState {
    index: usize,
    /// Style and radius to restore on leave
    style: NodeStyle,
    radius: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
struct PanState {
    start: Point,
    transform_start: Point,
}

/// Pointer state for one render pass
#[derive(Debug, Clone)]
pub struct Interaction {
    view: ViewKind,
    min_zoom: f64,
    max_zoom: f64,
    zoom_step: f64,
    hover_style: HoverStyle,
    hover: Option<HoverState>,
    drag: Option<usize>,
    pan: Option<PanState>,
}

impl Interaction {
    pub fn new(
        view: ViewKind,
        min_zoom: f64,
        max_zoom: f64,
        zoom_step: f64,
        hover_style: HoverStyle,
    ) -> Self {
        Self {
            view,
            min_zoom,
            max_zoom,
            zoom_step,
            hover_style,
            hover: None,
            drag: None,
            pan: None,
        }
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover.as_ref().map(|h| h.index)
    }

    pub fn dragged(&self) -> Option<usize> {
        self.drag
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Press: start a node drag (force view) or a pan
    pub fn pointer_down(
        &mut self,
        scene: &mut Scene,
        simulation: Option<&mut Simulation>,
        screen: Point,
    ) {
        let graph = scene.transform.invert(screen);
        if self.view == ViewKind::Force {
            if let (Some(index), Some(sim)) = (scene.node_at(graph), simulation) {
                if sim.drag_start(index, graph.x, graph.y) {
                    self.drag = Some(index);
                    return;
                }
            }
        }
        self.pan = Some(PanState {
            start: screen,
            transform_start: Point::new(scene.transform.x, scene.transform.y),
        });
    }

    /// Move: drag, pan or update the hover
    pub fn pointer_move(
        &mut self,
        scene: &mut Scene,
        simulation: Option<&mut Simulation>,
        screen: Point,
    ) {
        let graph = scene.transform.invert(screen);
        if let Some(index) = self.drag {
            if let Some(sim) = simulation {
                sim.drag_to(index, graph.x, graph.y);
            }
            return;
        }
        if let Some(pan) = self.pan {
            scene.transform.x = pan.transform_start.x + (screen.x - pan.start.x);
            scene.transform.y = pan.transform_start.y + (screen.y - pan.start.y);
            return;
        }
        let target = scene.node_at(graph);
        self.set_hover(scene, target);
    }

    /// Release: end any drag or pan
    pub fn pointer_up(&mut self, simulation: Option<&mut Simulation>) {
        if let Some(index) = self.drag.take() {
            if let Some(sim) = simulation {
                sim.drag_end(index);
            }
        }
        self.pan = None;
    }

    /// Pointer left the canvas
    pub fn pointer_leave(&mut self, scene: &mut Scene, simulation: Option<&mut Simulation>) {
        self.pointer_up(simulation);
        self.set_hover(scene, None);
    }

    /// Zoom one wheel notch, keeping the graph point under the pointer fixed
    ///
    /// Negative `delta_y` zooms in.
    pub fn wheel(&mut self, scene: &mut Scene, screen: Point, delta_y: f64) {
        let factor = if delta_y < 0.0 {
            self.zoom_step
        } else {
            1.0 / self.zoom_step
        };
        let t = &mut scene.transform;
        let k = (t.k * factor).clamp(self.min_zoom, self.max_zoom);
        let anchor = t.invert(screen);
        t.k = k;
        t.x = screen.x - anchor.x * k;
        t.y = screen.y - anchor.y * k;
        trace!(k, "Zoom");
    }

    /// Emphasize `target` and restore the previously hovered node
    pub fn set_hover(&mut self, scene: &mut Scene, target: Option<usize>) {
        if self.hovered() == target {
            return;
        }
        if let Some(prev) = self.hover.take() {
            if let Some(shape) = scene.nodes.iter_mut().find(|n| n.index() == prev.index) {
                *shape.style_mut() = prev.style;
                if let (NodeShape::Circle { r, .. }, Some(radius)) = (shape, prev.radius) {
                    *r = radius;
                }
            }
        }
        let Some(index) = target else {
            return;
        };
        let Some(shape) = scene.nodes.iter_mut().find(|n| n.index() == index) else {
            return;
        };
        let saved = HoverState {
            index,
            style: shape.style().clone(),
            radius: match &*shape {
                NodeShape::Circle { r, .. } => Some(*r),
                NodeShape::Rect { .. } => None,
            },
        };
        let style = shape.style_mut();
        style.stroke = self.hover_style.stroke.clone();
        style.stroke_width = self.hover_style.stroke_width;
        if let Some(fill) = &self.hover_style.fill {
            style.fill = fill.clone();
        }
        if let NodeShape::Circle { r, .. } = &mut *shape {
            *r *= self.hover_style.grow;
        }
        self.hover = Some(saved);
    }
}
