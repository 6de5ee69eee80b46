//! Strata - Interactive visualizations of hierarchical data
//!
//! Takes a JSON payload describing a hierarchy (either an explicit
//! `nodes`/`links` graph or a nested `name`/`children` tree) and lays it out
//! as one of three views: layered columns of boxes, a tidy tree, or a
//! force-directed network. The result is a retained [`render::Scene`] that
//! serializes to SVG.
//!
//! # Quick Start
//!
//! ```rust
//! use strata::{render_svg, Size, ThemeKind, ViewKind};
//!
//! let payload = r#"{"name":"root","children":[{"name":"a","value":"1"}]}"#;
//! let svg = render_svg(payload, ViewKind::Tree, ThemeKind::Light, Size::default()).unwrap();
//! assert!(svg.contains("<circle"));
//! ```
//!
//! # Advanced Usage
//!
//! Each stage can be driven separately:
//!
//! ```rust
//! use strata::prelude::*;
//!
//! let payload = r#"{"nodes":[{"id":"1","label":"Object"},{"id":"2","label":"name","value":"x","parent":"1"}],
//!                   "links":[{"source":"1","target":"2"}]}"#;
//!
//! let model = GraphModelBuilder::new().build_str(payload).unwrap();
//! assert_eq!(model.node_count(), 2);
//! assert_eq!(model.max_depth(), 1);
//!
//! let size = Size::new(800.0, 600.0);
//! let layout = ColumnLayout::new().layout(&model, size).unwrap();
//! let renderer = InteractiveRenderer::new(RenderConfig::default(), Theme::light());
//! let scene = renderer.build_scene(&model, &layout, ViewKind::Columns, size).unwrap();
//! assert_eq!(scene.nodes.len(), 2);
//! ```
//!
//! Interactive hosts use [`view::ViewController`], which also owns the live
//! force simulation and pointer handling.

pub mod core;
pub mod force;
pub mod layout;
pub mod model;
pub mod render;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;

use tracing::debug;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Point, RenderConfig, Size, SourceFormat, ThemeKind, ViewKind, VizConfig, VizError,
    };
    pub use crate::force::{ForceLayout, Simulation, SimulationTask, TickOutcome};
    pub use crate::layout::{ColumnLayout, LayoutEngine, LayoutResult, TreeLayout};
    pub use crate::model::{GraphModelBuilder, RenderModel};
    pub use crate::render::{InteractiveRenderer, Scene, Theme};
    pub use crate::view::{Converter, RenderRequest, ViewController, ViewState};
}

/// Lay out a payload and build its scene in one call
///
/// The force view is run to rest before the scene is built. Empty input
/// yields an empty scene rather than an error.
///
/// # Example
/// ```rust
/// use strata::{render, Size, ThemeKind, ViewKind};
///
/// let scene = render("", ViewKind::Columns, ThemeKind::Dark, Size::default()).unwrap();
/// assert!(scene.is_empty());
/// ```
pub fn render(
    payload: &str,
    view: ViewKind,
    theme: ThemeKind,
    size: Size,
) -> Result<render::Scene> {
    render_with_config(payload, view, theme, size, &VizConfig::default())
}

/// [`render()`] with explicit configuration
pub fn render_with_config(
    payload: &str,
    view: ViewKind,
    theme: ThemeKind,
    size: Size,
    config: &VizConfig,
) -> Result<render::Scene> {
    let renderer = render::InteractiveRenderer::new(config.render.clone(), theme.into());
    let size = if size.is_valid() { size } else { Size::default() };

    let model = match model::GraphModelBuilder::with_config(config.builder.clone()).build_str(payload) {
        Ok(model) => model,
        Err(e) if e.is_empty_input() => return Ok(renderer.empty_scene(size)),
        Err(e) => return Err(e),
    };

    let engine = layout::engine_for(view, config);
    debug!(engine = engine.name(), nodes = model.node_count(), "Laying out");
    let layout = engine.layout(&model, size)?;
    renderer.build_scene(&model, &layout, view, size)
}

/// Render a payload straight to an SVG document
///
/// # Example
/// ```rust
/// use strata::{render_svg, Size, ThemeKind, ViewKind};
///
/// let svg = render_svg(r#"{"name":"only","value":"1"}"#, ViewKind::Columns, ThemeKind::Light, Size::default()).unwrap();
/// assert!(svg.contains("only [1]"));
/// ```
pub fn render_svg(payload: &str, view: ViewKind, theme: ThemeKind, size: Size) -> Result<String> {
    render(payload, view, theme, size).map(|scene| scene.to_svg())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = r#"{"name":"root","children":[{"name":"a","value":"1"},{"name":"b","children":[{"name":"c","value":"2"}]}]}"#;

    #[test]
    fn test_render_every_view() {
        for view in [ViewKind::Columns, ViewKind::Tree, ViewKind::Force] {
            let scene = render(TREE, view, ThemeKind::Light, Size::default()).unwrap();
            assert_eq!(scene.nodes.len(), 4, "{view}");
            assert_eq!(scene.edges.len(), 3, "{view}");
        }
    }

    #[test]
    fn test_render_svg_dark_background() {
        let svg = render_svg(TREE, ViewKind::Tree, ThemeKind::Dark, Size::default()).unwrap();
        assert!(svg.contains("fill=\"#1e1e1e\""));
    }

    #[test]
    fn test_empty_payload_renders_empty_scene() {
        let scene = render("   ", ViewKind::Force, ThemeKind::Light, Size::default()).unwrap();
        assert!(scene.is_empty());
    }

    #[test]
    fn test_invalid_payload_is_an_error() {
        let err = render("[1, 2]", ViewKind::Tree, ThemeKind::Light, Size::default())
            .unwrap_err();
        assert!(matches!(err, VizError::InvalidShape { .. }));
    }

    #[test]
    fn test_invalid_size_falls_back() {
        let scene = render(TREE, ViewKind::Columns, ThemeKind::Light, Size::new(0.0, -1.0))
            .unwrap();
        assert_eq!(scene.size, Size::default());
    }
}
