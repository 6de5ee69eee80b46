//! WebAssembly bindings for Strata
//!
//! Exposes one-shot SVG rendering plus a stateful [`WasmView`] wrapper around
//! [`ViewController`] for hosts that animate the force view and forward
//! pointer events.

use wasm_bindgen::prelude::*;

use crate::core::{Size, ThemeKind, ViewKind, VizConfig};
use crate::force::TickOutcome;
use crate::view::{RenderRequest, ViewController};

/// Initialize WASM module
///
/// Sets up the panic hook and routes tracing output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn parse_view(view: &str) -> Result<ViewKind, JsValue> {
    ViewKind::from_str(view).ok_or_else(|| {
        JsValue::from_str(&format!(
            "Unknown view: {}. Use 'tree', 'columns' or 'force'",
            view
        ))
    })
}

fn parse_theme(theme: &str) -> Result<ThemeKind, JsValue> {
    ThemeKind::from_str(theme).ok_or_else(|| {
        JsValue::from_str(&format!("Unknown theme: {}. Use 'light' or 'dark'", theme))
    })
}

/// Render a payload to an SVG document
///
/// # Arguments
/// * `payload` - JSON payload, graph or tree shaped
/// * `view` - "tree", "columns" or "force"
/// * `theme` - "light" or "dark"
///
/// Throws a JavaScript error if the payload is invalid or layout fails.
#[wasm_bindgen]
pub fn render_svg(
    payload: &str,
    view: &str,
    theme: &str,
    width: f64,
    height: f64,
) -> Result<String, JsValue> {
    let view = parse_view(view)?;
    let theme = parse_theme(theme)?;
    crate::render_svg(payload, view, theme, Size::new(width, height))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Stateful view for interactive hosts
#[wasm_bindgen]
pub struct WasmView {
    controller: ViewController,
}

#[wasm_bindgen]
impl WasmView {
    /// Create a view, optionally from a JSON config document
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<WasmView, JsValue> {
        let config = match config {
            Some(json) => VizConfig::from_json_str(&json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => VizConfig::default(),
        };
        Ok(WasmView {
            controller: ViewController::new(config),
        })
    }

    /// Start a new render pass; the canvas shows the error message on failure
    pub fn render(
        &mut self,
        payload: &str,
        view: &str,
        theme: &str,
        width: f64,
        height: f64,
    ) -> Result<(), JsValue> {
        let request = RenderRequest::new(
            payload,
            parse_view(view)?,
            parse_theme(theme)?,
            Size::new(width, height),
        );
        self.controller
            .render(request)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Advance one animation frame; returns false once the simulation is at rest
    pub fn frame(&mut self) -> bool {
        self.controller.frame() == TickOutcome::Ticked
    }

    /// Current scene as SVG
    pub fn svg(&self) -> String {
        self.controller.scene().to_svg()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.controller.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.controller.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.controller.pointer_leave();
    }

    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) {
        self.controller.wheel(x, y, delta_y);
    }

    pub fn clear(&mut self) {
        self.controller.clear();
    }
}
