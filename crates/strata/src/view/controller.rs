//! View controller coordinating one render pass at a time
//!
//! The controller runs the pipeline for every request:
//! payload → model → layout (or live simulation) → scene
//!
//! Starting a request always tears down the previous pass first, so a
//! superseded simulation never ticks against a stale scene.

use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;
use tracing::{debug, error, info, span, warn, Level};

use super::Converter;
use crate::core::{Point, Result, Size, SourceFormat, ThemeKind, VizConfig, ViewKind, VizError};
use crate::force::{CancelToken, ForceLayout, Simulation, SimulationTask, TickOutcome};
use crate::layout::engine_for;
use crate::model::{GraphModelBuilder, RenderModel};
use crate::render::{InteractiveRenderer, Interaction, Scene, Theme};

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Rendering,
    Error,
}

/// Payload of a request, either raw JSON text or an already decoded value
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Json(Value),
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

/// Everything one render needs
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub payload: Payload,
    pub view: ViewKind,
    pub theme: ThemeKind,
    /// Host size at request time
    pub size: Size,
}

impl RenderRequest {
    pub fn new(payload: impl Into<Payload>, view: ViewKind, theme: ThemeKind, size: Size) -> Self {
        Self {
            payload: payload.into(),
            view,
            theme,
            size,
        }
    }
}

/// State owned by the active pass
struct RenderPass {
    model: RenderModel,
    view: ViewKind,
    task: Option<SimulationTask>,
    interaction: Interaction,
    renderer: InteractiveRenderer,
}

/// Owns the scene and the active render pass
pub struct ViewController {
    config: VizConfig,
    state: ViewState,
    scene: Scene,
    pass: Option<RenderPass>,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(VizConfig::default())
    }
}

impl ViewController {
    pub fn new(config: VizConfig) -> Self {
        Self {
            config,
            state: ViewState::Idle,
            scene: Scene::empty(Size::default(), Theme::default().background),
            pass: None,
        }
    }

    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Model of the active pass
    pub fn model(&self) -> Option<&RenderModel> {
        self.pass.as_ref().map(|p| &p.model)
    }

    /// View of the active pass
    pub fn view(&self) -> Option<ViewKind> {
        self.pass.as_ref().map(|p| p.view)
    }

    /// Live simulation of the active pass (force view only)
    pub fn simulation(&self) -> Option<&Simulation> {
        self.pass
            .as_ref()
            .and_then(|p| p.task.as_ref())
            .map(SimulationTask::simulation)
    }

    /// Cancellation handle of the active pass's simulation
    pub fn cancel_token(&self) -> Option<CancelToken> {
        self.pass
            .as_ref()
            .and_then(|p| p.task.as_ref())
            .map(SimulationTask::token)
    }

    pub fn interaction(&self) -> Option<&Interaction> {
        self.pass.as_ref().map(|p| &p.interaction)
    }

    /// Run the pipeline for a request
    ///
    /// An empty payload yields an empty scene and `Ok`. Any other failure
    /// leaves an error message on the canvas and is returned.
    pub fn render(&mut self, request: RenderRequest) -> Result<()> {
        let render_span = span!(
            Level::INFO,
            "view_render",
            view = %request.view,
            theme = %request.theme
        );
        let _enter = render_span.enter();

        self.teardown();
        self.state = ViewState::Rendering;

        let size = host_size(request.size);
        let renderer = InteractiveRenderer::new(
            self.config.render.clone(),
            Theme::from(request.theme),
        );

        let config = &self.config;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            run_pass(config, &request, size, &renderer)
        }));

        match outcome {
            Ok(Ok((scene, pass))) => {
                info!(
                    node_count = pass.model.node_count(),
                    animated = pass.task.is_some(),
                    "Render pass ready"
                );
                self.scene = scene;
                self.pass = Some(pass);
                self.state = ViewState::Idle;
                Ok(())
            }
            Ok(Err(e)) if e.is_empty_input() => {
                debug!("Nothing to render");
                self.scene = renderer.empty_scene(size);
                self.state = ViewState::Idle;
                Ok(())
            }
            Ok(Err(e)) => Err(self.fail(&renderer, size, e)),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(panic = %message, "Render pass panicked");
                Err(self.fail(&renderer, size, VizError::render(message)))
            }
        }
    }

    /// Convert source text first, then render the resulting payload
    ///
    /// Converter failures are reported verbatim as [`VizError::Conversion`].
    #[allow(clippy::too_many_arguments)]
    pub fn render_source(
        &mut self,
        source: &str,
        format: SourceFormat,
        converter: &dyn Converter,
        view: ViewKind,
        theme: ThemeKind,
        size: Size,
    ) -> Result<()> {
        if source.trim().is_empty() {
            return self.render(RenderRequest::new("", view, theme, size));
        }
        match converter.convert(source, format) {
            Ok(payload) => self.render(RenderRequest::new(payload, view, theme, size)),
            Err(e) => {
                self.teardown();
                let size = host_size(size);
                let renderer =
                    InteractiveRenderer::new(self.config.render.clone(), Theme::from(theme));
                Err(self.fail(&renderer, size, VizError::conversion(e.to_string())))
            }
        }
    }

    /// Advance the live simulation one tick and move the scene along
    pub fn frame(&mut self) -> TickOutcome {
        let Some(pass) = self.pass.as_mut() else {
            return TickOutcome::Settled;
        };
        let Some(task) = pass.task.as_mut() else {
            return TickOutcome::Settled;
        };
        let outcome = task.step();
        if outcome == TickOutcome::Ticked {
            pass.renderer.sync_positions(&mut self.scene, task.simulation());
        }
        outcome
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if let Some(pass) = self.pass.as_mut() {
            let sim = pass.task.as_mut().map(SimulationTask::simulation_mut);
            pass.interaction.pointer_down(&mut self.scene, sim, Point::new(x, y));
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some(pass) = self.pass.as_mut() {
            let sim = pass.task.as_mut().map(SimulationTask::simulation_mut);
            pass.interaction.pointer_move(&mut self.scene, sim, Point::new(x, y));
        }
    }

    pub fn pointer_up(&mut self) {
        if let Some(pass) = self.pass.as_mut() {
            let sim = pass.task.as_mut().map(SimulationTask::simulation_mut);
            pass.interaction.pointer_up(sim);
        }
    }

    pub fn pointer_leave(&mut self) {
        if let Some(pass) = self.pass.as_mut() {
            let sim = pass.task.as_mut().map(SimulationTask::simulation_mut);
            pass.interaction.pointer_leave(&mut self.scene, sim);
        }
    }

    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) {
        if let Some(pass) = self.pass.as_mut() {
            pass.interaction.wheel(&mut self.scene, Point::new(x, y), delta_y);
        }
    }

    /// Drop the active pass and its drawables; idempotent
    pub fn clear(&mut self) {
        self.teardown();
        self.state = ViewState::Idle;
    }

    fn teardown(&mut self) {
        if let Some(pass) = self.pass.take() {
            if let Some(task) = &pass.task {
                task.cancel();
                debug!(ticks = task.simulation().tick_count(), "Simulation cancelled");
            }
        }
        self.scene.clear();
    }

    fn fail(&mut self, renderer: &InteractiveRenderer, size: Size, err: VizError) -> VizError {
        warn!(error = %err, "Render failed");
        self.scene = renderer.error_scene(size, err.to_string());
        self.state = ViewState::Error;
        err
    }
}

fn host_size(size: Size) -> Size {
    if size.is_valid() {
        size
    } else {
        warn!(width = size.width, height = size.height, "Host size unusable, using default");
        Size::default()
    }
}

fn run_pass(
    config: &VizConfig,
    request: &RenderRequest,
    size: Size,
    renderer: &InteractiveRenderer,
) -> Result<(Scene, RenderPass)> {
    let builder = GraphModelBuilder::with_config(config.builder.clone());
    let model = match &request.payload {
        Payload::Text(text) => builder.build_str(text)?,
        Payload::Json(value) => builder.build(value)?,
    };

    let view = request.view;
    let (scene, task) = if view.is_animated() {
        let simulation = ForceLayout::with_config(config.force.clone()).simulation(&model, size);
        let layout = simulation.to_layout(&model, size);
        let scene = renderer.build_scene(&model, &layout, view, size)?;
        (scene, Some(SimulationTask::new(simulation)))
    } else {
        let engine = engine_for(view, config);
        debug!(engine = engine.name(), "Running layout");
        let layout = engine.layout(&model, size)?;
        (renderer.build_scene(&model, &layout, view, size)?, None)
    };

    let pass = RenderPass {
        model,
        view,
        task,
        interaction: renderer.interaction(view),
        renderer: renderer.clone(),
    };
    Ok((scene, pass))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "render pass panicked".to_string()
    }
}
