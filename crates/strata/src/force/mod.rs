//! Force-directed layout
//!
//! A d3-force style simulation: link springs, Barnes–Hut charge, a weak pull
//! toward the canvas center and collision avoidance, integrated with velocity
//! decay while alpha cools toward zero.
//!
//! The live view drives a [`SimulationTask`] one tick per frame; static
//! output uses [`ForceLayout`], which runs a fresh simulation to rest.

mod collide;
mod quadtree;
mod random;
mod simulation;
mod task;

pub use simulation::*;
pub use task::*;

use tracing::{info, span, warn, Level};

use crate::core::{ForceConfig, Result, Size};
use crate::layout::{LayoutEngine, LayoutResult};
use crate::model::RenderModel;

/// Run-to-rest force layout
#[derive(Debug, Clone, Default)]
pub struct ForceLayout {
    config: ForceConfig,
}

impl ForceLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ForceConfig) -> Self {
        Self { config }
    }

    /// A fresh, unticked simulation for the model
    pub fn simulation(&self, model: &RenderModel, size: Size) -> Simulation {
        Simulation::new(model, size, self.config.clone())
    }
}

impl LayoutEngine for ForceLayout {
    fn layout(&self, model: &RenderModel, size: Size) -> Result<LayoutResult> {
        let run_span = span!(
            Level::INFO,
            "simulation_run",
            node_count = model.node_count(),
            edge_count = model.edge_count()
        );
        let _enter = run_span.enter();

        let mut simulation = self.simulation(model, size);
        let ticks = simulation.run_to_rest(self.config.max_ticks);
        if simulation.is_settled() {
            info!(ticks, "Simulation settled");
        } else {
            warn!(ticks, alpha = simulation.alpha(), "Simulation hit the tick limit");
        }

        let layout = simulation.to_layout(model, size);
        layout.ensure_finite()?;
        Ok(layout)
    }

    fn name(&self) -> &'static str {
        "force"
    }
}
