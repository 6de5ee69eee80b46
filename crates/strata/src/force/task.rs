//! Cancellable per-frame tick task
//!
//! The host calls [`SimulationTask::step`] once per animation frame. A render
//! pass that is torn down cancels its token, and every later step returns
//! [`TickOutcome::Cancelled`] without touching the simulation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::Simulation;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of one task step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One tick ran
    Ticked,
    /// Nothing left to do until the next drag
    Settled,
    /// The owning pass is gone
    Cancelled,
}

/// A simulation driven one tick at a time
#[derive(Debug)]
pub struct SimulationTask {
    simulation: Simulation,
    token: CancelToken,
}

impl SimulationTask {
    pub fn new(simulation: Simulation) -> Self {
        Self::with_token(simulation, CancelToken::new())
    }

    pub fn with_token(simulation: Simulation, token: CancelToken) -> Self {
        Self { simulation, token }
    }

    /// A handle that cancels this task
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run at most one tick
    pub fn step(&mut self) -> TickOutcome {
        if self.token.is_cancelled() {
            return TickOutcome::Cancelled;
        }
        if self.simulation.is_settled() {
            return TickOutcome::Settled;
        }
        self.simulation.tick();
        if self.simulation.is_settled() {
            debug!(ticks = self.simulation.tick_count(), "Simulation settled");
        }
        TickOutcome::Ticked
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ForceConfig, Size};
    use crate::model::GraphModelBuilder;

    fn task() -> SimulationTask {
        let model = GraphModelBuilder::new()
            .build_str(r#"{"name":"r","children":[{"name":"a","value":1},{"name":"b","value":2}]}"#)
            .unwrap();
        SimulationTask::new(Simulation::new(&model, Size::default(), ForceConfig::default()))
    }

    #[test]
    fn test_step_ticks_once() {
        let mut task = task();
        assert_eq!(task.step(), TickOutcome::Ticked);
        assert_eq!(task.simulation().tick_count(), 1);
    }

    #[test]
    fn test_cancelled_task_does_not_tick() {
        let mut task = task();
        let token = task.token();
        token.cancel();
        token.cancel();
        assert_eq!(task.step(), TickOutcome::Cancelled);
        assert_eq!(task.simulation().tick_count(), 0);
    }

    #[test]
    fn test_runs_until_settled() {
        let mut task = task();
        let mut steps = 0;
        while task.step() == TickOutcome::Ticked {
            steps += 1;
            assert!(steps < 1000);
        }
        assert_eq!(task.step(), TickOutcome::Settled);
    }

    #[test]
    fn test_drag_wakes_settled_task() {
        let mut task = task();
        while task.step() == TickOutcome::Ticked {}
        task.simulation_mut().drag_start(1, 0.0, 0.0);
        assert_eq!(task.step(), TickOutcome::Ticked);
    }
}
