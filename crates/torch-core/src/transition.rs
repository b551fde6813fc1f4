//! Page-transition sequencing: link intent -> dispersion -> settle -> commit.
//!
//! ```text
//! Idle -> Dispersing -> Settling -> Navigating -> Idle
//! ```
//!
//! A newer request at any point before the commit cancels the running
//! dispersion and takes over; the pending target is always the latest path.
//! The orchestrator holds the only writer of the "transition in progress"
//! flag.

use crate::config::TransitionConfig;
use crate::constants::{SMOKE_COUNT, SMOKE_DURATION_MS};
use crate::particles::{
    DispersionDirection, FrameInput, Seeding, Simulation, SimulationConfig, StepOutcome,
};
use crate::signal::{ReadinessGate, TransitionFlag, TransitionFlagWriter};
use crate::time::{Clock, Millis, Timer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Dispersing,
    Settling,
    Navigating,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionState {
    pub phase: TransitionPhase,
    pub from_path: String,
    pub to_path: String,
    pub started_at: Millis,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TransitionEvent {
    Started { from: String, to: String },
    /// A running transition was replaced; its target is dropped.
    Superseded { dropped: String },
    /// Host performs the actual navigation to `to`.
    Commit { to: String },
    Finished { path: String },
    /// Back/forward navigation interrupted an uncommitted transition.
    Aborted,
}

/// Forward when the target sits deeper in the path hierarchy.
pub fn direction_for(from: &str, to: &str) -> DispersionDirection {
    let depth = |p: &str| p.split('/').filter(|s| !s.is_empty()).count();
    if depth(to) > depth(from) {
        DispersionDirection::Forward
    } else {
        DispersionDirection::Backward
    }
}

pub struct TransitionOrchestrator<C: Clock> {
    clock: C,
    config: TransitionConfig,
    state: TransitionState,
    flag: TransitionFlagWriter,
    gate: ReadinessGate,
    simulation: Option<Simulation>,
    settle: Timer,
    generation: u64,
}

impl<C: Clock> TransitionOrchestrator<C> {
    pub fn new(clock: C, config: TransitionConfig, gate: ReadinessGate) -> Self {
        let (flag, _) = TransitionFlag::new();
        Self {
            clock,
            config,
            state: TransitionState::default(),
            flag,
            gate,
            simulation: None,
            settle: Timer::default(),
            generation: 0,
        }
    }

    /// Read handle for collaborators that suppress conflicting UI.
    pub fn flag(&self) -> TransitionFlag {
        self.flag.reader()
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> TransitionPhase {
        self.state.phase
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// The dispersion currently owned by the orchestrator, for painting.
    pub fn simulation(&self) -> Option<&Simulation> {
        self.simulation.as_ref()
    }

    /// Number of transitions started so far; bumps on every accepted request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Internal link activation. Returns false when the request was ignored.
    pub fn request(
        &mut self,
        from: &str,
        to: &str,
        seeding: Seeding,
        viewport: [f32; 2],
        out: &mut Vec<TransitionEvent>,
    ) -> bool {
        if to == from && self.state.phase == TransitionPhase::Idle {
            return false;
        }
        let now = self.clock.now_ms();

        if matches!(
            self.state.phase,
            TransitionPhase::Dispersing | TransitionPhase::Settling
        ) {
            self.stop_effect();
            log::info!("[transition] {} superseded by {}", self.state.to_path, to);
            out.push(TransitionEvent::Superseded {
                dropped: std::mem::take(&mut self.state.to_path),
            });
        }

        self.generation += 1;
        self.state.from_path = from.to_string();
        self.state.to_path = to.to_string();
        self.state.started_at = now;
        self.flag.set(true);
        out.push(TransitionEvent::Started {
            from: from.to_string(),
            to: to.to_string(),
        });

        if !self.gate.is_open() {
            log::info!("[transition] assets not ready, committing {} directly", to);
            self.commit(out);
            return true;
        }

        let seed = self.config.seed.wrapping_add(self.generation);
        // Nothing to break apart: wash the page with smoke instead.
        let config = match seeding {
            Seeding::Uniform => SimulationConfig::smoke(SMOKE_COUNT, SMOKE_DURATION_MS, seed),
            _ => SimulationConfig::dispersion(
                self.config.dispersion_count,
                self.config.dispersion_duration_ms,
                direction_for(from, to),
                seed,
            ),
        };
        self.simulation = Some(Simulation::new(config, viewport, seeding));
        self.state.phase = TransitionPhase::Dispersing;
        log::info!("[transition] dispersing {} -> {}", from, to);
        true
    }

    /// Advance the running effect and any pending settle delay.
    pub fn frame(&mut self, dt_ms: f32, input: &FrameInput, out: &mut Vec<TransitionEvent>) {
        let now = self.clock.now_ms();
        if self.state.phase == TransitionPhase::Dispersing {
            let outcome = match self.simulation.as_mut() {
                Some(sim) => sim.step(dt_ms, input),
                None => StepOutcome::Completed,
            };
            if outcome != StepOutcome::Running {
                self.state.phase = TransitionPhase::Settling;
                self.settle.arm(now, self.config.settle_delay_ms);
            }
        }
        if self.state.phase == TransitionPhase::Settling && self.settle.fire_if_due(now) {
            self.simulation = None;
            self.commit(out);
        }
    }

    /// The router confirming it rendered `to`. Only the current target
    /// resolves a transition; late notices for earlier paths are ignored.
    pub fn on_route_changed(&mut self, to: &str, out: &mut Vec<TransitionEvent>) {
        match self.state.phase {
            TransitionPhase::Idle => {}
            _ if to == self.state.to_path => self.finish(out),
            // Landed somewhere else after the commit; nothing left to animate.
            TransitionPhase::Navigating => self.finish(out),
            TransitionPhase::Dispersing | TransitionPhase::Settling => {
                log::debug!("[transition] ignoring stale route notice for {}", to);
            }
        }
    }

    /// Browser back/forward. Never starts a dispersion; aborts an uncommitted one.
    pub fn on_back_forward(&mut self, to: &str, out: &mut Vec<TransitionEvent>) {
        match self.state.phase {
            TransitionPhase::Idle => {}
            TransitionPhase::Navigating => self.finish(out),
            TransitionPhase::Dispersing | TransitionPhase::Settling => {
                self.stop_effect();
                log::info!("[transition] aborted by navigation to {}", to);
                self.reset();
                out.push(TransitionEvent::Aborted);
            }
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if let Some(sim) = self.simulation.as_mut() {
            sim.resize(width, height);
        }
    }

    fn commit(&mut self, out: &mut Vec<TransitionEvent>) {
        self.state.phase = TransitionPhase::Navigating;
        log::info!("[transition] commit {}", self.state.to_path);
        out.push(TransitionEvent::Commit {
            to: self.state.to_path.clone(),
        });
    }

    fn finish(&mut self, out: &mut Vec<TransitionEvent>) {
        self.stop_effect();
        let path = std::mem::take(&mut self.state.to_path);
        self.reset();
        out.push(TransitionEvent::Finished { path });
    }

    fn stop_effect(&mut self) {
        if let Some(mut sim) = self.simulation.take() {
            sim.cancel();
        }
        self.settle.cancel();
    }

    fn reset(&mut self) {
        self.state = TransitionState::default();
        self.flag.set(false);
    }
}
