//! Torch / UV activation state machine.
//!
//! `Off -> TorchOnly -> TorchUV`, with `TorchUV -> Off` whenever the torch is
//! switched off. Each toggle is locked for a debounce window measured against
//! the injected [`Clock`]; the delayed UV activation that follows a cold
//! `toggle_uv` is a [`Timer`] resolved in [`IlluminationController::update`].

use crate::config::IlluminationConfig;
use crate::time::{Clock, Millis, Timer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IlluminationState {
    pub torch_active: bool,
    pub uv_mode: bool,
}

impl IlluminationState {
    pub const OFF: Self = Self {
        torch_active: false,
        uv_mode: false,
    };
}

/// Side effects produced by state transitions, drained by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IlluminationEvent {
    TorchChanged(bool),
    /// Host toggles the page marker class and plays the cue.
    UvChanged(bool),
    /// The torch was switched on for the first time on this device.
    FirstActivation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    Applied,
    /// Torch was switched on; UV follows after the activation delay.
    Deferred,
    Debounced,
}

pub struct IlluminationController<C: Clock> {
    clock: C,
    config: IlluminationConfig,
    state: IlluminationState,
    torch_locked_until: Millis,
    uv_locked_until: Millis,
    pending_uv: Timer,
    has_used: bool,
}

impl<C: Clock> IlluminationController<C> {
    /// `has_used` is the persisted usage flag read at mount.
    pub fn new(clock: C, config: IlluminationConfig, has_used: bool) -> Self {
        Self {
            clock,
            config,
            state: IlluminationState::OFF,
            torch_locked_until: f64::NEG_INFINITY,
            uv_locked_until: f64::NEG_INFINITY,
            pending_uv: Timer::default(),
            has_used,
        }
    }

    #[inline]
    pub fn state(&self) -> IlluminationState {
        self.state
    }

    pub fn has_used(&self) -> bool {
        self.has_used
    }

    pub fn uv_pending(&self) -> bool {
        self.pending_uv.is_armed()
    }

    pub fn toggle_torch(&mut self, out: &mut Vec<IlluminationEvent>) -> ToggleOutcome {
        let now = self.clock.now_ms();
        if now < self.torch_locked_until {
            return ToggleOutcome::Debounced;
        }
        self.torch_locked_until = now + self.config.debounce_ms;
        let on = !self.state.torch_active;
        self.set_torch(on, out);
        ToggleOutcome::Applied
    }

    pub fn toggle_uv(&mut self, out: &mut Vec<IlluminationEvent>) -> ToggleOutcome {
        let now = self.clock.now_ms();
        if now < self.uv_locked_until {
            return ToggleOutcome::Debounced;
        }
        self.uv_locked_until = now + self.config.debounce_ms;

        if self.state.uv_mode {
            self.set_uv(false, out);
            return ToggleOutcome::Applied;
        }
        if self.pending_uv.is_armed() {
            // A second press before the delayed activation lands cancels it.
            self.pending_uv.cancel();
            return ToggleOutcome::Applied;
        }
        if self.state.torch_active {
            self.set_uv(true, out);
            ToggleOutcome::Applied
        } else {
            self.set_torch(true, out);
            self.pending_uv.arm(now, self.config.uv_activation_delay_ms);
            ToggleOutcome::Deferred
        }
    }

    /// Unconditional switch-off (Escape, unmount). Ignores the debounce lock
    /// but re-arms it so a stray toggle cannot immediately undo it.
    pub fn turn_off(&mut self, out: &mut Vec<IlluminationEvent>) {
        if !self.state.torch_active && !self.pending_uv.is_armed() {
            return;
        }
        self.torch_locked_until = self.clock.now_ms() + self.config.debounce_ms;
        self.set_torch(false, out);
    }

    /// Resolve the delayed UV activation. Call once per frame.
    pub fn update(&mut self, out: &mut Vec<IlluminationEvent>) {
        let now = self.clock.now_ms();
        if self.pending_uv.fire_if_due(now) && self.state.torch_active {
            self.set_uv(true, out);
        }
    }

    fn set_torch(&mut self, on: bool, out: &mut Vec<IlluminationEvent>) {
        if !on {
            self.pending_uv.cancel();
            if self.state.uv_mode {
                self.set_uv(false, out);
            }
        }
        if self.state.torch_active == on {
            return;
        }
        self.state.torch_active = on;
        log::debug!("[torch] torch_active={}", on);
        out.push(IlluminationEvent::TorchChanged(on));
        if on && !self.has_used {
            self.has_used = true;
            out.push(IlluminationEvent::FirstActivation);
        }
    }

    fn set_uv(&mut self, on: bool, out: &mut Vec<IlluminationEvent>) {
        if self.state.uv_mode == on || (on && !self.state.torch_active) {
            return;
        }
        self.state.uv_mode = on;
        log::debug!("[torch] uv_mode={}", on);
        out.push(IlluminationEvent::UvChanged(on));
    }
}
