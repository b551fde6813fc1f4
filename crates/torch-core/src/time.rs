//! Injected time source and deadline helpers.
//!
//! Every debounce and delay window in the core is a deadline compared against
//! a [`Clock`] rather than a platform timer, so tests can drive time by hand.

use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

/// Milliseconds on a monotonic timeline.
pub type Millis = f64;

pub trait Clock {
    fn now_ms(&self) -> Millis;
}

/// Wall clock backed by `instant`, which maps to `performance.now()` on wasm.
#[derive(Clone, Debug)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock. Clones share the same timeline.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: Millis) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

/// One-shot deadline. Disarmed until [`Timer::arm`], fires once.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Timer {
    due: Option<Millis>,
}

impl Timer {
    pub fn arm(&mut self, now: Millis, delay: Millis) {
        self.due = Some(now + delay.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn fire_if_due(&mut self, now: Millis) -> bool {
        match self.due {
            Some(t) if now >= t => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
