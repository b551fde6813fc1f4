//! Process-wide boolean signals with explicit ownership.
//!
//! The writer half is handed to exactly one owner; any number of readers can
//! observe the value.

use std::cell::Cell;
use std::rc::Rc;

/// Read side of the "transition in progress" flag.
#[derive(Clone, Debug, Default)]
pub struct TransitionFlag {
    inner: Rc<Cell<bool>>,
}

/// Write side of the "transition in progress" flag, owned by the orchestrator.
#[derive(Debug)]
pub struct TransitionFlagWriter {
    inner: Rc<Cell<bool>>,
}

impl TransitionFlag {
    pub fn new() -> (TransitionFlagWriter, TransitionFlag) {
        let inner = Rc::new(Cell::new(false));
        (
            TransitionFlagWriter {
                inner: inner.clone(),
            },
            TransitionFlag { inner },
        )
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.inner.get()
    }
}

impl TransitionFlagWriter {
    pub fn set(&self, active: bool) {
        self.inner.set(active);
    }

    pub fn reader(&self) -> TransitionFlag {
        TransitionFlag {
            inner: self.inner.clone(),
        }
    }
}

/// Opened once by the asset-preloading collaborator; never closes again.
#[derive(Clone, Debug, Default)]
pub struct ReadinessGate {
    open: Rc<Cell<bool>>,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) {
        if !self.open.replace(true) {
            log::debug!("[assets] readiness gate opened");
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open.get()
    }
}
