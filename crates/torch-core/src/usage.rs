//! The one persisted bit: whether the torch has ever been switched on.

use std::cell::Cell;

pub const USAGE_KEY: &str = "torch-used";

pub trait UsageStore {
    /// Read once at mount. Unavailable storage reads as "never used".
    fn has_used(&self) -> bool;
    /// Written once on first activation; failures are swallowed.
    fn mark_used(&self);
}

/// In-memory store for hosts without persistent storage.
#[derive(Debug, Default)]
pub struct MemoryUsageStore {
    used: Cell<bool>,
    writes: Cell<u32>,
}

impl MemoryUsageStore {
    pub fn new(used: bool) -> Self {
        Self {
            used: Cell::new(used),
            writes: Cell::new(0),
        }
    }

    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl UsageStore for MemoryUsageStore {
    fn has_used(&self) -> bool {
        self.used.get()
    }

    fn mark_used(&self) {
        self.used.set(true);
        self.writes.set(self.writes.get() + 1);
    }
}
