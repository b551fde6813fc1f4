//! Throttled proximity scan for UV-hidden page elements.

use crate::config::UvScanConfig;
use crate::time::{Clock, Millis};
use fnv::FnvHashSet;
use glam::Vec2;
use smallvec::SmallVec;

/// Identifies one UV-hidden element; the host maps it back to the DOM node.
pub type UvTargetId = u32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvTarget {
    pub id: UvTargetId,
    /// Element center in viewport px, measured at scan time.
    pub center: Vec2,
}

/// Visibility changes produced by one scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UvDiff {
    pub show: SmallVec<[UvTargetId; 8]>,
    pub hide: SmallVec<[UvTargetId; 8]>,
}

impl UvDiff {
    pub fn is_empty(&self) -> bool {
        self.show.is_empty() && self.hide.is_empty()
    }
}

pub struct UvProximityBatcher<C: Clock> {
    clock: C,
    config: UvScanConfig,
    visible: FnvHashSet<UvTargetId>,
    last_scan: Millis,
}

impl<C: Clock> UvProximityBatcher<C> {
    pub fn new(clock: C, config: UvScanConfig) -> Self {
        Self {
            clock,
            config,
            visible: FnvHashSet::default(),
            last_scan: f64::NEG_INFINITY,
        }
    }

    /// Whether a scan would run now; lets the host skip measuring the DOM.
    pub fn is_due(&self) -> bool {
        self.clock.now_ms() - self.last_scan >= self.config.interval_ms
    }

    pub fn is_visible(&self, id: UvTargetId) -> bool {
        self.visible.contains(&id)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Returns `None` when throttled. Targets missing from `targets` are
    /// treated as gone and hidden.
    pub fn scan(&mut self, pointer: Vec2, uv_mode: bool, targets: &[UvTarget]) -> Option<UvDiff> {
        if !uv_mode {
            let diff = self.clear();
            return (!diff.is_empty()).then_some(diff);
        }
        if !self.is_due() {
            return None;
        }
        self.last_scan = self.clock.now_ms();

        let radius_sq = self.config.reveal_radius * self.config.reveal_radius;
        let mut diff = UvDiff::default();
        let mut seen = FnvHashSet::default();
        for t in targets {
            seen.insert(t.id);
            let near = pointer.is_finite() && t.center.distance_squared(pointer) <= radius_sq;
            match (near, self.visible.contains(&t.id)) {
                (true, false) => {
                    self.visible.insert(t.id);
                    diff.show.push(t.id);
                }
                (false, true) => {
                    self.visible.remove(&t.id);
                    diff.hide.push(t.id);
                }
                _ => {}
            }
        }
        let gone: SmallVec<[UvTargetId; 8]> = self
            .visible
            .iter()
            .copied()
            .filter(|id| !seen.contains(id))
            .collect();
        for id in gone {
            self.visible.remove(&id);
            diff.hide.push(id);
        }
        if !diff.is_empty() {
            log::debug!("[uv] show={} hide={}", diff.show.len(), diff.hide.len());
        }
        Some(diff)
    }

    /// Hide everything at once, e.g. when UV mode ends.
    pub fn clear(&mut self) -> UvDiff {
        let mut diff = UvDiff::default();
        diff.hide.extend(self.visible.drain());
        diff.hide.sort_unstable();
        self.last_scan = f64::NEG_INFINITY;
        diff
    }
}
