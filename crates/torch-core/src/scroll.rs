//! Edge-proximity scrolling while the torch is held.

use crate::config::ScrollProfile;
use crate::time::{Millis, Timer};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollIntent {
    /// Signed px per frame; negative scrolls up.
    pub speed: f32,
}

impl ScrollIntent {
    pub const NONE: Self = Self { speed: 0.0 };

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.speed == 0.0
    }
}

/// Vertical bounds `(top, bottom)` of the dead zone in viewport px.
pub fn dead_zone(viewport_h: f32, profile: &ScrollProfile) -> (f32, f32) {
    let h = viewport_h.max(0.0);
    let half = h * profile.dead_zone.clamp(0.0, 1.0) * 0.5;
    (h * 0.5 - half, h * 0.5 + half)
}

/// Linear edge mapping, before jitter suppression. Off-screen `y` is clamped.
pub fn scroll_speed(y: f32, viewport_h: f32, profile: &ScrollProfile) -> f32 {
    if viewport_h.is_nan() || viewport_h <= 0.0 || !y.is_finite() {
        return 0.0;
    }
    let y = y.clamp(0.0, viewport_h);
    let (top, bottom) = dead_zone(viewport_h, profile);
    if y < top {
        -profile.max_speed * (top - y) / top.max(f32::EPSILON)
    } else if y > bottom {
        profile.max_speed * (y - bottom) / (viewport_h - bottom).max(f32::EPSILON)
    } else {
        0.0
    }
}

/// Per-frame scroll command source. Idle until activated, then armed after
/// the profile's delay so switching the torch on does not jolt the page.
#[derive(Clone, Debug)]
pub struct ProximityScrollEngine {
    profile: ScrollProfile,
    active: bool,
    running: bool,
    arm: Timer,
}

impl ProximityScrollEngine {
    pub fn new(profile: ScrollProfile) -> Self {
        Self {
            profile,
            active: false,
            running: false,
            arm: Timer::default(),
        }
    }

    pub fn profile(&self) -> &ScrollProfile {
        &self.profile
    }

    /// Whether the current inputs should drive scrolling at all.
    pub fn wants_activation(&self, torch_active: bool, pressed: bool) -> bool {
        torch_active && (pressed || !self.profile.require_press)
    }

    pub fn set_active(&mut self, active: bool, now: Millis) {
        if active == self.active {
            return;
        }
        self.active = active;
        if active {
            self.arm.arm(now, self.profile.arm_delay_ms);
        } else {
            // Stay wherever the user scrolled to.
            self.arm.cancel();
            if self.running {
                log::debug!("[scroll] loop stopped");
            }
            self.running = false;
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frame(&mut self, now: Millis, pointer_y: f32, viewport_h: f32) -> ScrollIntent {
        if !self.active {
            return ScrollIntent::NONE;
        }
        if self.arm.fire_if_due(now) {
            self.running = true;
            log::debug!("[scroll] loop armed");
        }
        if !self.running {
            return ScrollIntent::NONE;
        }
        let speed = scroll_speed(pointer_y, viewport_h, &self.profile);
        if speed.abs() < self.profile.min_speed {
            ScrollIntent::NONE
        } else {
            ScrollIntent { speed }
        }
    }
}
