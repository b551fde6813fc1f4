//! Runtime parameters with defaults drawn from [`crate::constants`].
//!
//! The web shell builds a [`TorchConfig::for_device`] at mount and then feeds
//! any `data-*` overrides found on the document root through
//! [`TorchConfig::apply_override`].

use crate::constants::*;
use crate::error::TorchError;
use crate::time::Millis;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceClass {
    #[default]
    Desktop,
    Touch,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IlluminationConfig {
    pub debounce_ms: Millis,
    pub uv_activation_delay_ms: Millis,
}

impl Default for IlluminationConfig {
    fn default() -> Self {
        Self {
            debounce_ms: TOGGLE_DEBOUNCE_MS,
            uv_activation_delay_ms: UV_ACTIVATION_DELAY_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollProfile {
    /// Dead zone height as a fraction of the viewport height.
    pub dead_zone: f32,
    /// Speed at the viewport edge, px per frame.
    pub max_speed: f32,
    pub min_speed: f32,
    pub arm_delay_ms: Millis,
    /// Touch devices only scroll while a finger is down.
    pub require_press: bool,
}

impl ScrollProfile {
    pub fn for_device(device: DeviceClass) -> Self {
        match device {
            DeviceClass::Desktop => Self {
                dead_zone: DEAD_ZONE_DESKTOP,
                max_speed: SCROLL_MAX_DESKTOP,
                min_speed: SCROLL_MIN_SPEED,
                arm_delay_ms: SCROLL_ARM_DELAY_MS,
                require_press: false,
            },
            DeviceClass::Touch => Self {
                dead_zone: DEAD_ZONE_TOUCH,
                max_speed: SCROLL_MAX_TOUCH,
                min_speed: SCROLL_MIN_SPEED,
                arm_delay_ms: SCROLL_ARM_DELAY_MS,
                require_press: true,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionConfig {
    pub settle_delay_ms: Millis,
    pub dispersion_count: usize,
    pub dispersion_duration_ms: Millis,
    pub seed: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: SETTLE_DELAY_MS,
            dispersion_count: DISPERSION_COUNT,
            dispersion_duration_ms: DISPERSION_DURATION_MS,
            seed: 0x7A3C_11F0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UvScanConfig {
    pub interval_ms: Millis,
    pub reveal_radius: f32,
}

impl Default for UvScanConfig {
    fn default() -> Self {
        Self {
            interval_ms: UV_SCAN_INTERVAL_MS,
            reveal_radius: UV_REVEAL_RADIUS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TorchConfig {
    pub device: DeviceClass,
    pub illumination: IlluminationConfig,
    pub scroll: ScrollProfile,
    pub ambient_count: usize,
    pub transition: TransitionConfig,
    pub uv: UvScanConfig,
    pub log_level: log::Level,
}

impl TorchConfig {
    pub fn for_device(device: DeviceClass) -> Self {
        Self {
            device,
            illumination: IlluminationConfig::default(),
            scroll: ScrollProfile::for_device(device),
            ambient_count: AMBIENT_COUNT,
            transition: TransitionConfig::default(),
            uv: UvScanConfig::default(),
            log_level: log::Level::Info,
        }
    }

    /// Apply one `data-*` style override (key without the `data-` prefix).
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), TorchError> {
        let value = value.trim();
        match key {
            "settle-delay" => self.transition.settle_delay_ms = parse_ms(key, value)?,
            "dispersion-ms" => self.transition.dispersion_duration_ms = parse_ms(key, value)?,
            "dispersion-count" => self.transition.dispersion_count = parse_count(key, value)?,
            "ambient-count" => self.ambient_count = parse_count(key, value)?,
            "log-level" => {
                self.log_level =
                    log::Level::from_str(value).map_err(|_| invalid(key, value))?;
            }
            _ => return Err(TorchError::UnknownConfigKey(key.to_string())),
        }
        Ok(())
    }
}

impl Default for TorchConfig {
    fn default() -> Self {
        Self::for_device(DeviceClass::Desktop)
    }
}

fn invalid(key: &str, value: &str) -> TorchError {
    TorchError::InvalidConfigValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_ms(key: &str, value: &str) -> Result<Millis, TorchError> {
    match value.parse::<f64>() {
        Ok(ms) if ms.is_finite() && ms >= 0.0 => Ok(ms),
        _ => Err(invalid(key, value)),
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, TorchError> {
    let n = value.parse::<usize>().map_err(|_| invalid(key, value))?;
    Ok(n.clamp(PARTICLE_COUNT_MIN, PARTICLE_COUNT_MAX))
}
