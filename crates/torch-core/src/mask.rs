//! Reveal-mask geometry for the torch and its secondary spot.
//!
//! Geometry is recomputed synchronously on every pointer change; the host
//! only writes the resulting style strings, compositing does the rest.

use crate::config::DeviceClass;
use crate::constants::*;
use crate::illumination::IlluminationState;
use crate::pointer::PointerState;

/// Full-viewport darkening layer with an elliptical cutout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TorchLayer {
    pub center: [f32; 2],
    pub radius_x: f32,
    pub radius_y: f32,
    pub opacity: f32,
}

/// Small high-contrast falloff mask, positioned like the torch layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLayer {
    pub center: [f32; 2],
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskFrame {
    pub torch: TorchLayer,
    pub spot: SpotLayer,
}

impl TorchLayer {
    pub fn to_css(&self) -> String {
        format!(
            "radial-gradient(ellipse {:.1}px {:.1}px at {:.1}px {:.1}px, rgba(0,0,0,0) 0%, rgba(0,0,0,0) 30%, rgba(0,0,0,{:.3}) 100%)",
            self.radius_x, self.radius_y, self.center[0], self.center[1], self.opacity
        )
    }
}

impl SpotLayer {
    pub fn to_css(&self) -> String {
        format!(
            "radial-gradient(circle {:.1}px at {:.1}px {:.1}px, rgba(0,0,0,1) 0%, rgba(0,0,0,1) 55%, rgba(0,0,0,0) 100%)",
            self.radius, self.center[0], self.center[1]
        )
    }
}

#[derive(Clone, Debug)]
pub struct MaskRenderer {
    device: DeviceClass,
    viewport: [f32; 2],
    last: Option<MaskFrame>,
}

impl MaskRenderer {
    pub fn new(device: DeviceClass, viewport_w: f32, viewport_h: f32) -> Self {
        Self {
            device,
            viewport: [viewport_w.max(1.0), viewport_h.max(1.0)],
            last: None,
        }
    }

    pub fn set_viewport(&mut self, w: f32, h: f32) {
        self.viewport = [w.max(1.0), h.max(1.0)];
    }

    pub fn last(&self) -> Option<MaskFrame> {
        self.last
    }

    /// `None` means the torch is off and no mask elements should exist.
    pub fn compute(
        &mut self,
        pointer: &PointerState,
        illumination: &IlluminationState,
    ) -> Option<MaskFrame> {
        self.last = if illumination.torch_active {
            Some(mask_frame(
                pointer,
                illumination.uv_mode,
                self.device,
                self.viewport,
            ))
        } else {
            None
        };
        self.last
    }
}

pub fn mask_frame(
    pointer: &PointerState,
    uv_mode: bool,
    device: DeviceClass,
    viewport: [f32; 2],
) -> MaskFrame {
    let center = [pointer.x, pointer.y];
    // Beam lengthens as the pointer moves down the viewport.
    let v = (pointer.y / viewport[1].max(1.0)).clamp(0.0, 1.0);
    let long_scale = TORCH_RADIUS_Y_MIN_SCALE + (1.0 - TORCH_RADIUS_Y_MIN_SCALE) * v;
    let opacity = if uv_mode {
        TORCH_DARKNESS_UV
    } else {
        TORCH_DARKNESS
    };
    let spot_radius = match device {
        DeviceClass::Desktop => SPOT_RADIUS_DESKTOP,
        DeviceClass::Touch => SPOT_RADIUS_TOUCH,
    };
    MaskFrame {
        torch: TorchLayer {
            center,
            radius_x: TORCH_RADIUS_X,
            radius_y: TORCH_RADIUS_Y * long_scale,
            opacity,
        },
        spot: SpotLayer {
            center,
            radius: spot_radius,
        },
    }
}
