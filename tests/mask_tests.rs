// Host-side tests for reveal-mask geometry.

use torch_core::constants::*;
use torch_core::*;

fn pointer_at(x: f32, y: f32) -> PointerState {
    PointerState {
        x,
        y,
        ..PointerState::default()
    }
}

const TORCH_ONLY: IlluminationState = IlluminationState {
    torch_active: true,
    uv_mode: false,
};

const TORCH_UV: IlluminationState = IlluminationState {
    torch_active: true,
    uv_mode: true,
};

#[test]
fn nothing_rendered_while_torch_off() {
    let mut renderer = MaskRenderer::new(DeviceClass::Desktop, 1280.0, 800.0);
    assert!(renderer
        .compute(&pointer_at(10.0, 10.0), &IlluminationState::OFF)
        .is_none());
    assert!(renderer.last().is_none());
}

#[test]
fn both_layers_follow_the_pointer() {
    let mut renderer = MaskRenderer::new(DeviceClass::Desktop, 1280.0, 800.0);
    let frame = renderer
        .compute(&pointer_at(400.0, 300.0), &TORCH_ONLY)
        .expect("torch on");
    assert_eq!(frame.torch.center, [400.0, 300.0]);
    assert_eq!(frame.spot.center, [400.0, 300.0]);
    assert_eq!(frame.torch.radius_x, TORCH_RADIUS_X);
    assert_eq!(frame.spot.radius, SPOT_RADIUS_DESKTOP);
    assert_eq!(renderer.last(), Some(frame));
}

#[test]
fn touch_uses_smaller_spot() {
    let frame = mask_frame(&pointer_at(0.0, 0.0), false, DeviceClass::Touch, [400.0, 800.0]);
    assert_eq!(frame.spot.radius, SPOT_RADIUS_TOUCH);
}

#[test]
fn long_axis_scales_with_vertical_position() {
    let vp = [1000.0, 1000.0];
    let top = mask_frame(&pointer_at(0.0, 0.0), false, DeviceClass::Desktop, vp);
    let mid = mask_frame(&pointer_at(0.0, 500.0), false, DeviceClass::Desktop, vp);
    let bottom = mask_frame(&pointer_at(0.0, 1000.0), false, DeviceClass::Desktop, vp);
    assert!((top.torch.radius_y - TORCH_RADIUS_Y * TORCH_RADIUS_Y_MIN_SCALE).abs() < 1e-3);
    assert!(top.torch.radius_y < mid.torch.radius_y);
    assert!(mid.torch.radius_y < bottom.torch.radius_y);
    assert!((bottom.torch.radius_y - TORCH_RADIUS_Y).abs() < 1e-3);

    // Off-screen positions do not stretch the beam further.
    let below = mask_frame(&pointer_at(0.0, 4000.0), false, DeviceClass::Desktop, vp);
    assert_eq!(below.torch.radius_y, bottom.torch.radius_y);
}

#[test]
fn uv_reduces_but_keeps_darkness() {
    let vp = [1000.0, 1000.0];
    let plain = mask_frame(&pointer_at(1.0, 1.0), false, DeviceClass::Desktop, vp);
    let uv = mask_frame(&pointer_at(1.0, 1.0), true, DeviceClass::Desktop, vp);
    assert!(uv.torch.opacity < plain.torch.opacity);
    assert!(uv.torch.opacity > 0.0);
}

#[test]
fn mode_change_recomputes_opacity() {
    let mut renderer = MaskRenderer::new(DeviceClass::Desktop, 1000.0, 1000.0);
    let p = pointer_at(5.0, 5.0);
    let a = renderer.compute(&p, &TORCH_ONLY).map(|f| f.torch.opacity);
    let b = renderer.compute(&p, &TORCH_UV).map(|f| f.torch.opacity);
    assert_eq!(a, Some(TORCH_DARKNESS));
    assert_eq!(b, Some(TORCH_DARKNESS_UV));
}

#[test]
fn css_carries_geometry() {
    let frame = mask_frame(&pointer_at(12.0, 34.0), false, DeviceClass::Desktop, [100.0, 100.0]);
    let torch = frame.torch.to_css();
    assert!(torch.starts_with("radial-gradient(ellipse 350.0px"));
    assert!(torch.contains("at 12.0px 34.0px"));
    assert!(torch.contains("0.920"));
    let spot = frame.spot.to_css();
    assert!(spot.starts_with("radial-gradient(circle 300.0px at 12.0px 34.0px"));
}

#[test]
fn degenerate_viewport_is_clamped() {
    let mut renderer = MaskRenderer::new(DeviceClass::Desktop, 0.0, 0.0);
    renderer.set_viewport(-5.0, 0.0);
    let frame = renderer.compute(&pointer_at(0.5, 0.5), &TORCH_ONLY);
    assert!(frame.is_some_and(|f| f.torch.radius_y.is_finite()));
}
