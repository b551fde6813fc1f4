// Host-side tests for edge-proximity scrolling.

use torch_core::*;

const H: f32 = 1000.0;

fn desktop() -> ScrollProfile {
    ScrollProfile::for_device(DeviceClass::Desktop)
}

#[test]
fn dead_zone_is_centered() {
    let (top, bottom) = dead_zone(H, &desktop());
    assert!((top - 350.0).abs() < 1e-3);
    assert!((bottom - 650.0).abs() < 1e-3);

    let touch = ScrollProfile::for_device(DeviceClass::Touch);
    let (top, bottom) = dead_zone(H, &touch);
    assert!((top - 325.0).abs() < 1e-3);
    assert!((bottom - 675.0).abs() < 1e-3);
}

#[test]
fn speed_is_zero_inside_dead_zone() {
    let profile = desktop();
    let mut y = 350.0;
    while y <= 650.0 {
        assert_eq!(scroll_speed(y, H, &profile), 0.0, "y = {}", y);
        y += 7.5;
    }
}

#[test]
fn speed_above_dead_zone_is_negative_and_grows_toward_top() {
    let profile = desktop();
    let mut prev = 0.0f32;
    let mut y = 349.0;
    while y >= 0.0 {
        let s = scroll_speed(y, H, &profile);
        assert!(s < 0.0, "y = {} gave {}", y, s);
        assert!(s < prev, "not strictly decreasing at y = {}", y);
        prev = s;
        y -= 1.0;
    }
    assert!((scroll_speed(0.0, H, &profile) + 10.0).abs() < 1e-4);
}

#[test]
fn speed_below_dead_zone_is_positive_and_reaches_max() {
    let profile = desktop();
    assert!(scroll_speed(651.0, H, &profile) > 0.0);
    assert!((scroll_speed(H, H, &profile) - 10.0).abs() < 1e-4);
    let touch = ScrollProfile::for_device(DeviceClass::Touch);
    assert!((scroll_speed(H, H, &touch) - 8.0).abs() < 1e-4);
}

#[test]
fn off_screen_pointer_is_clamped() {
    let profile = desktop();
    assert_eq!(scroll_speed(-500.0, H, &profile), scroll_speed(0.0, H, &profile));
    assert_eq!(scroll_speed(5000.0, H, &profile), scroll_speed(H, H, &profile));
    assert_eq!(scroll_speed(f32::NAN, H, &profile), 0.0);
    assert_eq!(scroll_speed(10.0, 0.0, &profile), 0.0);
}

#[test]
fn activation_requires_press_only_on_touch() {
    let desktop_engine = ProximityScrollEngine::new(desktop());
    assert!(desktop_engine.wants_activation(true, false));
    assert!(!desktop_engine.wants_activation(false, true));

    let touch_engine = ProximityScrollEngine::new(ScrollProfile::for_device(DeviceClass::Touch));
    assert!(!touch_engine.wants_activation(true, false));
    assert!(touch_engine.wants_activation(true, true));
}

#[test]
fn loop_starts_after_arm_delay() {
    let mut engine = ProximityScrollEngine::new(desktop());
    engine.set_active(true, 0.0);
    assert!(engine.frame(100.0, 0.0, H).is_idle());
    assert!(!engine.is_running());
    assert!(engine.frame(199.0, 0.0, H).is_idle());

    let intent = engine.frame(200.0, 0.0, H);
    assert!(engine.is_running());
    assert!((intent.speed + 10.0).abs() < 1e-4);
}

#[test]
fn tiny_speeds_are_suppressed() {
    let mut engine = ProximityScrollEngine::new(desktop());
    engine.set_active(true, 0.0);
    engine.frame(SCROLL_ARM_DELAY, 500.0, H);
    // Just outside the dead zone the raw speed is far below 0.8 px/frame.
    assert!(scroll_speed(345.0, H, &desktop()) < 0.0);
    assert!(engine.frame(SCROLL_ARM_DELAY + 16.0, 345.0, H).is_idle());
    assert!(!engine.frame(SCROLL_ARM_DELAY + 32.0, 100.0, H).is_idle());
}

#[test]
fn deactivation_cancels_and_requires_fresh_arm() {
    let mut engine = ProximityScrollEngine::new(desktop());
    engine.set_active(true, 0.0);
    engine.frame(250.0, 0.0, H);
    assert!(engine.is_running());

    engine.set_active(false, 300.0);
    assert!(!engine.is_running());
    assert!(engine.frame(310.0, 0.0, H).is_idle());

    engine.set_active(true, 400.0);
    assert!(engine.frame(500.0, 0.0, H).is_idle());
    assert!(!engine.frame(600.0, 0.0, H).is_idle());
}

#[test]
fn repeated_activation_does_not_rearm() {
    let mut engine = ProximityScrollEngine::new(desktop());
    engine.set_active(true, 0.0);
    engine.set_active(true, 150.0);
    assert!(!engine.frame(200.0, 0.0, H).is_idle());
}

const SCROLL_ARM_DELAY: f64 = torch_core::constants::SCROLL_ARM_DELAY_MS;
