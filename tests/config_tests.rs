// Host-side tests for runtime configuration and data-attribute overrides.

use torch_core::constants::*;
use torch_core::*;

#[test]
fn device_profiles_differ_where_expected() {
    let desktop = TorchConfig::for_device(DeviceClass::Desktop);
    let touch = TorchConfig::for_device(DeviceClass::Touch);
    assert_eq!(desktop, TorchConfig::default());
    assert!(!desktop.scroll.require_press);
    assert!(touch.scroll.require_press);
    assert!(touch.scroll.dead_zone > desktop.scroll.dead_zone);
    assert!(touch.scroll.max_speed < desktop.scroll.max_speed);
    assert_eq!(desktop.illumination, touch.illumination);
    assert_eq!(desktop.transition, touch.transition);
}

#[test]
fn defaults_match_constants() {
    let c = TorchConfig::default();
    assert_eq!(c.illumination.debounce_ms, TOGGLE_DEBOUNCE_MS);
    assert_eq!(c.transition.settle_delay_ms, SETTLE_DELAY_MS);
    assert_eq!(c.transition.dispersion_count, DISPERSION_COUNT);
    assert_eq!(c.ambient_count, AMBIENT_COUNT);
    assert_eq!(c.uv.interval_ms, UV_SCAN_INTERVAL_MS);
    assert_eq!(c.log_level, log::Level::Info);
}

#[test]
fn overrides_apply() {
    let mut c = TorchConfig::default();
    c.apply_override("settle-delay", "250").expect("valid");
    c.apply_override("dispersion-ms", " 900.5 ").expect("valid");
    c.apply_override("dispersion-count", "400").expect("valid");
    c.apply_override("ambient-count", "120").expect("valid");
    c.apply_override("log-level", "debug").expect("valid");
    assert_eq!(c.transition.settle_delay_ms, 250.0);
    assert_eq!(c.transition.dispersion_duration_ms, 900.5);
    assert_eq!(c.transition.dispersion_count, 400);
    assert_eq!(c.ambient_count, 120);
    assert_eq!(c.log_level, log::Level::Debug);
}

#[test]
fn counts_are_clamped_to_pool_bounds() {
    let mut c = TorchConfig::default();
    c.apply_override("ambient-count", "3").expect("valid");
    assert_eq!(c.ambient_count, PARTICLE_COUNT_MIN);
    c.apply_override("dispersion-count", "99999").expect("valid");
    assert_eq!(c.transition.dispersion_count, PARTICLE_COUNT_MAX);
}

#[test]
fn bad_values_are_rejected_and_leave_config_untouched() {
    let mut c = TorchConfig::default();
    for (key, value) in [
        ("settle-delay", "-5"),
        ("settle-delay", "soon"),
        ("dispersion-ms", "inf"),
        ("ambient-count", "-1"),
        ("log-level", "loud"),
    ] {
        assert_eq!(
            c.apply_override(key, value),
            Err(TorchError::InvalidConfigValue {
                key: key.to_string(),
                value: value.to_string()
            })
        );
    }
    assert_eq!(c, TorchConfig::default());
}

#[test]
fn unknown_keys_are_reported() {
    let mut c = TorchConfig::default();
    let err = c.apply_override("beam-width", "3").unwrap_err();
    assert_eq!(err, TorchError::UnknownConfigKey("beam-width".to_string()));
    assert_eq!(err.to_string(), "unknown config key `beam-width`");
}
