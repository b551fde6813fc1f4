// Host-side tests for keyboard shortcut mapping.

use torch_core::*;

#[test]
fn shortcuts_map_to_actions() {
    assert_eq!(action_for_key("t"), Some(KeyAction::ToggleTorch));
    assert_eq!(action_for_key("T"), Some(KeyAction::ToggleTorch));
    assert_eq!(action_for_key("u"), Some(KeyAction::ToggleUv));
    assert_eq!(action_for_key("U"), Some(KeyAction::ToggleUv));
    assert_eq!(action_for_key("Escape"), Some(KeyAction::TorchOff));
}

#[test]
fn other_keys_are_ignored() {
    for key in ["", "x", "Enter", "esc", "tt", " "] {
        assert_eq!(action_for_key(key), None, "key {:?}", key);
    }
}

#[test]
fn escape_then_toggle_respects_debounce() {
    let clock = ManualClock::new();
    let mut ctrl = IlluminationController::new(clock.clone(), IlluminationConfig::default(), true);
    let mut out = Vec::new();
    ctrl.toggle_torch(&mut out);
    clock.advance(400.0);
    ctrl.turn_off(&mut out);
    assert_eq!(ctrl.state(), IlluminationState::OFF);
    clock.advance(100.0);
    assert_eq!(ctrl.toggle_torch(&mut out), ToggleOutcome::Debounced);
    clock.advance(200.0);
    assert_eq!(ctrl.toggle_torch(&mut out), ToggleOutcome::Applied);
}
