/// Keyboard shortcuts understood by the torch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleTorch,
    ToggleUv,
    TorchOff,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "t" | "T" => Some(KeyAction::ToggleTorch),
        "u" | "U" => Some(KeyAction::ToggleUv),
        "Escape" => Some(KeyAction::TorchOff),
        _ => None,
    }
}
