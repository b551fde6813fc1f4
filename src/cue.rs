use crate::constants::{EVENT_CUE, VIBRATE_MS};
use crate::dom;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Ask the page's sound collaborator for the UV cue. Fired once per change.
pub fn uv_cue(on: bool) {
    dom::dispatch(EVENT_CUE, if on { "uv-on" } else { "uv-off" });
}

/// Short haptic tick on devices that support it; silently skipped elsewhere.
pub fn vibrate() {
    let Some(nav) = web::window().map(|w| w.navigator()) else {
        return;
    };
    // Calling a missing `vibrate` would throw across the wasm boundary.
    if !js_sys::Reflect::has(&nav, &JsValue::from_str("vibrate")).unwrap_or(false) {
        return;
    }
    _ = nav.vibrate_with_duration(VIBRATE_MS);
}
