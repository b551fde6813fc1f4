use crate::constants::{ASSETS_READY_ATTR, CONFIG_KEYS};
use crate::dom;
use torch_core::{DeviceClass, TorchConfig, TorchError};
use wasm_bindgen::JsValue;
use web_sys as web;

pub fn detect_device() -> DeviceClass {
    let Some(w) = web::window() else {
        return DeviceClass::Desktop;
    };
    let touch_points = w.navigator().max_touch_points();
    let has_touch_events =
        js_sys::Reflect::has(&w, &JsValue::from_str("ontouchstart")).unwrap_or(false);
    if touch_points > 0 || has_touch_events {
        DeviceClass::Touch
    } else {
        DeviceClass::Desktop
    }
}

/// Defaults for the detected device plus `data-*` overrides on `<html>`.
/// Bad overrides are returned so they can be logged once logging is up.
pub fn load(document: &web::Document) -> (TorchConfig, Vec<TorchError>) {
    let mut config = TorchConfig::for_device(detect_device());
    let mut errors = Vec::new();
    if let Some(root) = dom::root_element(document) {
        for key in CONFIG_KEYS {
            if let Some(value) = root.get_attribute(&format!("data-{}", key)) {
                if let Err(e) = config.apply_override(key, &value) {
                    errors.push(e);
                }
            }
        }
    }
    (config, errors)
}

pub fn assets_ready_at_mount(document: &web::Document) -> bool {
    dom::root_element(document).is_some_and(|r| r.has_attribute(ASSETS_READY_ATTR))
}
