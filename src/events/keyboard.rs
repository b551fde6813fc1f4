use crate::app::Shared;
use torch_core::action_for_key;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, shared: &Shared) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || ev.repeat() || typing_in_field(ev) {
        return;
    }
    if let Some(action) = action_for_key(&ev.key()) {
        log::debug!("[keys] {:?}", action);
        shared.key_action(action);
    }
}

fn typing_in_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .is_some_and(|el| {
            matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
                || el.has_attribute("contenteditable")
        })
}

pub fn wire_global_keydown(shared: Shared) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &shared);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
