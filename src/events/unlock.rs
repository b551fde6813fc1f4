use crate::constants::EVENT_UNLOCKED;
use crate::dom;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const UNLOCK_EVENTS: [&str; 4] = ["click", "touchstart", "keydown", "scroll"];

/// Publish `torch:unlocked` on the first user interaction so collaborators can
/// start autoplay-gated media. Each listener is registered with `once`.
pub fn wire_first_interaction() {
    let Some(window) = web::window() else {
        return;
    };
    let fired = Rc::new(Cell::new(false));
    for name in UNLOCK_EVENTS {
        let fired = fired.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            if !fired.replace(true) {
                log::debug!("[unlock] first interaction via {}", name);
                dom::dispatch(EVENT_UNLOCKED, name);
            }
        }) as Box<dyn FnMut(_)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_once(true);
        opts.set_passive(true);
        _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            closure.as_ref().unchecked_ref(),
            &opts,
        );
        closure.forget();
    }
}
