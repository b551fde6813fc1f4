use crate::app::Shared;
use torch_core::{PointerInput, TouchPoint};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_input_handlers(shared: &Shared) {
    wire_mouse(shared, "mousemove");
    wire_mouse(shared, "mousedown");
    wire_mouse(shared, "mouseup");
    wire_touch(shared, "touchstart");
    wire_touch(shared, "touchmove");
    wire_touch(shared, "touchend");
    wire_touch(shared, "touchcancel");
}

fn wire_mouse(shared: &Shared, event: &'static str) {
    let shared = shared.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
        let input = match event {
            "mousedown" => PointerInput::MouseDown { x, y },
            "mouseup" => PointerInput::MouseUp { x, y },
            _ => PointerInput::MouseMove { x, y },
        };
        shared.pointer.borrow_mut().apply(input);
        shared.refresh_mask();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_touch(shared: &Shared, event: &'static str) {
    let shared = shared.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        let touches = first_touch(&ev);
        let input = match event {
            "touchstart" => PointerInput::TouchStart { touches: &touches },
            "touchmove" => PointerInput::TouchMove { touches: &touches },
            _ => PointerInput::TouchEnd,
        };
        let update = shared.pointer.borrow_mut().apply(input);
        if update.prevent_default && ev.cancelable() {
            ev.prevent_default();
        }
        shared.refresh_mask();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        // Non-passive so touchmove may cancel page scrolling while the torch is on.
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(false);
        _ = wnd.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &opts,
        );
    }
    closure.forget();
}

/// Only the first touch point drives the torch.
fn first_touch(ev: &web::TouchEvent) -> Vec<TouchPoint> {
    ev.touches()
        .get(0)
        .map(|t| TouchPoint {
            x: t.client_x() as f32,
            y: t.client_y() as f32,
        })
        .into_iter()
        .collect()
}
