use crate::app::{current_path, Shared};
use crate::constants::{EVENT_ASSETS_READY, EVENT_ROUTE_CHANGED};
use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Intercept internal link activations and feed router notifications back.
pub fn wire_route_handlers(shared: &Shared) {
    wire_link_clicks(shared);

    let popstate = shared.clone();
    dom::on_window("popstate", move |_ev| {
        popstate.back_forward(&current_path());
    });

    let routed = shared.clone();
    dom::on_window(EVENT_ROUTE_CHANGED, move |ev| {
        let path = ev
            .dyn_ref::<web::CustomEvent>()
            .and_then(|c| c.detail().as_string())
            .unwrap_or_else(current_path);
        routed.route_changed(&path);
    });

    let gate = shared.gate.clone();
    dom::on_window(EVENT_ASSETS_READY, move |_ev| {
        log::info!("[assets] ready");
        gate.open();
    });
}

fn wire_link_clicks(shared: &Shared) {
    let shared = shared.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if let Some(to) = internal_link_target(&ev) {
            ev.prevent_default();
            shared.request_transition(&to);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(document) = dom::window_document() {
        _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Same-origin, same-tab, unmodified primary clicks on `<a href="/...">`.
fn internal_link_target(ev: &web::MouseEvent) -> Option<String> {
    if ev.default_prevented()
        || ev.button() != 0
        || ev.ctrl_key()
        || ev.meta_key()
        || ev.shift_key()
        || ev.alt_key()
    {
        return None;
    }
    let target: web::Element = ev.target()?.dyn_into().ok()?;
    let anchor = target.closest("a[href]").ok()??;
    if anchor.has_attribute("download") || anchor.has_attribute("data-no-transition") {
        return None;
    }
    if anchor
        .get_attribute("target")
        .is_some_and(|t| !t.is_empty() && t != "_self")
    {
        return None;
    }
    let href = anchor.get_attribute("href")?;
    let internal = href.starts_with('/') && !href.starts_with("//");
    (internal && href != current_path()).then_some(href)
}
