use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn root_element(document: &web::Document) -> Option<web::Element> {
    document.document_element()
}

pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    match document.get_element_by_id(element_id) {
        Some(el) => {
            let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
            _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        None => log::debug!("[dom] no #{} to wire", element_id),
    }
}

/// Viewport size in CSS px.
pub fn viewport_size() -> [f32; 2] {
    let Some(w) = web::window() else {
        return [1.0, 1.0];
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    [width as f32, height as f32]
}

pub fn scroll_y() -> f32 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0) as f32
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn set_root_class(document: &web::Document, class: &str, on: bool) {
    if let Some(root) = root_element(document) {
        _ = root.class_list().toggle_with_force(class, on);
    }
}

pub fn set_root_attr(document: &web::Document, name: &str, value: Option<&str>) {
    if let Some(root) = root_element(document) {
        match value {
            Some(v) => {
                _ = root.set_attribute(name, v);
            }
            None => {
                _ = root.remove_attribute(name);
            }
        }
    }
}

/// Fire a `CustomEvent` on the window with a string detail.
pub fn dispatch(name: &str, detail: &str) {
    let Some(w) = web::window() else {
        return;
    };
    let init = web::CustomEventInit::new();
    init.set_detail(&JsValue::from_str(detail));
    match web::CustomEvent::new_with_event_init_dict(name, &init) {
        Ok(ev) => {
            _ = w.dispatch_event(&ev);
        }
        Err(e) => log::warn!("[dom] could not create {}: {:?}", name, e),
    }
}

/// Add a window listener that lives for the page lifetime.
pub fn on_window(event: &str, handler: impl FnMut(web::Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
