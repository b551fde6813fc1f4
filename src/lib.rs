#![cfg(target_arch = "wasm32")]
use crate::app::Shared;
use crate::constants::{TORCH_TOGGLE_ID, UV_TOGGLE_ID};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use torch_core::{InstantClock, KeyAction, TransitionFlag};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod config;
mod constants;
mod cue;
mod dom;
mod events;
mod frame;
mod render;
mod storage;

struct Mounted {
    shared: Shared,
    frame_loop: frame::LoopHandle,
    flag: TransitionFlag,
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

fn wire_resize(frame_ctx: &Rc<RefCell<frame::FrameContext>>) {
    let ctx = frame_ctx.clone();
    dom::on_window("resize", move |_ev| {
        let mut ctx = ctx.borrow_mut();
        ctx.resize();
        ctx.shared.refresh_mask();
    });
}

fn wire_toggle_buttons(shared: &Shared) {
    let torch = shared.clone();
    dom::add_click_listener(&shared.document, TORCH_TOGGLE_ID, move || {
        torch.key_action(KeyAction::ToggleTorch);
    });
    let uv = shared.clone();
    dom::add_click_listener(&shared.document, UV_TOGGLE_ID, move || {
        uv.key_action(KeyAction::ToggleUv);
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    let (config, config_errors) = config::load(&document);
    console_log::init_with_level(config.log_level).ok();
    log::info!("torchlight starting ({:?})", config.device);
    for e in config_errors {
        log::warn!("[config] {}", e);
    }

    spawn_local(async move {
        if let Err(e) = init(document, config) {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn init(document: web::Document, config: torch_core::TorchConfig) -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    if document.body().is_none() {
        return Err(anyhow::anyhow!("no body"));
    }

    let clock = InstantClock::new();
    let shared = Shared::new(document.clone(), config, clock.clone());
    if config::assets_ready_at_mount(&document) {
        shared.gate.open();
    }

    events::pointer::wire_input_handlers(&shared);
    events::keyboard::wire_global_keydown(shared.clone());
    events::route::wire_route_handlers(&shared);
    events::unlock::wire_first_interaction();
    wire_toggle_buttons(&shared);

    // Scroll, particles and the UV scan are driven by requestAnimationFrame
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(shared.clone(), clock)));
    wire_resize(&frame_ctx);
    let frame_loop = frame::start_loop(frame_ctx);

    let flag = shared.transition.borrow().flag();
    MOUNTED.with(|m| {
        *m.borrow_mut() = Some(Mounted {
            shared,
            frame_loop,
            flag,
        })
    });
    Ok(())
}

/// Tear down: torch off, masks removed, frame loop cancelled.
#[wasm_bindgen]
pub fn stop() {
    let Some(mounted) = MOUNTED.with(|m| m.borrow_mut().take()) else {
        return;
    };
    mounted.frame_loop.stop();
    mounted.shared.key_action(KeyAction::TorchOff);
    mounted.shared.masks.borrow_mut().remove();
    log::info!("torchlight stopped");
}

/// Whether a page transition is in progress, for collaborators that
/// suppress conflicting UI.
#[wasm_bindgen(js_name = isTransitioning)]
pub fn is_transitioning() -> bool {
    MOUNTED.with(|m| m.borrow().as_ref().is_some_and(|m| m.flag.is_active()))
}

/// Open the asset-readiness gate directly (alternative to the DOM event).
#[wasm_bindgen(js_name = assetsReady)]
pub fn assets_ready() {
    MOUNTED.with(|m| {
        if let Some(m) = m.borrow().as_ref() {
            m.shared.gate.open();
        }
    });
}
