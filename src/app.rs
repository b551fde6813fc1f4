use crate::constants::{EVENT_NAVIGATE, TORCH_ON_CLASS, TRANSITIONING_ATTR, UV_MODE_CLASS};
use crate::cue;
use crate::dom;
use crate::render::capture;
use crate::render::mask::MaskElements;
use crate::storage::LocalUsageStore;
use std::cell::RefCell;
use std::rc::Rc;
use torch_core::{
    DeviceClass, IlluminationController, IlluminationEvent, InstantClock, KeyAction,
    MaskRenderer, PointerTracker, ReadinessGate, TorchConfig, TransitionEvent,
    TransitionOrchestrator, UsageStore,
};
use wasm_bindgen::JsValue;
use web_sys as web;

/// Handles shared between event listeners and the frame loop. Each component
/// has exactly one `RefCell`; borrows never outlive a single call.
#[derive(Clone)]
pub struct Shared {
    pub document: web::Document,
    pub config: Rc<TorchConfig>,
    pub pointer: Rc<RefCell<PointerTracker>>,
    pub illumination: Rc<RefCell<IlluminationController<InstantClock>>>,
    pub mask_renderer: Rc<RefCell<MaskRenderer>>,
    pub masks: Rc<RefCell<MaskElements>>,
    pub transition: Rc<RefCell<TransitionOrchestrator<InstantClock>>>,
    pub gate: ReadinessGate,
    pub usage: Rc<LocalUsageStore>,
}

impl Shared {
    pub fn new(document: web::Document, config: TorchConfig, clock: InstantClock) -> Self {
        let usage = Rc::new(LocalUsageStore);
        let has_used = usage.has_used();
        let gate = ReadinessGate::new();
        let [vw, vh] = dom::viewport_size();
        Self {
            illumination: Rc::new(RefCell::new(IlluminationController::new(
                clock.clone(),
                config.illumination.clone(),
                has_used,
            ))),
            mask_renderer: Rc::new(RefCell::new(MaskRenderer::new(config.device, vw, vh))),
            transition: Rc::new(RefCell::new(TransitionOrchestrator::new(
                clock,
                config.transition.clone(),
                gate.clone(),
            ))),
            pointer: Rc::new(RefCell::new(PointerTracker::new())),
            masks: Rc::new(RefCell::new(MaskElements::default())),
            config: Rc::new(config),
            document,
            gate,
            usage,
        }
    }

    pub fn key_action(&self, action: KeyAction) {
        let mut events = Vec::new();
        {
            let mut illum = self.illumination.borrow_mut();
            match action {
                KeyAction::ToggleTorch => {
                    illum.toggle_torch(&mut events);
                }
                KeyAction::ToggleUv => {
                    illum.toggle_uv(&mut events);
                }
                KeyAction::TorchOff => illum.turn_off(&mut events),
            }
        }
        self.apply_illumination(&events);
    }

    pub fn apply_illumination(&self, events: &[IlluminationEvent]) {
        for ev in events {
            match *ev {
                IlluminationEvent::TorchChanged(on) => {
                    log::info!("[torch] {}", if on { "on" } else { "off" });
                    dom::set_root_class(&self.document, TORCH_ON_CLASS, on);
                    self.pointer.borrow_mut().set_suppress_touch_scroll(on);
                    if self.config.device == DeviceClass::Touch {
                        cue::vibrate();
                    }
                }
                IlluminationEvent::UvChanged(on) => {
                    log::info!("[uv] {}", if on { "on" } else { "off" });
                    dom::set_root_class(&self.document, UV_MODE_CLASS, on);
                    cue::uv_cue(on);
                }
                IlluminationEvent::FirstActivation => self.usage.mark_used(),
            }
        }
        if !events.is_empty() {
            self.refresh_mask();
        }
    }

    /// Recompute and apply mask geometry from the current snapshots.
    pub fn refresh_mask(&self) {
        let pointer = self.pointer.borrow().state();
        let illum = self.illumination.borrow().state();
        let frame = self.mask_renderer.borrow_mut().compute(&pointer, &illum);
        if let Err(e) = self.masks.borrow_mut().apply(&self.document, frame) {
            log::warn!("[torch] mask update failed: {:?}", e);
        }
    }

    pub fn request_transition(&self, to: &str) {
        let from = current_path();
        let seeding = capture::dispersion_seeding(&self.document);
        let mut events = Vec::new();
        let accepted = self.transition.borrow_mut().request(
            &from,
            to,
            seeding,
            dom::viewport_size(),
            &mut events,
        );
        if accepted {
            self.apply_transition(&events);
        }
    }

    pub fn route_changed(&self, to: &str) {
        let mut events = Vec::new();
        self.transition
            .borrow_mut()
            .on_route_changed(to, &mut events);
        self.apply_transition(&events);
    }

    pub fn back_forward(&self, to: &str) {
        let mut events = Vec::new();
        self.transition
            .borrow_mut()
            .on_back_forward(to, &mut events);
        self.apply_transition(&events);
    }

    pub fn apply_transition(&self, events: &[TransitionEvent]) {
        for ev in events {
            match ev {
                TransitionEvent::Started { .. } => {
                    dom::set_root_attr(&self.document, TRANSITIONING_ATTR, Some("1"));
                }
                TransitionEvent::Superseded { dropped } => {
                    log::debug!("[transition] dropped target {}", dropped);
                }
                TransitionEvent::Commit { to } => commit_navigation(to),
                TransitionEvent::Finished { .. } | TransitionEvent::Aborted => {
                    dom::set_root_attr(&self.document, TRANSITIONING_ATTR, None);
                }
            }
        }
    }
}

pub fn current_path() -> String {
    web::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Push the new URL and hand rendering to the router collaborator.
fn commit_navigation(to: &str) {
    if let Some(w) = web::window() {
        if let Ok(history) = w.history() {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(to)) {
                log::warn!("[transition] pushState failed: {:?}", e);
            }
        }
    }
    dom::dispatch(EVENT_NAVIGATE, to);
}
