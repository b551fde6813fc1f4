use crate::app::Shared;
use crate::constants::{AMBIENT_SEED, UV_HIDDEN_SELECTOR};
use crate::dom;
use crate::render::mask::apply_uv_diff;
use crate::render::ParticleSurface;
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use torch_core::{
    Clock, FrameInput, InstantClock, PointerState, ProximityScrollEngine, Seeding, Simulation,
    SimulationConfig, UvProximityBatcher, UvTarget,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub shared: Shared,
    pub clock: InstantClock,
    pub scroll: ProximityScrollEngine,
    pub uv: UvProximityBatcher<InstantClock>,
    pub uv_elements: Vec<web::Element>,

    pub ambient_surface: Option<ParticleSurface>,
    pub ambient: Option<Simulation>,
    pub transition_surface: Option<ParticleSurface>,
    pub transition_painted: bool,

    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(shared: Shared, clock: InstantClock) -> Self {
        let load_surface = |id: &str| match ParticleSurface::from_id(&shared.document, id) {
            Ok(s) => Some(s),
            Err(e) => {
                log::warn!("[particles] {}", e);
                None
            }
        };
        let ambient_surface = load_surface(crate::constants::AMBIENT_CANVAS_ID);
        let transition_surface = load_surface(crate::constants::TRANSITION_CANVAS_ID);
        Self {
            scroll: ProximityScrollEngine::new(shared.config.scroll.clone()),
            uv: UvProximityBatcher::new(clock.clone(), shared.config.uv.clone()),
            uv_elements: Vec::new(),
            ambient_surface,
            ambient: None,
            transition_surface,
            transition_painted: false,
            last_instant: Instant::now(),
            clock,
            shared,
        }
    }

    pub fn frame(&mut self) {
        let now_instant = Instant::now();
        let dt_ms = (now_instant - self.last_instant).as_secs_f32() * 1000.0;
        self.last_instant = now_instant;

        // One snapshot per frame: every reader below sees the same pointer.
        let pointer = self.shared.pointer.borrow().state();
        let input = FrameInput {
            pointer: Some(pointer.position()),
            scroll_y: dom::scroll_y(),
        };

        let mut illum_events = Vec::new();
        self.shared
            .illumination
            .borrow_mut()
            .update(&mut illum_events);
        self.shared.apply_illumination(&illum_events);

        if let Err(e) = self.step_scroll(&pointer) {
            log::warn!("[scroll] {:?}", e);
        }
        if let Err(e) = self.step_ambient(dt_ms, &input) {
            log::warn!("[particles] {:?}", e);
        }
        if let Err(e) = self.step_transition(dt_ms, &input) {
            log::warn!("[transition] {:?}", e);
        }
        self.step_uv(&pointer);
    }

    fn step_scroll(&mut self, pointer: &PointerState) -> anyhow::Result<()> {
        let torch_active = self.shared.illumination.borrow().state().torch_active;
        let now = self.clock.now_ms();
        let active = self.scroll.wants_activation(torch_active, pointer.pressed);
        self.scroll.set_active(active, now);
        let [_, vh] = dom::viewport_size();
        let intent = self.scroll.frame(now, pointer.y, vh);
        if !intent.is_idle() {
            let w = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
            w.scroll_by_with_x_and_y(0.0, intent.speed as f64);
        }
        Ok(())
    }

    fn step_ambient(&mut self, dt_ms: f32, input: &FrameInput) -> anyhow::Result<()> {
        let Some(surface) = &self.ambient_surface else {
            return Ok(());
        };
        if self.ambient.is_none() {
            if !self.shared.gate.is_open() {
                return Ok(());
            }
            let config = SimulationConfig::ambient(self.shared.config.ambient_count, AMBIENT_SEED);
            self.ambient = Some(Simulation::new(config, surface.css_size(), Seeding::Uniform));
            log::info!("[particles] ambient started");
        }
        if let Some(sim) = self.ambient.as_mut() {
            sim.step(dt_ms, input);
            surface.paint(&sim.sprites())?;
        }
        Ok(())
    }

    fn step_transition(&mut self, dt_ms: f32, input: &FrameInput) -> anyhow::Result<()> {
        let mut events = Vec::new();
        self.shared
            .transition
            .borrow_mut()
            .frame(dt_ms, input, &mut events);
        self.shared.apply_transition(&events);

        let Some(surface) = &self.transition_surface else {
            return Ok(());
        };
        let orchestrator = self.shared.transition.borrow();
        match orchestrator.simulation() {
            Some(sim) => {
                surface.paint(&sim.sprites())?;
                self.transition_painted = true;
            }
            None if self.transition_painted => {
                surface.clear();
                self.transition_painted = false;
            }
            None => {}
        }
        Ok(())
    }

    fn step_uv(&mut self, pointer: &PointerState) {
        let uv_mode = self.shared.illumination.borrow().state().uv_mode;
        // Measuring forces layout, so only do it when a scan will run.
        let targets = if uv_mode && self.uv.is_due() {
            if self.uv_elements.is_empty() {
                self.collect_uv_targets();
            }
            measure_targets(&self.uv_elements)
        } else {
            Vec::new()
        };
        if let Some(diff) = self.uv.scan(pointer.position(), uv_mode, &targets) {
            apply_uv_diff(&self.uv_elements, &diff);
        }
        if !uv_mode {
            self.uv_elements.clear();
        }
    }

    fn collect_uv_targets(&mut self) {
        if let Ok(list) = self.shared.document.query_selector_all(UV_HIDDEN_SELECTOR) {
            for i in 0..list.length() {
                if let Some(el) = list.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                    self.uv_elements.push(el);
                }
            }
        }
    }

    pub fn resize(&mut self) {
        let [vw, vh] = dom::viewport_size();
        self.shared.mask_renderer.borrow_mut().set_viewport(vw, vh);
        if let Some(surface) = self.ambient_surface.as_mut() {
            surface.resize();
            if let Some(sim) = self.ambient.as_mut() {
                let [w, h] = surface.css_size();
                sim.resize(w, h);
            }
        }
        if let Some(surface) = self.transition_surface.as_mut() {
            surface.resize();
        }
        self.shared.transition.borrow_mut().resize(vw, vh);
    }
}

fn measure_targets(elements: &[web::Element]) -> Vec<UvTarget> {
    elements
        .iter()
        .enumerate()
        .map(|(i, el)| {
            let r = el.get_bounding_client_rect();
            UvTarget {
                id: i as u32,
                center: Vec2::new(
                    (r.left() + r.width() * 0.5) as f32,
                    (r.top() + r.height() * 0.5) as f32,
                ),
            }
        })
        .collect()
}

/// Owner handle for the rAF loop; `stop` cancels the pending frame.
#[derive(Clone)]
pub struct LoopHandle {
    frame_id: Rc<Cell<Option<i32>>>,
    stopped: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn stop(&self) {
        self.stopped.set(true);
        if let (Some(id), Some(w)) = (self.frame_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let handle = LoopHandle {
        frame_id: Rc::new(Cell::new(None)),
        stopped: Rc::new(Cell::new(false)),
    };
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let loop_handle = handle.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if loop_handle.stopped.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &loop_handle);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &handle);
    handle
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, handle: &LoopHandle) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => handle.frame_id.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}
