//! Depth-layered particle simulation shared by the ambient background, the
//! smoke wash and the logo dispersion burst.
//!
//! A [`Simulation`] is a plain value: `step` advances physics by a frame delta
//! and `sprites` exposes render-ready particles, so nothing here needs a
//! drawing surface. The modes differ only in seeding, palette and lifespan.

use crate::constants::*;
use crate::error::TorchError;
use crate::time::Millis;
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationMode {
    /// Infinite idle background.
    Ambient,
    /// Logo/content burst ahead of a navigation.
    Dispersion,
    /// Soft rising wash.
    Smoke,
}

/// Horizontal bias of a dispersion burst.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispersionDirection {
    #[default]
    Forward,
    Backward,
}

impl DispersionDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            DispersionDirection::Forward => 1.0,
            DispersionDirection::Backward => -1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub mode: SimulationMode,
    pub count: usize,
    /// `None` runs forever.
    pub duration_ms: Option<Millis>,
    pub palette: Vec<[f32; 3]>,
    pub size_range: (f32, f32),
    /// Maximum linear drift, px per frame.
    pub drift: f32,
    /// Maximum depth speed before amplification, z units per frame.
    pub depth_speed: f32,
    pub direction: DispersionDirection,
    pub seed: u64,
}

impl SimulationConfig {
    pub fn ambient(count: usize, seed: u64) -> Self {
        Self {
            mode: SimulationMode::Ambient,
            count,
            duration_ms: None,
            palette: AMBIENT_PALETTE.to_vec(),
            size_range: (0.6, 2.2),
            drift: 0.25,
            depth_speed: 1.2,
            direction: DispersionDirection::Forward,
            seed,
        }
    }

    pub fn dispersion(
        count: usize,
        duration_ms: Millis,
        direction: DispersionDirection,
        seed: u64,
    ) -> Self {
        Self {
            mode: SimulationMode::Dispersion,
            count: count.clamp(PARTICLE_COUNT_MIN, PARTICLE_COUNT_MAX),
            duration_ms: Some(duration_ms),
            palette: vec![[1.0, 1.0, 1.0]],
            size_range: (0.8, 1.8),
            drift: 4.0,
            depth_speed: 6.0,
            direction,
            seed,
        }
    }

    pub fn smoke(count: usize, duration_ms: Millis, seed: u64) -> Self {
        Self {
            mode: SimulationMode::Smoke,
            count: count.clamp(PARTICLE_COUNT_MIN, PARTICLE_COUNT_MAX),
            duration_ms: Some(duration_ms),
            palette: SMOKE_PALETTE.to_vec(),
            size_range: (18.0, 42.0),
            drift: 0.8,
            depth_speed: 2.0,
            direction: DispersionDirection::Forward,
            seed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub base_x: f32,
    pub base_y: f32,
    pub size: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    pub speed_z: f32,
    pub angle: f32,
    pub alpha: f32,
    pub color: [f32; 3],
}

/// Screen rectangle of the element a burst is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnchorRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl AnchorRect {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

/// One opaque sample of a decomposed image, in normalized image space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedPoint {
    pub u: f32,
    pub v: f32,
    pub color: [f32; 3],
    pub alpha: f32,
}

/// Raw RGBA8 pixels of the element being dispersed.
#[derive(Clone, Debug)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl SourceImage {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, TorchError> {
        if width == 0 || height == 0 || rgba.len() != (width as usize) * (height as usize) * 4 {
            return Err(TorchError::ImageSize {
                width,
                height,
                len: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample every `step`-th pixel whose alpha reaches `alpha_threshold`.
    pub fn decompose(&self, step: u32, alpha_threshold: u8) -> Vec<SeedPoint> {
        let step = step.max(1);
        let mut points = Vec::new();
        for py in (0..self.height).step_by(step as usize) {
            for px in (0..self.width).step_by(step as usize) {
                let i = ((py * self.width + px) * 4) as usize;
                let a = self.rgba[i + 3];
                if a < alpha_threshold {
                    continue;
                }
                points.push(SeedPoint {
                    u: (px as f32 + 0.5) / self.width as f32,
                    v: (py as f32 + 0.5) / self.height as f32,
                    color: [
                        self.rgba[i] as f32 / 255.0,
                        self.rgba[i + 1] as f32 / 255.0,
                        self.rgba[i + 2] as f32 / 255.0,
                    ],
                    alpha: a as f32 / 255.0,
                });
            }
        }
        points
    }
}

/// Where particles start out.
#[derive(Clone, Debug, Default)]
pub enum Seeding {
    /// Uniform over the viewport.
    #[default]
    Uniform,
    /// Uniform inside an element's rectangle.
    Rect(AnchorRect),
    /// At the opaque pixels of an element's image.
    Image {
        anchor: AnchorRect,
        points: Vec<SeedPoint>,
    },
}

/// Per-frame inputs read from the shared pointer/scroll snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub pointer: Option<Vec2>,
    pub scroll_y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Completed,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Running,
    /// Returned exactly once, on the frame the duration elapsed.
    Completed,
    /// Completed earlier or cancelled; nothing was stepped.
    Stopped,
}

/// Render-ready particle, in canvas px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub alpha: f32,
    pub color: [f32; 3],
}

/// Normalized distance from the camera: 1 at `z = 0`, 0 at `z = Z_MAX`.
#[inline]
pub fn depth_factor(z: f32) -> f32 {
    ((Z_MAX - z) / Z_MAX).clamp(0.0, 1.0)
}

/// Wrap a depth that left `[0, Z_MAX]` to the opposite bound.
#[inline]
pub fn wrap_depth(z: f32) -> f32 {
    if z > Z_MAX {
        0.0
    } else if z < 0.0 {
        Z_MAX
    } else {
        z
    }
}

pub struct Simulation {
    config: SimulationConfig,
    particles: Vec<Particle>,
    rng: StdRng,
    viewport: [f32; 2],
    seeding: Seeding,
    elapsed_ms: Millis,
    state: RunState,
    last_input: FrameInput,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Simulation {
    pub fn new(config: SimulationConfig, viewport: [f32; 2], seeding: Seeding) -> Self {
        let mut sim = Self {
            rng: StdRng::seed_from_u64(config.seed),
            particles: Vec::with_capacity(config.count),
            config,
            viewport: [viewport[0].max(1.0), viewport[1].max(1.0)],
            seeding,
            elapsed_ms: 0.0,
            state: RunState::Running,
            last_input: FrameInput::default(),
            on_complete: None,
        };
        for i in 0..sim.config.count {
            let p = sim.spawn(i);
            sim.particles.push(p);
        }
        log::debug!(
            "[particles] {:?} simulation with {} particles",
            sim.config.mode,
            sim.particles.len()
        );
        sim
    }

    /// Invoked at most once, when the configured duration elapses.
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn mode(&self) -> SimulationMode {
        self.config.mode
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn elapsed_ms(&self) -> Millis {
        self.elapsed_ms
    }

    pub fn viewport(&self) -> [f32; 2] {
        self.viewport
    }

    /// 0..1 over the configured duration; always 0 for infinite runs.
    pub fn progress(&self) -> f32 {
        match self.config.duration_ms {
            Some(d) if d > 0.0 => (self.elapsed_ms / d).clamp(0.0, 1.0) as f32,
            Some(_) => 1.0,
            None => 0.0,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = [width.max(1.0), height.max(1.0)];
    }

    /// Stop stepping now. The completion callback is dropped unrun.
    pub fn cancel(&mut self) {
        if self.state == RunState::Running {
            log::debug!(
                "[particles] {:?} cancelled at {:.0}ms",
                self.config.mode,
                self.elapsed_ms
            );
        }
        self.state = RunState::Cancelled;
        self.on_complete = None;
    }

    pub fn step(&mut self, dt_ms: f32, input: &FrameInput) -> StepOutcome {
        if self.state != RunState::Running {
            return StepOutcome::Stopped;
        }
        let dt_ms = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, MAX_FRAME_DT_MS)
        } else {
            0.0
        };
        let k = dt_ms / FRAME_MS;
        self.elapsed_ms += dt_ms as f64;
        self.last_input = sanitize_input(input);

        let center = Vec2::new(self.viewport[0], self.viewport[1]) * 0.5;
        let pointer_offset = self.last_input.pointer.map_or(Vec2::ZERO, |p| p - center);
        let scroll_y = self.last_input.scroll_y;

        for i in 0..self.particles.len() {
            let p = &mut self.particles[i];
            if self.config.mode == SimulationMode::Dispersion && p.alpha <= 0.0 {
                continue;
            }
            p.z = wrap_depth(p.z + p.speed_z * DEPTH_SPEED_AMPLIFY * k);
            let depth = depth_factor(p.z);
            p.angle += ANGLE_STEP * (0.5 + depth) * k;
            let jitter = Vec2::new(p.angle.sin(), p.angle.cos()) * depth * JITTER_RADIUS;

            p.base_x += p.speed_x * k;
            p.base_y += p.speed_y * k;
            let offset = parallax(p.z, pointer_offset, scroll_y);
            p.x = p.base_x + offset.x + jitter.x;
            p.y = p.base_y + offset.y + jitter.y;

            if self.out_of_bounds(i) {
                self.recycle(i, pointer_offset, scroll_y);
            }
        }

        match self.config.duration_ms {
            Some(d) if self.elapsed_ms >= d => {
                self.state = RunState::Completed;
                log::debug!("[particles] {:?} completed", self.config.mode);
                if let Some(f) = self.on_complete.take() {
                    f();
                }
                StepOutcome::Completed
            }
            _ => StepOutcome::Running,
        }
    }

    /// Particles ready to paint, far layers first.
    pub fn sprites(&self) -> Vec<Sprite> {
        let progress = self.progress();
        let (fade, swell) = match self.config.mode {
            SimulationMode::Ambient => (1.0, 1.0),
            SimulationMode::Dispersion => (1.0 - progress, 1.0),
            SimulationMode::Smoke => ((1.0 - progress) * 0.35, 1.0 + 2.0 * progress),
        };
        let mut order: Vec<usize> = (0..self.particles.len()).collect();
        order.sort_by(|&a, &b| self.particles[b].z.total_cmp(&self.particles[a].z));
        order
            .into_iter()
            .filter_map(|i| {
                let p = &self.particles[i];
                let depth = depth_factor(p.z);
                let alpha = p.alpha * depth * fade;
                let radius = p.size * depth * swell;
                (alpha > 0.003 && radius > 0.05).then_some(Sprite {
                    x: p.x,
                    y: p.y,
                    radius,
                    alpha,
                    color: p.color,
                })
            })
            .collect()
    }

    fn out_of_bounds(&self, i: usize) -> bool {
        let p = &self.particles[i];
        p.x < -RECYCLE_MARGIN
            || p.x > self.viewport[0] + RECYCLE_MARGIN
            || p.y < -RECYCLE_MARGIN
            || p.y > self.viewport[1] + RECYCLE_MARGIN
    }

    fn recycle(&mut self, i: usize, pointer_offset: Vec2, scroll_y: f32) {
        if self.config.mode == SimulationMode::Dispersion {
            // A burst never re-emits; the slot goes dark where it left.
            let p = &mut self.particles[i];
            p.alpha = 0.0;
            p.speed_x = 0.0;
            p.speed_y = 0.0;
            p.speed_z = 0.0;
            return;
        }
        let mut p = match self.config.mode {
            SimulationMode::Smoke => self.spawn_smoke(self.viewport_rect()),
            _ => self.spawn_uniform(),
        };
        // Land inside the viewport even when the parallax offset is large.
        let offset = parallax(p.z, pointer_offset, scroll_y);
        p.base_x -= offset.x;
        p.base_y -= offset.y;
        self.particles[i] = p;
    }

    fn spawn(&mut self, index: usize) -> Particle {
        let count = self.config.count.max(1);
        let (rect, seed) = match &self.seeding {
            Seeding::Image { anchor, points } if !points.is_empty() => {
                (*anchor, Some(points[index * points.len() / count]))
            }
            Seeding::Rect(r) | Seeding::Image { anchor: r, .. } => (*r, None),
            Seeding::Uniform => (self.viewport_rect(), None),
        };
        match self.config.mode {
            SimulationMode::Ambient => self.spawn_uniform(),
            SimulationMode::Smoke => self.spawn_smoke(rect),
            SimulationMode::Dispersion => self.spawn_burst(rect, seed),
        }
    }

    fn viewport_rect(&self) -> AnchorRect {
        AnchorRect {
            x: 0.0,
            y: 0.0,
            width: self.viewport[0],
            height: self.viewport[1],
        }
    }

    fn pick_color(&mut self) -> [f32; 3] {
        self.config
            .palette
            .choose(&mut self.rng)
            .copied()
            .unwrap_or([1.0, 1.0, 1.0])
    }

    fn random_size(&mut self) -> f32 {
        let (lo, hi) = self.config.size_range;
        if hi > lo {
            self.rng.gen_range(lo..hi)
        } else {
            lo
        }
    }

    fn spawn_uniform(&mut self) -> Particle {
        let drift = self.config.drift.max(f32::EPSILON);
        let depth_speed = self.config.depth_speed.max(f32::EPSILON);
        let x = self.rng.gen_range(0.0..self.viewport[0]);
        let y = self.rng.gen_range(0.0..self.viewport[1]);
        Particle {
            x,
            y,
            z: self.rng.gen_range(0.0..Z_MAX),
            base_x: x,
            base_y: y,
            size: self.random_size(),
            speed_x: self.rng.gen_range(-drift..drift),
            speed_y: self.rng.gen_range(-drift..drift),
            speed_z: self.rng.gen_range(-depth_speed..depth_speed),
            angle: self.rng.gen_range(0.0..std::f32::consts::TAU),
            alpha: self.rng.gen_range(0.25..0.9),
            color: self.pick_color(),
        }
    }

    fn spawn_smoke(&mut self, rect: AnchorRect) -> Particle {
        let mut p = self.spawn_uniform();
        let drift = self.config.drift.max(f32::EPSILON);
        p.base_x = rect.x + self.rng.gen_range(0.0..rect.width.max(1.0));
        p.base_y = rect.y + self.rng.gen_range(0.0..rect.height.max(1.0));
        p.x = p.base_x;
        p.y = p.base_y;
        p.z = self.rng.gen_range(0.0..Z_MAX * 0.5);
        p.speed_y = -self.rng.gen_range(drift * 0.25..drift);
        p.speed_z = p.speed_z.abs();
        p.alpha = self.rng.gen_range(0.4..1.0);
        p
    }

    fn spawn_burst(&mut self, anchor: AnchorRect, seed: Option<SeedPoint>) -> Particle {
        let drift = self.config.drift.max(f32::EPSILON);
        let depth_speed = self.config.depth_speed.max(f32::EPSILON);
        let (u, v) = match seed {
            Some(s) => (s.u, s.v),
            None => (self.rng.gen::<f32>(), self.rng.gen::<f32>()),
        };
        let x = anchor.x + u * anchor.width;
        let y = anchor.y + v * anchor.height;
        let outward = (Vec2::new(x, y) - anchor.center()).normalize_or_zero();
        let push = self.rng.gen_range(0.2..1.0) * drift;
        let bias = self.config.direction.sign() * self.rng.gen_range(0.3..1.0) * drift;
        let (color, alpha) = match seed {
            Some(s) => (s.color, s.alpha),
            None => (self.pick_color(), 1.0),
        };
        Particle {
            x,
            y,
            z: self.rng.gen_range(0.0..Z_MAX * 0.05),
            base_x: x,
            base_y: y,
            size: self.random_size(),
            speed_x: outward.x * push + bias,
            speed_y: outward.y * push + self.rng.gen_range(-0.5..0.5),
            speed_z: self.rng.gen_range(depth_speed * 0.2..depth_speed),
            angle: self.rng.gen_range(0.0..std::f32::consts::TAU),
            alpha,
            color,
        }
    }
}

/// Pointer and scroll parallax; both scale with `z / (2 * Z_MAX)` so far
/// layers shift the most.
#[inline]
fn parallax(z: f32, pointer_offset: Vec2, scroll_y: f32) -> Vec2 {
    let s = z / (2.0 * Z_MAX);
    Vec2::new(
        -pointer_offset.x * PARALLAX_POINTER * s,
        -pointer_offset.y * PARALLAX_POINTER * s - scroll_y * PARALLAX_SCROLL * s,
    )
}

fn sanitize_input(input: &FrameInput) -> FrameInput {
    FrameInput {
        pointer: input.pointer.filter(|p| p.is_finite()),
        scroll_y: if input.scroll_y.is_finite() {
            input.scroll_y
        } else {
            0.0
        },
    }
}
