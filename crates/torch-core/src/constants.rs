// Tuning constants shared by the core state machines and the web shell.

// Illumination
pub const TOGGLE_DEBOUNCE_MS: f64 = 300.0;
pub const UV_ACTIVATION_DELAY_MS: f64 = 50.0; // lets the torch-on frame land before UV

// Torch mask (CSS px)
pub const TORCH_RADIUS_X: f32 = 350.0;
pub const TORCH_RADIUS_Y: f32 = 550.0;
pub const TORCH_RADIUS_Y_MIN_SCALE: f32 = 0.8; // long axis at the top of the viewport
pub const TORCH_DARKNESS: f32 = 0.92;
pub const TORCH_DARKNESS_UV: f32 = 0.55;
pub const SPOT_RADIUS_DESKTOP: f32 = 300.0;
pub const SPOT_RADIUS_TOUCH: f32 = 200.0;

// Proximity scroll
pub const DEAD_ZONE_DESKTOP: f32 = 0.30; // fraction of viewport height
pub const DEAD_ZONE_TOUCH: f32 = 0.35;
pub const SCROLL_MAX_DESKTOP: f32 = 10.0; // px per frame at the viewport edge
pub const SCROLL_MAX_TOUCH: f32 = 8.0;
pub const SCROLL_MIN_SPEED: f32 = 0.8; // below this the frame issues no scroll
pub const SCROLL_ARM_DELAY_MS: f64 = 200.0;

// Particles
pub const Z_MAX: f32 = 1000.0;
pub const DEPTH_SPEED_AMPLIFY: f32 = 1.5;
pub const JITTER_RADIUS: f32 = 2.0;
pub const ANGLE_STEP: f32 = 0.02; // radians per frame at full scale
pub const PARALLAX_POINTER: f32 = 0.15;
pub const PARALLAX_SCROLL: f32 = 0.5;
pub const RECYCLE_MARGIN: f32 = 50.0;
pub const FRAME_MS: f32 = 1000.0 / 60.0;
pub const MAX_FRAME_DT_MS: f32 = 100.0; // longer gaps (tab switch) are clamped

pub const AMBIENT_COUNT: usize = 600;
pub const DISPERSION_COUNT: usize = 1200;
pub const SMOKE_COUNT: usize = 65;
pub const PARTICLE_COUNT_MIN: usize = 65;
pub const PARTICLE_COUNT_MAX: usize = 2000;
pub const DISPERSION_DURATION_MS: f64 = 1200.0;
pub const SMOKE_DURATION_MS: f64 = 1500.0;

// Transition
pub const SETTLE_DELAY_MS: f64 = 800.0;

// UV proximity scan
pub const UV_SCAN_INTERVAL_MS: f64 = 100.0;
pub const UV_REVEAL_RADIUS: f32 = 250.0;

// Palettes (linear 0..1 RGB)
pub const AMBIENT_PALETTE: [[f32; 3]; 3] = [
    [0.95, 0.95, 1.0], // cold white
    [0.70, 0.80, 1.0], // pale blue
    [1.0, 0.90, 0.70], // warm dust
];

pub const SMOKE_PALETTE: [[f32; 3]; 2] = [[0.55, 0.55, 0.58], [0.75, 0.75, 0.78]];
