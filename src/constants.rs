// DOM contract shared with the host page.

// Elements
pub const AMBIENT_CANVAS_ID: &str = "ambient-canvas";
pub const TRANSITION_CANVAS_ID: &str = "transition-canvas";
pub const TORCH_MASK_ID: &str = "torch-mask";
pub const TORCH_SPOT_ID: &str = "torch-spot";
pub const TORCH_TOGGLE_ID: &str = "torch-toggle";
pub const UV_TOGGLE_ID: &str = "uv-toggle";
pub const DISPERSE_SELECTOR: &str = "[data-disperse]";
pub const UV_HIDDEN_SELECTOR: &str = "[data-uv-hidden]";

// Lit-spot look: a warm wash plus a brightness lift on the page beneath.
pub const SPOT_LAYER_STYLE: &str = "background:rgba(255,244,220,0.08);\
    backdrop-filter:brightness(1.6) contrast(1.3);\
    -webkit-backdrop-filter:brightness(1.6) contrast(1.3);";

// Classes and attributes on <html>
pub const TORCH_ON_CLASS: &str = "torch-on";
pub const UV_MODE_CLASS: &str = "uv-mode";
pub const UV_VISIBLE_CLASS: &str = "uv-visible";
pub const TRANSITIONING_ATTR: &str = "data-transitioning";
pub const ASSETS_READY_ATTR: &str = "data-assets-ready";

// Custom events
pub const EVENT_CUE: &str = "torch:cue";
pub const EVENT_NAVIGATE: &str = "torch:navigate";
pub const EVENT_ROUTE_CHANGED: &str = "torch:route-changed";
pub const EVENT_ASSETS_READY: &str = "torch:assets-ready";
pub const EVENT_UNLOCKED: &str = "torch:unlocked";

// Config keys read from `data-*` attributes on <html>
pub const CONFIG_KEYS: [&str; 5] = [
    "settle-delay",
    "dispersion-ms",
    "dispersion-count",
    "ambient-count",
    "log-level",
];

// Logo decomposition
pub const DISPERSE_SAMPLE_STEP: u32 = 3;
pub const DISPERSE_ALPHA_THRESHOLD: u8 = 128;

pub const AMBIENT_SEED: u64 = 42;
pub const VIBRATE_MS: u32 = 15;
