//! Platform-independent core of the torchlight front end.
//!
//! Everything here is plain Rust with no web APIs so the state machines,
//! geometry and particle physics can be exercised on the host. The wasm
//! shell owns the DOM and feeds these types one frame at a time.

pub mod config;
pub mod constants;
pub mod error;
pub mod illumination;
pub mod keys;
pub mod mask;
pub mod particles;
pub mod pointer;
pub mod scroll;
pub mod signal;
pub mod time;
pub mod transition;
pub mod usage;
pub mod uv;

pub use config::*;
pub use error::TorchError;
pub use illumination::*;
pub use keys::*;
pub use mask::*;
pub use particles::*;
pub use pointer::*;
pub use scroll::*;
pub use signal::*;
pub use time::*;
pub use transition::*;
pub use usage::*;
pub use uv::*;
