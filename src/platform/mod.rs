//! Platform abstraction layer
//!
//! `clock` turns animation-frame timestamps into simulated milliseconds.
//!
//! Frontends the simulation can draw to:
//! - `web`: DOM elements, Web Audio and `alert` (wasm32 only)
//! - `headless`: logs only, for native runs
//! - `recording`: keeps every call, for tests and replays

pub mod clock;
pub mod headless;
pub mod recording;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::FrameClock;
pub use headless::Headless;
pub use recording::{Call, Recording};
