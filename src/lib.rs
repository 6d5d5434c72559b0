//! Coin Jump - a single-screen platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (character, coins, rocks, match state)
//! - `frontend`: The narrow boundary the simulation draws and plays sounds through
//! - `platform`: Browser/headless frontends
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod frontend;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use frontend::{Frontend, FrontendError, Sound};
pub use sim::{EntityId, EntityKind, Game, Key, Outcome};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These are the defaults behind [`Tuning::default`].
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1200.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Character baseline (top edge when standing). The compact arena uses 460.
    pub const GROUND_Y: f32 = 480.0;

    /// Character defaults
    pub const CHARACTER_START_X: f32 = 50.0;
    pub const CHARACTER_SIZE: f32 = 50.0;
    /// Pixels moved per key press
    pub const CHARACTER_SPEED: f32 = 10.0;
    /// Apex sits this far above the ground line
    pub const JUMP_HEIGHT: f32 = 450.0;
    pub const JUMP_STEP: f32 = 20.0;
    pub const FALL_STEP: f32 = 10.0;

    /// Coin defaults
    pub const COIN_COUNT: usize = 20;
    pub const COIN_SIZE: f32 = 30.0;
    pub const COIN_SPAWN_X: (f32, f32) = (50.0, 1150.0);
    pub const COIN_SPAWN_Y: (f32, f32) = (50.0, 550.0);
    /// Vertical speed magnitude (px per coin tick)
    pub const COIN_SPEED: (f32, f32) = (1.0, 3.0);
    /// Oscillation half-range around the spawn height
    pub const COIN_RANGE: (f32, f32) = (30.0, 70.0);
    /// Hard vertical limits for coins
    pub const COIN_MIN_Y: f32 = 30.0;
    pub const COIN_MAX_Y: f32 = 570.0;

    /// Rock defaults
    pub const ROCK_SIZE: f32 = 40.0;
    pub const ROCK_XS: [f32; 3] = [400.0, 750.0, 1000.0];

    /// Scoring
    pub const COIN_REWARD: u32 = 10;
    pub const WIN_SCORE: u32 = 100;
    pub const MATCH_SECONDS: u32 = 60;

    /// Task periods in milliseconds
    pub const JUMP_PERIOD_MS: u64 = 20;
    pub const COIN_PERIOD_MS: u64 = 50;
    pub const COLLISION_PERIOD_MS: u64 = 100;
    pub const COUNTDOWN_PERIOD_MS: u64 = 1000;
}
