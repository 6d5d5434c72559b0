//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulated milliseconds only, fed in by the caller
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies beyond the `Frontend` trait

pub mod character;
pub mod entity;
pub mod field;
pub mod game;
pub mod schedule;
pub mod state;

pub use character::{Character, JumpPhase, Key, KeyEffect};
pub use entity::{Aabb, Body, EntityId, EntityKind, bodies_overlap, overlaps};
pub use field::{Coin, PickupField, Rock, standard_rocks};
pub use game::Game;
pub use schedule::{ScheduleError, Scheduler, TaskHandle};
pub use state::{MatchSnapshot, MatchState, Outcome};
