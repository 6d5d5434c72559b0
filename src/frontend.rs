//! The presentation boundary
//!
//! The simulation never touches the DOM or audio directly. After every
//! state change it tells a [`Frontend`] what moved, what vanished and
//! what to play.

use glam::Vec2;
use thiserror::Error;

use crate::sim::EntityId;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Coin picked up
    CoinCollect,
}

/// Failures on the presentation side. Never fatal to a match.
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("audio output unavailable")]
    AudioUnavailable,
    #[error("dom operation failed: {0}")]
    Dom(String),
}

/// Rendering/audio collaborator driven by [`crate::Game`]
pub trait Frontend {
    /// Draw an entity at its new top-left position
    fn render_position(&mut self, id: EntityId, pos: Vec2);

    /// Remove a collected entity from view
    fn remove_entity(&mut self, id: EntityId);

    /// Play a sound effect
    fn play_sound(&mut self, sound: Sound) -> Result<(), FrontendError>;

    /// Blocking end-of-match message, called once per match
    fn notify(&mut self, message: &str);
}
