//! A frontend that remembers what it was told

use glam::Vec2;

use crate::frontend::{Frontend, FrontendError, Sound};
use crate::sim::EntityId;

/// One frontend call, in the order it happened
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Render(EntityId, Vec2),
    Remove(EntityId),
    Sound(Sound),
    Notify(String),
}

#[derive(Debug, Default)]
pub struct Recording {
    pub calls: Vec<Call>,
    /// Make every `play_sound` fail, as if no audio device were present
    pub fail_sounds: bool,
}

impl Recording {
    /// How many times `id` was drawn
    pub fn renders_of(&self, id: EntityId) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Render(rendered, _) if *rendered == id))
            .count()
    }

    /// Last position `id` was drawn at
    pub fn last_position(&self, id: EntityId) -> Option<Vec2> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::Render(rendered, pos) if *rendered == id => Some(*pos),
            _ => None,
        })
    }

    pub fn removed(&self) -> Vec<EntityId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Remove(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Sound requests, including ones that failed
    pub fn sounds(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Sound(_)))
            .count()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Notify(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Frontend for Recording {
    fn render_position(&mut self, id: EntityId, pos: Vec2) {
        self.calls.push(Call::Render(id, pos));
    }

    fn remove_entity(&mut self, id: EntityId) {
        self.calls.push(Call::Remove(id));
    }

    fn play_sound(&mut self, sound: Sound) -> Result<(), FrontendError> {
        self.calls.push(Call::Sound(sound));
        if self.fail_sounds {
            Err(FrontendError::AudioUnavailable)
        } else {
            Ok(())
        }
    }

    fn notify(&mut self, message: &str) {
        self.calls.push(Call::Notify(message.to_string()));
    }
}
