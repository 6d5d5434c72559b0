//! Frontend for native runs: nothing to draw, so it just logs

use std::collections::HashSet;

use glam::Vec2;

use crate::frontend::{Frontend, FrontendError, Sound};
use crate::sim::EntityId;

#[derive(Debug, Default)]
pub struct Headless {
    /// Entities drawn at least once and not yet removed
    visible: HashSet<EntityId>,
    /// Message passed to `notify`, if the match ended
    pub final_message: Option<String>,
}

impl Headless {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }
}

impl Frontend for Headless {
    fn render_position(&mut self, id: EntityId, pos: Vec2) {
        if self.visible.insert(id) {
            log::trace!("{:?} {} appears at ({}, {})", id.kind, id.index, pos.x, pos.y);
        }
    }

    fn remove_entity(&mut self, id: EntityId) {
        self.visible.remove(&id);
    }

    fn play_sound(&mut self, sound: Sound) -> Result<(), FrontendError> {
        log::debug!("*{:?}*", sound);
        Ok(())
    }

    fn notify(&mut self, message: &str) {
        log::info!("{}", message);
        self.final_message = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EntityKind;

    #[test]
    fn test_tracks_visible_entities() {
        let mut headless = Headless::new();
        let coin = EntityId::new(EntityKind::Coin, 3);
        headless.render_position(coin, Vec2::new(1.0, 2.0));
        headless.render_position(coin, Vec2::new(1.0, 3.0));
        assert_eq!(headless.visible_count(), 1);

        headless.remove_entity(coin);
        assert_eq!(headless.visible_count(), 0);

        headless.notify("done");
        assert_eq!(headless.final_message.as_deref(), Some("done"));
    }
}
