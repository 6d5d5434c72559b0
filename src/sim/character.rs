//! The player character: keyboard movement and the jump arc
//!
//! Horizontal movement is instant per key press. Vertical movement is a
//! three-phase state machine advanced by the jump ticker.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Body, EntityId};
use crate::tuning::Tuning;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name. Anything else is not a game key.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            _ => None,
        }
    }
}

/// Vertical phase of the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Ascending,
    Descending,
}

impl JumpPhase {
    #[inline]
    pub fn is_airborne(self) -> bool {
        self != JumpPhase::Grounded
    }
}

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEffect {
    /// Moved sideways
    Moved,
    /// Left the ground
    JumpStarted,
    /// Jump requested mid-air
    Ignored,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub phase: JumpPhase,
    ground_y: f32,
    apex_y: f32,
    jump_step: f32,
    fall_step: f32,
}

impl Character {
    /// A grounded character at the tuning's start position
    pub fn new(id: EntityId, tuning: &Tuning) -> Self {
        Self {
            id,
            pos: Vec2::new(tuning.character_start_x, tuning.ground_y),
            size: Vec2::splat(tuning.character_size),
            speed: tuning.character_speed,
            phase: JumpPhase::Grounded,
            ground_y: tuning.ground_y,
            apex_y: tuning.apex_y(),
            jump_step: tuning.jump_step,
            fall_step: tuning.fall_step,
        }
    }

    #[inline]
    pub fn apex_y(&self) -> f32 {
        self.apex_y
    }

    /// Apply one key press. x is not clamped; walking off-screen is allowed.
    pub fn handle_key(&mut self, key: Key) -> KeyEffect {
        match key {
            Key::Right => {
                self.pos.x += self.speed;
                KeyEffect::Moved
            }
            Key::Left => {
                self.pos.x -= self.speed;
                KeyEffect::Moved
            }
            Key::Up => {
                if self.phase.is_airborne() {
                    KeyEffect::Ignored
                } else {
                    self.phase = JumpPhase::Ascending;
                    KeyEffect::JumpStarted
                }
            }
        }
    }

    /// Advance the jump arc by one tick and return the resulting phase
    pub fn step_jump(&mut self) -> JumpPhase {
        match self.phase {
            JumpPhase::Grounded => {}
            JumpPhase::Ascending => {
                self.pos.y -= self.jump_step;
                if self.pos.y <= self.apex_y {
                    self.phase = JumpPhase::Descending;
                }
            }
            JumpPhase::Descending => {
                self.pos.y += self.fall_step;
                if self.pos.y >= self.ground_y {
                    self.pos.y = self.ground_y;
                    self.phase = JumpPhase::Grounded;
                }
            }
        }
        self.phase
    }
}

impl Body for Character {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EntityKind;

    fn character() -> Character {
        Character::new(EntityId::new(EntityKind::Character, 0), &Tuning::default())
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_name("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_name("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_name("ArrowDown"), None);
        assert_eq!(Key::from_name(" "), None);
        assert_eq!(Key::from_name("arrowup"), None);
    }

    #[test]
    fn test_horizontal_movement_unclamped() {
        let mut c = character();
        assert_eq!(c.pos, Vec2::new(50.0, 480.0));

        c.handle_key(Key::Right);
        assert_eq!(c.pos.x, 60.0);

        for _ in 0..10 {
            c.handle_key(Key::Left);
        }
        // Walked past the left edge
        assert_eq!(c.pos.x, -40.0);
        assert_eq!(c.pos.y, 480.0);
    }

    #[test]
    fn test_jump_arc() {
        let mut c = character();
        assert_eq!(c.handle_key(Key::Up), KeyEffect::JumpStarted);
        assert_eq!(c.phase, JumpPhase::Ascending);

        // Rise: strictly decreasing y until the apex
        let mut last_y = c.pos.y;
        let mut rise_ticks = 0;
        while c.phase == JumpPhase::Ascending {
            c.step_jump();
            assert!(c.pos.y < last_y);
            last_y = c.pos.y;
            rise_ticks += 1;
        }
        assert_eq!(c.phase, JumpPhase::Descending);
        assert!(c.pos.y <= c.apex_y());
        assert_eq!(rise_ticks, 23);

        // Fall: strictly increasing y back to the ground
        let mut fall_ticks = 0;
        while c.phase == JumpPhase::Descending {
            c.step_jump();
            assert!(c.pos.y > last_y);
            last_y = c.pos.y;
            fall_ticks += 1;
        }
        assert_eq!(c.phase, JumpPhase::Grounded);
        assert_eq!(c.pos.y, 480.0);
        // Slower fall than rise
        assert!(fall_ticks > rise_ticks);
    }

    #[test]
    fn test_no_double_jump() {
        let mut c = character();
        c.handle_key(Key::Up);
        c.step_jump();
        let y = c.pos.y;

        assert_eq!(c.handle_key(Key::Up), KeyEffect::Ignored);
        assert_eq!(c.phase, JumpPhase::Ascending);
        assert_eq!(c.pos.y, y);

        // Still ignored on the way down
        while c.phase == JumpPhase::Ascending {
            c.step_jump();
        }
        assert_eq!(c.handle_key(Key::Up), KeyEffect::Ignored);
        assert_eq!(c.phase, JumpPhase::Descending);
    }

    #[test]
    fn test_move_while_airborne() {
        let mut c = character();
        c.handle_key(Key::Up);
        c.step_jump();
        c.handle_key(Key::Right);
        assert_eq!(c.pos.x, 60.0);
        assert_eq!(c.phase, JumpPhase::Ascending);
    }

    #[test]
    fn test_grounded_step_is_noop() {
        let mut c = character();
        assert_eq!(c.step_jump(), JumpPhase::Grounded);
        assert_eq!(c.pos, Vec2::new(50.0, 480.0));
    }

    #[test]
    fn test_compact_arena_lands_on_its_ground() {
        let tuning = Tuning::compact();
        let mut c = Character::new(EntityId::new(EntityKind::Character, 0), &tuning);
        c.handle_key(Key::Up);
        while c.step_jump().is_airborne() {}
        assert_eq!(c.pos.y, 460.0);
    }
}
