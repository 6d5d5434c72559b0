//! Entity identity and axis-aligned bounds
//!
//! Screen space: origin top-left, y grows downward, units are pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What an entity is, so a frontend can pick its look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Character,
    Coin,
    Rock,
}

/// Stable handle for an entity within one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    pub kind: EntityKind,
    pub index: u32,
}

impl EntityId {
    pub fn new(kind: EntityKind, index: u32) -> Self {
        Self { kind, index }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height, both positive
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict box intersection. Shared edges do not count.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// Anything with a fixed-size box in the arena
pub trait Body {
    fn id(&self) -> EntityId;
    fn bounds(&self) -> Aabb;
}

/// Check whether two boxes intersect
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Check whether two bodies intersect
pub fn bodies_overlap(a: &dyn Body, b: &dyn Body) -> bool {
    overlaps(&a.bounds(), &b.bounds())
}
