//! Coins and rocks
//!
//! Coins bob up and down around the height they spawned at. Rocks sit on
//! the ground line and never move.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Body, EntityId, EntityKind};
use crate::tuning::Tuning;

/// A floating collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical speed in px per coin tick (positive = down)
    pub vel_y: f32,
    /// Spawn height the coin oscillates around
    pub home_y: f32,
    /// Oscillation half-range
    pub range: f32,
    /// Hard vertical limits
    pub min_y: f32,
    pub max_y: f32,
}

impl Coin {
    /// Spawn a coin at a random position with a random bob
    pub fn random<R: Rng>(id: EntityId, tuning: &Tuning, rng: &mut R) -> Self {
        let x = rng.random_range(tuning.coin_spawn_x.0..=tuning.coin_spawn_x.1);
        let y = rng.random_range(tuning.coin_spawn_y.0..=tuning.coin_spawn_y.1);
        let speed = rng.random_range(tuning.coin_speed.0..=tuning.coin_speed.1);
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let range = rng.random_range(tuning.coin_range.0..=tuning.coin_range.1);

        Self {
            id,
            pos: Vec2::new(x, y),
            size: Vec2::splat(tuning.coin_size),
            vel_y: speed * sign,
            home_y: y,
            range,
            min_y: tuning.coin_min_y,
            max_y: tuning.coin_max_y,
        }
    }

    /// A coin at a fixed spot that does not bob
    pub fn fixed(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            pos,
            size: Vec2::splat(tuning.coin_size),
            vel_y: 0.0,
            home_y: pos.y,
            range: 0.0,
            min_y: tuning.coin_min_y,
            max_y: tuning.coin_max_y,
        }
    }

    /// One bob step: move, turn around at the range edge, then the hard clamp
    pub fn step(&mut self) {
        self.pos.y += self.vel_y;

        let top = self.home_y - self.range;
        let bottom = self.home_y + self.range;
        if self.pos.y > bottom {
            self.pos.y = bottom;
            self.vel_y = -self.vel_y.abs();
        } else if self.pos.y < top {
            self.pos.y = top;
            self.vel_y = self.vel_y.abs();
        }

        if self.pos.y < self.min_y {
            self.pos.y = self.min_y;
            self.vel_y = self.vel_y.abs();
        }
        if self.pos.y > self.max_y {
            self.pos.y = self.max_y;
            self.vel_y = -self.vel_y.abs();
        }
    }
}

impl Body for Coin {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A static obstacle. Touching one ends the match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rock {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rock {
    pub fn new(id: EntityId, pos: Vec2, size: f32) -> Self {
        Self {
            id,
            pos,
            size: Vec2::splat(size),
        }
    }
}

impl Body for Rock {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// The one rock layout: every rock rests on the ground line
pub fn standard_rocks(tuning: &Tuning) -> Vec<Rock> {
    tuning
        .rock_xs
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            Rock::new(
                EntityId::new(EntityKind::Rock, i as u32),
                Vec2::new(x, tuning.rock_y()),
                tuning.rock_size,
            )
        })
        .collect()
}

/// Active coins and the rock layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PickupField {
    /// Active coins (spawn order)
    pub coins: Vec<Coin>,
    pub rocks: Vec<Rock>,
}

impl PickupField {
    pub fn new(coins: Vec<Coin>, rocks: Vec<Rock>) -> Self {
        Self { coins, rocks }
    }

    /// Random coins from `seed` plus the fixed rock layout
    pub fn generate(tuning: &Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let coins = (0..tuning.coin_count)
            .map(|i| Coin::random(EntityId::new(EntityKind::Coin, i as u32), tuning, &mut rng))
            .collect();
        Self {
            coins,
            rocks: standard_rocks(tuning),
        }
    }

    /// Advance every coin by one bob step
    pub fn tick(&mut self) {
        for coin in &mut self.coins {
            coin.step();
        }
    }

    /// Remove and return the first coin (spawn order) touching `bounds`
    pub fn take_overlapping(&mut self, bounds: &Aabb) -> Option<Coin> {
        let index = self
            .coins
            .iter()
            .position(|coin| coin.bounds().overlaps(bounds))?;
        Some(self.coins.remove(index))
    }

    /// First rock touching `bounds`, if any
    pub fn rock_hit(&self, bounds: &Aabb) -> Option<&Rock> {
        self.rocks.iter().find(|rock| rock.bounds().overlaps(bounds))
    }

    pub fn coins_left(&self) -> usize {
        self.coins.len()
    }
}
