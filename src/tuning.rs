//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a partial JSON object can override any subset.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning set is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },
    #[error("{field} range is empty or out of bounds")]
    InvalidRange { field: &'static str },
}

/// Gameplay constants for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Top edge of the character when standing
    pub ground_y: f32,

    // === Character ===
    pub character_start_x: f32,
    pub character_size: f32,
    pub character_speed: f32,
    pub jump_height: f32,
    pub jump_step: f32,
    pub fall_step: f32,

    // === Coins ===
    pub coin_count: usize,
    pub coin_size: f32,
    pub coin_spawn_x: (f32, f32),
    pub coin_spawn_y: (f32, f32),
    pub coin_speed: (f32, f32),
    pub coin_range: (f32, f32),
    pub coin_min_y: f32,
    pub coin_max_y: f32,

    // === Rocks ===
    pub rock_size: f32,
    /// Left edges of the rocks, all resting on the ground line
    pub rock_xs: Vec<f32>,

    // === Scoring ===
    pub coin_reward: u32,
    pub win_score: u32,
    pub match_seconds: u32,

    // === Task periods (ms) ===
    pub jump_period_ms: u64,
    pub coin_period_ms: u64,
    pub collision_period_ms: u64,
    pub countdown_period_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            ground_y: GROUND_Y,

            character_start_x: CHARACTER_START_X,
            character_size: CHARACTER_SIZE,
            character_speed: CHARACTER_SPEED,
            jump_height: JUMP_HEIGHT,
            jump_step: JUMP_STEP,
            fall_step: FALL_STEP,

            coin_count: COIN_COUNT,
            coin_size: COIN_SIZE,
            coin_spawn_x: COIN_SPAWN_X,
            coin_spawn_y: COIN_SPAWN_Y,
            coin_speed: COIN_SPEED,
            coin_range: COIN_RANGE,
            coin_min_y: COIN_MIN_Y,
            coin_max_y: COIN_MAX_Y,

            rock_size: ROCK_SIZE,
            rock_xs: ROCK_XS.to_vec(),

            coin_reward: COIN_REWARD,
            win_score: WIN_SCORE,
            match_seconds: MATCH_SECONDS,

            jump_period_ms: JUMP_PERIOD_MS,
            coin_period_ms: COIN_PERIOD_MS,
            collision_period_ms: COLLISION_PERIOD_MS,
            countdown_period_ms: COUNTDOWN_PERIOD_MS,
        }
    }
}

impl Tuning {
    /// The compact arena variant with a higher ground line
    pub fn compact() -> Self {
        Self {
            ground_y: 460.0,
            ..Self::default()
        }
    }

    /// Parse overrides from JSON (missing fields keep their defaults) and validate
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the numbers describe a playable match
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("character_size", self.character_size),
            ("character_speed", self.character_speed),
            ("jump_height", self.jump_height),
            ("jump_step", self.jump_step),
            ("fall_step", self.fall_step),
            ("coin_size", self.coin_size),
            ("rock_size", self.rock_size),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NonPositive { field });
            }
        }

        let periods = [
            ("jump_period_ms", self.jump_period_ms),
            ("coin_period_ms", self.coin_period_ms),
            ("collision_period_ms", self.collision_period_ms),
            ("countdown_period_ms", self.countdown_period_ms),
        ];
        for (field, value) in periods {
            if value == 0 {
                return Err(TuningError::NonPositive { field });
            }
        }

        let counts = [
            ("coin_reward", self.coin_reward),
            ("win_score", self.win_score),
            ("match_seconds", self.match_seconds),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(TuningError::NonPositive { field });
            }
        }

        let ordered = |(lo, hi): (f32, f32)| lo <= hi;
        if !ordered(self.coin_spawn_x) {
            return Err(TuningError::InvalidRange { field: "coin_spawn_x" });
        }
        if self.coin_min_y >= self.coin_max_y {
            return Err(TuningError::InvalidRange { field: "coin_min_y" });
        }
        // Spawn heights must sit inside the hard limits so a coin always has
        // somewhere legal to be.
        let (spawn_lo, spawn_hi) = self.coin_spawn_y;
        if !ordered(self.coin_spawn_y) || spawn_lo < self.coin_min_y || spawn_hi > self.coin_max_y {
            return Err(TuningError::InvalidRange { field: "coin_spawn_y" });
        }
        if !ordered(self.coin_speed) || self.coin_speed.0 <= 0.0 {
            return Err(TuningError::InvalidRange { field: "coin_speed" });
        }
        if !ordered(self.coin_range) || self.coin_range.0 < 0.0 {
            return Err(TuningError::InvalidRange { field: "coin_range" });
        }

        Ok(())
    }

    /// Height of the apex the character turns around at
    #[inline]
    pub fn apex_y(&self) -> f32 {
        self.ground_y - self.jump_height
    }

    /// Top edge of a rock resting on the ground line
    #[inline]
    pub fn rock_y(&self) -> f32 {
        self.ground_y + self.character_size - self.rock_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.ground_y, 480.0);
        assert_eq!(tuning.apex_y(), 30.0);
        assert_eq!(tuning.rock_y(), 490.0);
        assert!(Tuning::compact().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "ground_y": 460.0, "win_score": 50 }"#).unwrap();
        assert_eq!(tuning.ground_y, 460.0);
        assert_eq!(tuning.win_score, 50);
        assert_eq!(tuning.coin_count, COIN_COUNT);
        assert_eq!(tuning.rock_xs, ROCK_XS.to_vec());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "coin_period_ms": 0 }"#),
            Err(TuningError::NonPositive { field: "coin_period_ms" })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "character_size": -5.0 }"#),
            Err(TuningError::NonPositive { field: "character_size" })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "coin_speed": [3.0, 1.0] }"#),
            Err(TuningError::InvalidRange { field: "coin_speed" })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "coin_spawn_y": [10.0, 550.0] }"#),
            Err(TuningError::InvalidRange { field: "coin_spawn_y" })
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
