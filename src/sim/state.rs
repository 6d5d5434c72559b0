//! Match state: score, countdown, outcome

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How the match stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Still playing
    #[default]
    Ongoing,
    /// Reached the winning score
    Won,
    /// Ran into a rock
    Lost,
    /// Countdown hit zero
    TimedOut,
}

impl Outcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ongoing => "Ongoing",
            Outcome::Won => "Won",
            Outcome::Lost => "Lost",
            Outcome::TimedOut => "TimedOut",
        }
    }

    /// Player-facing end-of-match message
    pub fn message(&self, score: u32) -> String {
        match self {
            Outcome::Ongoing => format!("Score: {score}"),
            Outcome::Won => format!("Congratulations! You won with {score} points!"),
            Outcome::Lost => format!("You hit a rock! Game over with {score} points."),
            Outcome::TimedOut => format!("Time's up! Final score: {score}."),
        }
    }
}

/// Score, clock and outcome of one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub score: u32,
    /// Whole seconds left on the countdown
    pub remaining_secs: u32,
    pub outcome: Outcome,
}

impl MatchState {
    pub fn new(match_seconds: u32) -> Self {
        Self {
            score: 0,
            remaining_secs: match_seconds,
            outcome: Outcome::Ongoing,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Set the outcome once. Returns false if the match had already ended.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.is_terminal() || !outcome.is_terminal() {
            return false;
        }
        self.outcome = outcome;
        true
    }
}

/// Serializable view of a match for logs and HUDs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub score: u32,
    pub remaining_secs: u32,
    pub outcome: Outcome,
    pub character: Vec2,
    pub coins_left: usize,
    pub elapsed_ms: u64,
}
