//! Match orchestration
//!
//! [`Game`] owns everything in a match and sequences each periodic task as
//! "check the outcome, mutate, then tell the frontend". Time only moves
//! when the caller feeds milliseconds to [`Game::advance`].

use super::character::{Character, JumpPhase, Key, KeyEffect};
use super::entity::{Body, EntityId, EntityKind};
use super::field::PickupField;
use super::schedule::{Scheduler, TaskHandle};
use super::state::{MatchSnapshot, MatchState, Outcome};
use crate::frontend::{Frontend, Sound};
use crate::tuning::{Tuning, TuningError};

/// The periodic jobs of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    CollisionPoll,
    CoinMotion,
    Countdown,
    Jump,
}

/// Live registrations, consumed when the match ends
#[derive(Debug, Default)]
struct TaskHandles {
    collision: Option<TaskHandle>,
    coins: Option<TaskHandle>,
    countdown: Option<TaskHandle>,
    jump: Option<TaskHandle>,
}

impl TaskHandles {
    fn take_all(&mut self) -> impl Iterator<Item = TaskHandle> {
        [
            self.collision.take(),
            self.coins.take(),
            self.countdown.take(),
            self.jump.take(),
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Running,
    Stopped,
}

/// One match: character, field, score and clock, plus the frontend it draws to
pub struct Game<F: Frontend> {
    tuning: Tuning,
    state: MatchState,
    character: Character,
    field: PickupField,
    scheduler: Scheduler<Task>,
    handles: TaskHandles,
    lifecycle: Lifecycle,
    frontend: F,
}

impl<F: Frontend> Game<F> {
    /// A match with 20 random coins (from `seed`) and the standard rocks
    pub fn new(tuning: Tuning, seed: u64, frontend: F) -> Result<Self, TuningError> {
        tuning.validate()?;
        let field = PickupField::generate(&tuning, seed);
        log::info!(
            "Match created with seed {}: {} coins, {} rocks",
            seed,
            field.coins.len(),
            field.rocks.len()
        );
        Ok(Self::build(tuning, field, frontend))
    }

    /// A match over a caller-supplied field
    pub fn with_field(tuning: Tuning, field: PickupField, frontend: F) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, field, frontend))
    }

    fn build(tuning: Tuning, field: PickupField, frontend: F) -> Self {
        let character = Character::new(EntityId::new(EntityKind::Character, 0), &tuning);
        Self {
            state: MatchState::new(tuning.match_seconds),
            character,
            field,
            scheduler: Scheduler::new(),
            handles: TaskHandles::default(),
            lifecycle: Lifecycle::Created,
            frontend,
            tuning,
        }
    }

    // === Lifecycle ===

    /// Draw every entity and start the collision, coin and countdown tasks.
    /// Only the first call has any effect.
    pub fn start(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        self.lifecycle = Lifecycle::Running;

        self.frontend
            .render_position(self.character.id, self.character.pos);
        for coin in &self.field.coins {
            self.frontend.render_position(coin.id, coin.pos);
        }
        for rock in &self.field.rocks {
            self.frontend.render_position(rock.id, rock.pos);
        }

        self.handles.collision = self.register(self.tuning.collision_period_ms, Task::CollisionPoll);
        self.handles.coins = self.register(self.tuning.coin_period_ms, Task::CoinMotion);
        self.handles.countdown = self.register(self.tuning.countdown_period_ms, Task::Countdown);

        log::info!(
            "Match started: {} seconds on the clock, {} to win",
            self.state.remaining_secs,
            self.tuning.win_score
        );
    }

    /// Cancel every task without deciding the match
    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Stopped {
            return;
        }
        self.lifecycle = Lifecycle::Stopped;
        self.cancel_tasks();
        log::info!("Match stopped at score {}", self.state.score);
    }

    fn register(&mut self, period_ms: u64, task: Task) -> Option<TaskHandle> {
        match self.scheduler.every(period_ms, task) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("Could not schedule {:?}: {}", task, e);
                None
            }
        }
    }

    fn cancel_tasks(&mut self) {
        for handle in self.handles.take_all() {
            self.scheduler.cancel(handle);
        }
    }

    /// Run every task that falls due in the next `dt_ms` of simulated time
    pub fn advance(&mut self, dt_ms: u64) {
        if self.lifecycle != Lifecycle::Running {
            return;
        }
        let until = self.scheduler.now_ms() + dt_ms;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run(task);
        }
        self.scheduler.settle(until);
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::CollisionPoll => self.poll_collisions(),
            Task::CoinMotion => self.tick_coins(),
            Task::Countdown => self.tick_countdown(),
            Task::Jump => self.tick_jump(),
        }
    }

    // === Input ===

    /// Forward a key press to the character. Ignored unless the match is running.
    pub fn handle_key(&mut self, key: Key) {
        if self.lifecycle != Lifecycle::Running || self.state.is_terminal() {
            return;
        }
        match self.character.handle_key(key) {
            KeyEffect::Moved => {
                self.frontend
                    .render_position(self.character.id, self.character.pos);
            }
            KeyEffect::JumpStarted => {
                log::debug!("Jump from y={}", self.character.pos.y);
                self.handles.jump = self.register(self.tuning.jump_period_ms, Task::Jump);
            }
            KeyEffect::Ignored => {}
        }
    }

    /// Forward a DOM key name; anything other than the three arrows is dropped
    pub fn handle_key_name(&mut self, name: &str) {
        match Key::from_name(name) {
            Some(key) => self.handle_key(key),
            None => log::trace!("Ignoring key {:?}", name),
        }
    }

    // === Periodic tasks ===

    /// Collect touching coins, then check rocks. Stops at the first terminal outcome.
    pub fn poll_collisions(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        let bounds = self.character.bounds();

        while let Some(coin) = self.field.take_overlapping(&bounds) {
            self.frontend.remove_entity(coin.id);
            if let Err(e) = self.frontend.play_sound(Sound::CoinCollect) {
                log::warn!("Coin sound failed: {}", e);
            }
            self.state.score += self.tuning.coin_reward;
            log::debug!(
                "Collected coin {} (score {}, {} left)",
                coin.id.index,
                self.state.score,
                self.field.coins_left()
            );

            if self.state.score >= self.tuning.win_score {
                self.finish(Outcome::Won);
                return;
            }
        }

        if let Some(rock) = self.field.rock_hit(&bounds) {
            log::debug!("Hit rock {} at x={}", rock.id.index, rock.pos.x);
            self.finish(Outcome::Lost);
        }
    }

    /// Bob every coin one step and redraw it
    pub fn tick_coins(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.field.tick();
        for coin in &self.field.coins {
            self.frontend.render_position(coin.id, coin.pos);
        }
    }

    /// Take one second off the clock
    pub fn tick_countdown(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs == 0 {
            self.finish(Outcome::TimedOut);
        }
    }

    /// Advance the jump arc; the jump task ends itself on landing
    pub fn tick_jump(&mut self) {
        if self.state.is_terminal() || !self.character.phase.is_airborne() {
            return;
        }
        let phase = self.character.step_jump();
        self.frontend
            .render_position(self.character.id, self.character.pos);

        if phase == JumpPhase::Grounded {
            log::debug!("Landed at x={}", self.character.pos.x);
            if let Some(handle) = self.handles.jump.take() {
                self.scheduler.cancel(handle);
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        if !self.state.finish(outcome) {
            return;
        }
        self.lifecycle = Lifecycle::Stopped;
        self.cancel_tasks();

        let message = outcome.message(self.state.score);
        log::info!(
            "Match over: {} with {} points, {}s left",
            outcome.as_str(),
            self.state.score,
            self.state.remaining_secs
        );
        self.frontend.notify(&message);
    }

    // === Queries ===

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn remaining_time(&self) -> u32 {
        self.state.remaining_secs
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn field(&self) -> &PickupField {
        &self.field
    }

    /// Simulated time since start
    pub fn elapsed_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Registered periodic tasks
    pub fn active_tasks(&self) -> usize {
        self.scheduler.active_count()
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn into_frontend(self) -> F {
        self.frontend
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            score: self.state.score,
            remaining_secs: self.state.remaining_secs,
            outcome: self.state.outcome,
            character: self.character.pos,
            coins_left: self.field.coins_left(),
            elapsed_ms: self.scheduler.now_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::platform::recording::{Call, Recording};
    use crate::sim::field::{Coin, Rock};

    fn coin_at(index: u32, x: f32, y: f32) -> Coin {
        Coin::fixed(
            EntityId::new(EntityKind::Coin, index),
            Vec2::new(x, y),
            &Tuning::default(),
        )
    }

    fn rock_at(index: u32, x: f32) -> Rock {
        let tuning = Tuning::default();
        Rock::new(
            EntityId::new(EntityKind::Rock, index),
            Vec2::new(x, tuning.rock_y()),
            tuning.rock_size,
        )
    }

    fn game_with(coins: Vec<Coin>, rocks: Vec<Rock>) -> Game<Recording> {
        let mut game = Game::with_field(
            Tuning::default(),
            PickupField::new(coins, rocks),
            Recording::default(),
        )
        .unwrap();
        game.start();
        game
    }

    #[test]
    fn test_start_renders_everything_once() {
        let mut game = game_with(vec![coin_at(0, 600.0, 100.0)], vec![rock_at(0, 400.0)]);
        assert_eq!(game.frontend().renders_of(game.character().id), 1);
        assert_eq!(game.active_tasks(), 3);

        // Second start is a no-op
        game.start();
        assert_eq!(game.frontend().calls.len(), 3);
        assert_eq!(game.active_tasks(), 3);
    }

    #[test]
    fn test_collect_coin_on_poll() {
        let mut game = game_with(vec![coin_at(0, 60.0, 480.0)], Vec::new());
        game.poll_collisions();

        assert_eq!(game.score(), 10);
        assert_eq!(game.field().coins_left(), 0);
        let coin_id = EntityId::new(EntityKind::Coin, 0);
        assert!(game.frontend().calls.contains(&Call::Remove(coin_id)));
        assert_eq!(game.frontend().sounds(), 1);
        assert_eq!(game.outcome(), Outcome::Ongoing);
    }

    #[test]
    fn test_win_short_circuits_rock_check() {
        // Ten coins and a rock all on top of the character
        let coins = (0..10).map(|i| coin_at(i, 55.0, 485.0)).collect();
        let mut game = game_with(coins, vec![rock_at(0, 60.0)]);

        game.poll_collisions();
        assert_eq!(game.outcome(), Outcome::Won);
        assert_eq!(game.score(), 100);
        assert_eq!(game.active_tasks(), 0);
        assert_eq!(
            game.frontend().notifications(),
            vec!["Congratulations! You won with 100 points!".to_string()]
        );
    }

    #[test]
    fn test_win_leaves_later_coins_in_place() {
        let coins = (0..12).map(|i| coin_at(i, 55.0, 485.0)).collect();
        let mut game = game_with(coins, Vec::new());
        game.poll_collisions();
        assert_eq!(game.outcome(), Outcome::Won);
        assert_eq!(game.field().coins_left(), 2);
    }

    #[test]
    fn test_rock_ends_match() {
        let mut game = game_with(Vec::new(), vec![rock_at(0, 80.0)]);
        game.advance(100);
        assert_eq!(game.outcome(), Outcome::Lost);
        assert_eq!(game.frontend().notifications().len(), 1);
        assert!(game.frontend().notifications()[0].contains("rock"));
    }

    #[test]
    fn test_timeout_after_sixty_seconds() {
        let mut game = game_with(Vec::new(), Vec::new());
        game.advance(59_999);
        assert_eq!(game.outcome(), Outcome::Ongoing);
        assert_eq!(game.remaining_time(), 1);

        game.advance(1);
        assert_eq!(game.outcome(), Outcome::TimedOut);
        assert_eq!(game.remaining_time(), 0);
        assert_eq!(game.active_tasks(), 0);
        assert_eq!(
            game.frontend().notifications(),
            vec!["Time's up! Final score: 0.".to_string()]
        );
    }

    #[test]
    fn test_terminal_state_freezes_match() {
        let mut game = game_with(vec![coin_at(0, 600.0, 100.0)], vec![rock_at(0, 80.0)]);
        game.poll_collisions();
        assert_eq!(game.outcome(), Outcome::Lost);

        let before = game.snapshot();
        let coin_y = game.field().coins[0].pos.y;
        let calls = game.frontend().calls.len();

        // Direct task calls, input and time all do nothing now
        game.poll_collisions();
        game.tick_countdown();
        game.tick_coins();
        game.tick_jump();
        game.handle_key(Key::Right);
        game.handle_key(Key::Up);
        game.advance(10_000);

        assert_eq!(game.snapshot(), before);
        assert_eq!(game.field().coins[0].pos.y, coin_y);
        assert_eq!(game.frontend().calls.len(), calls);
    }

    #[test]
    fn test_jump_runs_on_its_own_task() {
        let mut game = game_with(Vec::new(), Vec::new());
        game.handle_key(Key::Up);
        assert_eq!(game.character().phase, JumpPhase::Ascending);
        assert_eq!(game.active_tasks(), 4);

        // Second press mid-air registers nothing
        game.advance(20);
        game.handle_key(Key::Up);
        assert_eq!(game.active_tasks(), 4);
        assert_eq!(game.character().pos.y, 460.0);

        // 23 ticks up, 46 down at 20 ms each
        game.advance(69 * 20 - 20);
        assert_eq!(game.character().phase, JumpPhase::Grounded);
        assert_eq!(game.character().pos.y, 480.0);
        assert_eq!(game.active_tasks(), 3);
    }

    #[test]
    fn test_match_ending_mid_jump_freezes_character() {
        // A ledge rock hanging above the start spot, hit on the way up
        let ledge = Rock::new(
            EntityId::new(EntityKind::Rock, 0),
            Vec2::new(50.0, 300.0),
            40.0,
        );
        let mut game = game_with(Vec::new(), vec![ledge]);
        game.handle_key(Key::Up);

        // Poll at 100 ms sees y = 400, clear of the ledge
        game.advance(100);
        assert_eq!(game.outcome(), Outcome::Ongoing);

        // Poll at 200 ms runs before the jump tick and sees y = 300
        game.advance(100);
        assert_eq!(game.outcome(), Outcome::Lost);
        assert_eq!(game.character().phase, JumpPhase::Ascending);
        assert_eq!(game.active_tasks(), 0);

        let frozen = game.character().pos;
        assert_eq!(frozen, Vec2::new(50.0, 300.0));
        game.advance(5_000);
        game.handle_key(Key::Up);
        assert_eq!(game.character().pos, frozen);
        assert_eq!(game.character().phase, JumpPhase::Ascending);

        let frontend = game.frontend();
        assert_eq!(frontend.last_position(game.character().id), Some(frozen));
        assert_eq!(frontend.notifications().len(), 1);
    }

    #[test]
    fn test_keys_ignored_before_start_and_after_stop() {
        let mut game = Game::with_field(
            Tuning::default(),
            PickupField::default(),
            Recording::default(),
        )
        .unwrap();
        game.handle_key(Key::Right);
        assert_eq!(game.character().pos.x, 50.0);

        game.start();
        game.handle_key_name("ArrowRight");
        game.handle_key_name("d");
        assert_eq!(game.character().pos.x, 60.0);

        game.stop();
        assert!(!game.is_running());
        assert_eq!(game.active_tasks(), 0);
        game.handle_key(Key::Right);
        game.advance(120_000);
        assert_eq!(game.character().pos.x, 60.0);
        assert_eq!(game.outcome(), Outcome::Ongoing);
        assert!(game.frontend().notifications().is_empty());
    }

    #[test]
    fn test_sound_failure_does_not_affect_match() {
        let mut game = game_with(vec![coin_at(0, 60.0, 480.0)], Vec::new());
        game.frontend_mut().fail_sounds = true;
        game.poll_collisions();
        assert_eq!(game.score(), 10);
        assert_eq!(game.outcome(), Outcome::Ongoing);
    }

    #[test]
    fn test_coins_render_every_coin_tick() {
        let mut game = game_with(vec![coin_at(0, 600.0, 100.0)], Vec::new());
        let coin_id = EntityId::new(EntityKind::Coin, 0);
        game.advance(200);
        // One at start plus four coin ticks
        assert_eq!(game.frontend().renders_of(coin_id), 5);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            coin_period_ms: 0,
            ..Tuning::default()
        };
        assert!(Game::new(tuning, 1, Recording::default()).is_err());
    }
}
