use std::time::{Duration, Instant};

use crate::config::{GRID, GridSize, TICK_INTERVAL_MS};
use crate::game::{GameState, TickOutcome};
use crate::input::GameInput;
use crate::schedule::TickScheduler;
use crate::score::HighScoreStore;

/// Owns the game state, its tick schedule and the high-score store.
///
/// Timer ticks and key input both go through `&mut self`, so a tick is
/// never observed half-applied and input lands between ticks.
#[derive(Debug)]
pub struct GameEngine<S: HighScoreStore> {
    state: GameState,
    scheduler: TickScheduler,
    store: S,
}

impl<S: HighScoreStore> GameEngine<S> {
    /// Creates an engine on the fixed 20x20 grid, loading the high score.
    pub fn new(store: S) -> Self {
        let high_score = load_high_score(&store);
        Self::from_state(GameState::new(GRID, high_score), store)
    }

    /// Creates an engine with a seeded state, for tests and replays.
    pub fn new_with_seed(bounds: GridSize, store: S, seed: u64) -> Self {
        let high_score = load_high_score(&store);
        Self::from_state(GameState::new_with_seed(bounds, high_score, seed), store)
    }

    /// Wraps an existing state. The scheduler starts idle.
    pub fn from_state(state: GameState, store: S) -> Self {
        Self {
            state,
            scheduler: TickScheduler::new(Duration::from_millis(TICK_INTERVAL_MS)),
            store,
        }
    }

    /// Read-only view for the presentation layer.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.scheduler.is_active()
    }

    pub fn start(&mut self, now: Instant) {
        if !self.state.is_started() {
            self.state.start();
            log::info!("Game started");
        }
        self.sync_schedule(now);
    }

    pub fn reset(&mut self, now: Instant) {
        self.state.reset();
        log::debug!("Game reset");
        self.sync_schedule(now);
    }

    /// Applies one input event and re-arms or cancels the tick schedule.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) {
        let was_start_screen = self.state.is_start_screen();
        self.state.apply_input(input);
        if was_start_screen && self.state.is_started() {
            log::info!("Game started");
        }
        self.sync_schedule(now);
    }

    /// Runs a tick if one is due at `now`.
    pub fn update(&mut self, now: Instant) -> TickOutcome {
        if !self.scheduler.poll(now) {
            return TickOutcome::Idle;
        }
        self.step(now)
    }

    /// Runs one tick immediately, regardless of the schedule.
    pub fn step(&mut self, now: Instant) -> TickOutcome {
        let was_over = self.state.is_over();
        let outcome = self.state.tick();

        if let TickOutcome::Ate {
            new_high_score: Some(score),
        } = outcome
        {
            log::info!("New high score: {score}");
            self.persist_high_score(score);
        }

        if !was_over && self.state.is_over() {
            log::info!(
                "Game over ({:?}) with score {}",
                self.state.end_reason(),
                self.state.score()
            );
        }

        // Stop the timer in the same step that ended the run.
        self.sync_schedule(now);
        outcome
    }

    fn sync_schedule(&mut self, now: Instant) {
        if self.state.should_tick() {
            self.scheduler.start(now);
        } else {
            self.scheduler.cancel();
        }
    }

    fn persist_high_score(&mut self, score: u32) {
        if let Err(error) = self.store.save(score) {
            log::warn!("Failed to save high score: {error}");
        }
    }
}

fn load_high_score<S: HighScoreStore>(store: &S) -> u32 {
    match store.load() {
        Ok(score) => score,
        Err(error) => {
            log::warn!("Failed to load high score, starting from 0: {error}");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::{GRID, TICK_INTERVAL_MS};
    use crate::game::{GameState, TickOutcome};
    use crate::input::{Direction, GameInput};
    use crate::score::{HighScoreStore, MemoryStore, ScoreError};
    use crate::snake::{Position, Snake};

    use super::GameEngine;

    const INTERVAL: Duration = Duration::from_millis(TICK_INTERVAL_MS);

    #[derive(Debug, Default)]
    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&self) -> Result<u32, ScoreError> {
            Err(std::io::Error::other("storage unavailable").into())
        }

        fn save(&mut self, _score: u32) -> Result<(), ScoreError> {
            Err(std::io::Error::other("storage unavailable").into())
        }
    }

    fn feeding_state(high_score: u32) -> GameState {
        let snake = Snake::from_segments(vec![Position::new(10, 10)]).expect("non-empty");
        GameState::with_layout(
            GRID,
            snake,
            Position::new(11, 10),
            Some(Direction::Right),
            1,
        )
        .with_high_score(high_score)
    }

    #[test]
    fn loads_high_score_from_store() {
        let engine = GameEngine::new_with_seed(GRID, MemoryStore::with_high_score(120), 1);

        assert_eq!(engine.state().high_score(), 120);
        assert!(!engine.is_scheduled());
    }

    #[test]
    fn new_high_score_is_written_exactly_once() {
        let mut engine = GameEngine::from_state(feeding_state(0), MemoryStore::default());

        engine.step(Instant::now());

        assert_eq!(engine.store().writes(), &[10]);
        assert_eq!(engine.state().high_score(), 10);
    }

    #[test]
    fn score_not_surpassing_high_score_writes_nothing() {
        let mut engine = GameEngine::from_state(
            feeding_state(100),
            MemoryStore::with_high_score(100),
        );

        let outcome = engine.step(Instant::now());

        assert_eq!(
            outcome,
            TickOutcome::Ate {
                new_high_score: None
            }
        );
        assert!(engine.store().writes().is_empty());
    }

    #[test]
    fn persistence_failures_do_not_stop_the_game() {
        let engine = GameEngine::new_with_seed(GRID, BrokenStore, 2);
        assert_eq!(engine.state().high_score(), 0);

        let mut engine = GameEngine::from_state(feeding_state(0), BrokenStore);
        let outcome = engine.step(Instant::now());

        assert_eq!(
            outcome,
            TickOutcome::Ate {
                new_high_score: Some(10)
            }
        );
        assert_eq!(engine.state().high_score(), 10);
        assert!(!engine.state().is_over());
    }

    #[test]
    fn start_arms_schedule_and_ticks_follow_interval() {
        let mut engine = GameEngine::new_with_seed(GRID, MemoryStore::default(), 3);
        let t0 = Instant::now();

        assert_eq!(engine.update(t0 + INTERVAL), TickOutcome::Idle);

        engine.handle_input(GameInput::Confirm, t0);
        assert!(engine.is_scheduled());

        assert_eq!(engine.update(t0 + INTERVAL / 2), TickOutcome::Idle);
        assert_ne!(engine.update(t0 + INTERVAL), TickOutcome::Idle);
        assert_eq!(engine.state().snake().head(), Position::new(11, 10));
    }

    #[test]
    fn double_start_keeps_cadence_and_heading() {
        let mut engine = GameEngine::new_with_seed(GRID, MemoryStore::default(), 5);
        let t0 = Instant::now();

        engine.start(t0);
        engine.handle_input(GameInput::Direction(Direction::Down), t0);
        engine.start(t0 + INTERVAL / 2);

        assert_eq!(engine.state().direction(), Some(Direction::Down));
        assert_ne!(engine.update(t0 + INTERVAL), TickOutcome::Idle);
        assert_eq!(engine.state().snake().head(), Position::new(10, 11));
    }

    #[test]
    fn game_over_cancels_schedule() {
        let snake = Snake::from_segments(vec![Position::new(19, 10)]).expect("non-empty");
        let state = GameState::with_layout(
            GRID,
            snake,
            Position::new(0, 0),
            Some(Direction::Right),
            4,
        );
        let mut engine = GameEngine::from_state(state, MemoryStore::default());
        let t0 = Instant::now();
        engine.handle_input(GameInput::Direction(Direction::Right), t0);
        assert!(engine.is_scheduled());

        let outcome = engine.update(t0 + INTERVAL);

        assert!(matches!(outcome, TickOutcome::Ended(_)));
        assert!(engine.state().is_over());
        assert!(!engine.is_scheduled());
        assert_eq!(engine.update(t0 + INTERVAL * 3), TickOutcome::Idle);
    }

    #[test]
    fn reset_keeps_high_score_and_stops_schedule() {
        let mut engine = GameEngine::from_state(feeding_state(0), MemoryStore::default());
        let t0 = Instant::now();
        engine.step(t0);

        engine.reset(t0);

        assert!(engine.state().is_start_screen());
        assert_eq!(engine.state().score(), 0);
        assert_eq!(engine.state().high_score(), 10);
        assert!(!engine.is_scheduled());
    }
}
