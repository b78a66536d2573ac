use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GridSize, SCORE_INCREMENT};
use crate::food::spawn_position;
use crate::input::{Direction, GameInput, direction_change_is_valid};
use crate::snake::{Position, Snake};

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// What a single call to [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The run predicate did not hold; nothing changed.
    Idle,
    Moved,
    /// The snake ate and grew. Carries the new high score when one was set.
    Ate { new_high_score: Option<u32> },
    Ended(EndReason),
}

/// Complete mutable game state for one session.
///
/// Only [`reset`](Self::reset), [`start`](Self::start),
/// [`steer`](Self::steer) and [`tick`](Self::tick) mutate it; everything
/// else reads through accessors.
#[derive(Debug, Clone)]
pub struct GameState {
    snake: Snake,
    food: Position,
    /// `None` until the snake has a heading.
    direction: Option<Direction>,
    started: bool,
    over: bool,
    score: u32,
    high_score: u32,
    /// Set once this run has beaten the previous high score.
    new_high_score: bool,
    end_reason: Option<EndReason>,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh state seeded from OS entropy.
    #[must_use]
    pub fn new(bounds: GridSize, high_score: u32) -> Self {
        Self::from_rng(bounds, high_score, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, high_score: u32, seed: u64) -> Self {
        Self::from_rng(bounds, high_score, StdRng::seed_from_u64(seed))
    }

    /// Creates an already-started state with an explicit layout.
    ///
    /// Used to set up scenarios and replays; the caller is responsible for
    /// passing a snake that lies inside `bounds` and food off the snake.
    #[must_use]
    pub fn with_layout(
        bounds: GridSize,
        snake: Snake,
        food: Position,
        direction: Option<Direction>,
        seed: u64,
    ) -> Self {
        debug_assert!(snake.segments().all(|s| s.is_within_bounds(bounds)));
        debug_assert!(!snake.occupies(food));

        Self {
            snake,
            food,
            direction,
            started: true,
            over: false,
            score: 0,
            high_score: 0,
            new_high_score: false,
            end_reason: None,
            bounds,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Replaces the carried-over high score.
    #[must_use]
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    fn from_rng(bounds: GridSize, high_score: u32, rng: StdRng) -> Self {
        let start = Position::center(bounds);
        let mut state = Self {
            snake: Snake::new(start),
            food: start,
            direction: None,
            started: false,
            over: false,
            score: 0,
            high_score,
            new_high_score: false,
            end_reason: None,
            bounds,
            rng,
        };
        state.reset();
        state
    }

    /// Returns to the title state. The high score is kept.
    pub fn reset(&mut self) {
        let start = Position::center(self.bounds);
        self.snake = Snake::new(start);
        self.direction = None;
        self.started = false;
        self.over = false;
        self.score = 0;
        self.new_high_score = false;
        self.end_reason = None;
        // Only a 1x1 grid has no free cell next to a fresh snake.
        self.food = spawn_position(&mut self.rng, self.bounds, &self.snake).unwrap_or(start);
    }

    /// Starts the run heading right. A second call is a no-op.
    pub fn start(&mut self) {
        if self.started {
            return;
        }

        self.started = true;
        self.direction = Some(Direction::Right);
    }

    /// Requests a new heading. Returns whether it was accepted.
    ///
    /// Ignored before the game is started; direct reversals are rejected
    /// once the snake is moving. The latest accepted heading wins.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if !self.started || !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.direction = Some(direction);
        true
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                let _ = self.steer(direction);
            }
            GameInput::Confirm if self.is_start_screen() => self.start(),
            GameInput::Confirm | GameInput::Restart if self.over => self.reset(),
            GameInput::Confirm | GameInput::Restart | GameInput::Quit => {}
        }
    }

    /// Whether the periodic tick should run.
    #[must_use]
    pub fn should_tick(&self) -> bool {
        self.started && !self.over && self.direction.is_some()
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Collision is checked against the body before the tail moves, so
    /// stepping into the cell the tail is about to leave ends the run.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.should_tick() {
            return TickOutcome::Idle;
        }
        let Some(direction) = self.direction else {
            return TickOutcome::Idle;
        };

        let new_head = self.snake.head().step(direction);
        if !new_head.is_within_bounds(self.bounds) {
            return self.end(EndReason::WallCollision);
        }

        if self.snake.occupies(new_head) {
            return self.end(EndReason::SelfCollision);
        }

        if new_head != self.food {
            self.snake.advance(new_head, false);
            return TickOutcome::Moved;
        }

        self.snake.advance(new_head, true);
        self.score += SCORE_INCREMENT;

        let new_high_score = if self.score > self.high_score {
            self.high_score = self.score;
            self.new_high_score = true;
            Some(self.score)
        } else {
            None
        };

        match spawn_position(&mut self.rng, self.bounds, &self.snake) {
            Some(food) => self.food = food,
            None => {
                self.over = true;
                self.end_reason = Some(EndReason::BoardFilled);
            }
        }

        TickOutcome::Ate { new_high_score }
    }

    fn end(&mut self, reason: EndReason) -> TickOutcome {
        self.over = true;
        self.end_reason = Some(reason);
        TickOutcome::Ended(reason)
    }

    /// True before the first start and after each reset.
    #[must_use]
    pub fn is_start_screen(&self) -> bool {
        !self.started && !self.over
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Position {
        self.food
    }

    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// True once the current run has set a new high score.
    #[must_use]
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }
}
