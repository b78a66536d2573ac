use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit vector `(dx, dy)`; y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    /// Enter/Space: start on the title screen, restart after game over.
    Confirm,
    Restart,
    Quit,
}

/// Returns whether a direction change is legal.
///
/// `current == None` means the snake has not moved yet, in which case any
/// direction is accepted. Otherwise immediate 180° turns are rejected.
#[must_use]
pub fn direction_change_is_valid(current: Option<Direction>, next: Direction) -> bool {
    match current {
        None => true,
        Some(current) => next != current.opposite(),
    }
}

/// Maps one of the eight steering keys (arrows, `w`/`a`/`s`/`d`) to a direction.
#[must_use]
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

/// Translates a terminal key event into a game input, if it means anything.
#[must_use]
pub fn input_for_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    if let Some(direction) = direction_for_key(key.code) {
        return Some(GameInput::Direction(direction));
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Confirm),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameInput::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

/// Polls the terminal for key events without blocking the frame loop.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Drains pending terminal events, returning the first meaningful input.
    ///
    /// Waits at most `timeout` for the first event. Unrecognized keys and
    /// non-key events are skipped.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        let mut wait = timeout;
        while event::poll(wait)? {
            wait = Duration::ZERO;
            if let Event::Key(key) = event::read()? {
                if let Some(input) = input_for_key(key) {
                    return Ok(Some(input));
                }
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{
        Direction, GameInput, direction_change_is_valid, direction_for_key, input_for_key,
    };

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn opposite_deltas_cancel_out() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn reversal_is_rejected_while_moving() {
        assert!(!direction_change_is_valid(
            Some(Direction::Up),
            Direction::Down
        ));
        assert!(!direction_change_is_valid(
            Some(Direction::Left),
            Direction::Right
        ));

        assert!(direction_change_is_valid(Some(Direction::Up), Direction::Left));
        assert!(direction_change_is_valid(Some(Direction::Up), Direction::Up));
    }

    #[test]
    fn any_direction_is_accepted_before_first_move() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert!(direction_change_is_valid(None, direction));
        }
    }

    #[test]
    fn arrows_and_wasd_map_to_the_same_directions() {
        assert_eq!(direction_for_key(KeyCode::Up), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::Char('w')), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::Down), Some(Direction::Down));
        assert_eq!(direction_for_key(KeyCode::Char('s')), Some(Direction::Down));
        assert_eq!(direction_for_key(KeyCode::Left), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyCode::Char('a')), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyCode::Right), Some(Direction::Right));
        assert_eq!(
            direction_for_key(KeyCode::Char('d')),
            Some(Direction::Right)
        );
        assert_eq!(direction_for_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn control_keys_map_to_game_inputs() {
        assert_eq!(input_for_key(press(KeyCode::Enter)), Some(GameInput::Confirm));
        assert_eq!(
            input_for_key(press(KeyCode::Char(' '))),
            Some(GameInput::Confirm)
        );
        assert_eq!(
            input_for_key(press(KeyCode::Char('r'))),
            Some(GameInput::Restart)
        );
        assert_eq!(input_for_key(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(
            input_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
        assert_eq!(input_for_key(press(KeyCode::Tab)), None);
    }

    #[test]
    fn key_releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(input_for_key(release), None);
    }
}
