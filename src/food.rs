use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Random draws attempted before falling back to enumerating free cells.
pub const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// Picks a uniformly random cell not occupied by the snake.
///
/// Uses rejection sampling; after [`MAX_SAMPLE_ATTEMPTS`] misses it picks
/// uniformly among the remaining free cells instead, so the call always
/// terminates. Returns `None` when the snake covers the whole grid.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if snake.len() >= bounds.total_cells() {
        return None;
    }

    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let candidate = random_cell(rng, bounds);
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    let candidates = free_cells(bounds, snake);
    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Position {
    Position {
        x: rng.gen_range(0..i32::from(bounds.width)),
        y: rng.gen_range(0..i32::from(bounds.height)),
    }
}

fn free_cells(bounds: GridSize, snake: &Snake) -> Vec<Position> {
    let mut candidates = Vec::new();

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    candidates
}
