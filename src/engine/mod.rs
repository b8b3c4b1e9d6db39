//! The 2048 move-execution engine.
//!
//! - [`Board`]: an N×N grid of tile values in one contiguous buffer.
//! - [`shift`]: the pure slide/merge of a whole board in one direction.
//! - [`Game`]: a session owning a board, a move counter and a random source.
//!
//! Randomness only enters through [`Game`] (tile spawns and random moves), and
//! the random source is a type parameter so tests can inject a seeded RNG.

use rand::Rng;
use std::fmt;

pub mod board;
pub mod game;
pub mod ops;

pub use board::{Axis, Board};
pub use game::{Game, MoveOutcome};
pub use ops::{shift, slide_line, ShiftResult};

/// Side length used when a requested grid size is unusable.
pub const DEFAULT_GRID_SIZE: usize = 4;

/// Tile value that wins the game.
pub const WIN_TILE: u32 = 2048;

/// Value of every freshly spawned tile.
pub const SPAWN_TILE: u32 = 2;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions in a fixed order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Pick one of the four directions uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Move {
        Move::ALL[rng.gen_range(0..Move::ALL.len())]
    }

    /// Columns move for Up/Down, rows for Left/Right.
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Move::Up | Move::Down => Axis::Column,
            Move::Left | Move::Right => Axis::Row,
        }
    }

    /// True when lines are read from the far end (Down reads bottom-to-top,
    /// Right reads right-to-left) so the target edge is always index 0.
    #[inline]
    pub fn is_reversed(self) -> bool {
        matches!(self, Move::Down | Move::Right)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        f.write_str(s)
    }
}

/// Where a session stands. `Won` and `Over` are terminal until `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Over,
}

/// Coerce a requested side length into a usable one: anything below 2 falls
/// back to [`DEFAULT_GRID_SIZE`].
pub fn normalize_grid_size(requested: usize) -> usize {
    if requested <= 1 {
        log::debug!("grid size {requested} is invalid, using {DEFAULT_GRID_SIZE}");
        DEFAULT_GRID_SIZE
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn grid_size_falls_back_to_default() {
        assert_eq!(normalize_grid_size(0), DEFAULT_GRID_SIZE);
        assert_eq!(normalize_grid_size(1), DEFAULT_GRID_SIZE);
        assert_eq!(normalize_grid_size(2), 2);
        assert_eq!(normalize_grid_size(7), 7);
    }

    #[test]
    fn orientation_per_direction() {
        assert_eq!(Move::Up.axis(), Axis::Column);
        assert_eq!(Move::Down.axis(), Axis::Column);
        assert_eq!(Move::Left.axis(), Axis::Row);
        assert_eq!(Move::Right.axis(), Axis::Row);
        assert!(Move::Down.is_reversed() && Move::Right.is_reversed());
        assert!(!Move::Up.is_reversed() && !Move::Left.is_reversed());
    }

    #[test]
    fn random_move_covers_all_directions() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let m = Move::random(&mut rng);
            let idx = Move::ALL.iter().position(|&d| d == m).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
