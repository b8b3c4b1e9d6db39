//! term-2048: a 2048 move-execution engine plus a small terminal driver.
//!
//! This crate provides:
//! - An N×N `Board` and the slide/merge algorithm (`engine::shift`)
//! - A `Game` session with a legal-move counter, tile spawning and win/loss detection
//! - Random self-play (`autoplay`) and a crossterm front end (`render`, `ui`)
//!
//! Quick start:
//! ```
//! use term_2048::engine::{Game, GameState, Move};
//!
//! // Deterministic session with a seeded RNG
//! let mut game = Game::seeded(4, 42);
//! for dir in [Move::Left, Move::Up, Move::Right, Move::Down] {
//!     game.execute_move(dir);
//! }
//! assert_eq!(game.state(), GameState::Playing);
//! assert!(game.get_move_count() <= 4);
//! ```
//!
//! Any `rand::Rng` can drive spawns and random moves:
//! ```
//! use term_2048::engine::{Board, Game, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let board = Board::from_rows(&[
//!     vec![2, 2, 0, 0],
//!     vec![0, 0, 0, 0],
//!     vec![0, 0, 0, 0],
//!     vec![0, 0, 0, 0],
//! ]).unwrap();
//! let mut game = Game::from_board(board, StdRng::seed_from_u64(7));
//! let outcome = game.execute_move(Move::Left);
//! assert!(outcome.moved);
//! assert_eq!(game.get_value(0, 0), 4);
//! assert_eq!(game.get_move_count(), 1);
//! ```
//!
pub mod autoplay;
pub mod engine;
pub mod error;
pub mod render;
pub mod ui;

pub use error::EngineError;
