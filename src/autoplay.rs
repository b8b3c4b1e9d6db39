//! Random self-play: keep playing random moves, resetting after every lost
//! game, until a game is won or a game cap is reached.

use std::ops::ControlFlow;

use log::info;
use rand::Rng;

use crate::engine::{Game, GameState, Move, MoveOutcome};

/// Running totals handed to the observer after every move attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Finished games, including the one that just ended if any.
    pub games_played: u64,
    /// Legal moves across all games.
    pub total_moves: u64,
}

/// How an autoplay run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub tally: Tally,
    pub won: bool,
    /// The observer asked to stop.
    pub interrupted: bool,
    /// Best tile seen at the end of any game.
    pub best_tile: u32,
}

/// One observed step of the run.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub direction: Move,
    pub outcome: MoveOutcome,
    pub tally: Tally,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Autoplay {
    /// Stop after this many finished games; `None` plays until a win.
    pub max_games: Option<u64>,
}

impl Autoplay {
    pub fn new(max_games: Option<u64>) -> Self {
        Autoplay { max_games }
    }

    /// Drive `game` with random moves. `observe` sees the session after every
    /// move attempt and can break out early.
    ///
    /// A lost game is reset and counted; a won game ends the run with the
    /// winning board left in place.
    pub fn run<R, F>(&self, game: &mut Game<R>, mut observe: F) -> Report
    where
        R: Rng,
        F: FnMut(&Game<R>, &Step) -> ControlFlow<()>,
    {
        let mut tally = Tally::default();
        let mut best_tile = 0;
        loop {
            while game.state() == GameState::Playing {
                let (direction, outcome) = game.execute_random_move();
                if outcome.moved {
                    tally.total_moves += 1;
                }
                let step = Step { direction, outcome, tally };
                if observe(game, &step).is_break() {
                    best_tile = best_tile.max(game.board().highest_tile());
                    return Report { tally, won: false, interrupted: true, best_tile };
                }
            }

            tally.games_played += 1;
            best_tile = best_tile.max(game.board().highest_tile());
            let won = game.is_game_won();
            info!(
                "game {} {} after {} moves (best tile {})",
                tally.games_played,
                if won { "won" } else { "lost" },
                game.get_move_count(),
                game.board().highest_tile()
            );
            if won {
                return Report { tally, won: true, interrupted: false, best_tile };
            }
            if self.max_games.is_some_and(|cap| tally.games_played >= cap) {
                return Report { tally, won: false, interrupted: false, best_tile };
            }
            game.reset();
        }
    }
}
