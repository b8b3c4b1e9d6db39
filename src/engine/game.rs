use log::trace;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::engine::{normalize_grid_size, ops, Board, GameState, Move, SPAWN_TILE, WIN_TILE};

/// What a single call to [`Game::execute_move`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    /// The move changed the board; a tile was spawned and the counter bumped.
    pub moved: bool,
    /// Sum of the tile values created by merges.
    pub merged: u64,
    /// Cell that received the new tile, if any.
    pub spawned: Option<(usize, usize)>,
}

/// A single 2048 session: a board, a legal-move counter and the random source
/// used for spawns and random moves.
///
/// The random source is a type parameter so tests and benches can inject a
/// seeded generator:
/// ```
/// use term_2048::engine::{Game, Move};
/// let mut game = Game::seeded(4, 7);
/// game.execute_move(Move::Left);
/// assert!(game.get_move_count() <= 1);
/// ```
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    board: Board,
    move_count: u64,
    rng: R,
}

impl Game<StdRng> {
    /// New session with an entropy-seeded RNG. Sizes below 2 fall back to
    /// [`crate::engine::DEFAULT_GRID_SIZE`].
    pub fn new(grid_size: usize) -> Self {
        Self::with_rng(grid_size, StdRng::from_entropy())
    }

    /// New session whose spawns and random moves are reproducible from `seed`.
    pub fn seeded(grid_size: usize, seed: u64) -> Self {
        Self::with_rng(grid_size, StdRng::seed_from_u64(seed))
    }
}

impl Default for Game<StdRng> {
    fn default() -> Self {
        Self::new(crate::engine::DEFAULT_GRID_SIZE)
    }
}

impl<R: Rng> Game<R> {
    /// New session drawing randomness from `rng`: an empty board with a
    /// single 2 in a random cell.
    pub fn with_rng(grid_size: usize, rng: R) -> Self {
        let size = normalize_grid_size(grid_size);
        let mut game = Game { board: Board::empty(size), move_count: 0, rng };
        game.spawn_tile();
        game
    }

    /// Session starting from an explicit position, with the counter at 0.
    pub fn from_board(board: Board, rng: R) -> Self {
        Game { board, move_count: 0, rng }
    }

    /// Back to the just-constructed state: fresh board with one 2, counter
    /// zeroed. The grid size is kept.
    pub fn reset(&mut self) {
        self.board.clear();
        self.move_count = 0;
        self.spawn_tile();
    }

    /// Slide/merge toward `direction`. If any line changed, the move counts:
    /// one 2 is spawned in a random empty cell and the counter goes up by
    /// one. Otherwise the board and counter are left untouched.
    pub fn execute_move(&mut self, direction: Move) -> MoveOutcome {
        let result = ops::shift(&self.board, direction);
        if !result.moved {
            trace!("{direction}: no change");
            return MoveOutcome::default();
        }
        self.board = result.board;
        let spawned = self.spawn_tile();
        self.move_count += 1;
        trace!("{direction}: merged {} spawned {:?} (move {})", result.merged, spawned, self.move_count);
        MoveOutcome { moved: true, merged: result.merged, spawned }
    }

    /// Execute a uniformly random direction and report which one was tried.
    pub fn execute_random_move(&mut self) -> (Move, MoveOutcome) {
        let direction = Move::random(&mut self.rng);
        (direction, self.execute_move(direction))
    }

    /// True iff some tile has reached [`WIN_TILE`].
    pub fn is_game_won(&self) -> bool {
        self.board.tiles().any(|v| v >= WIN_TILE)
    }

    /// True once the session is finished. Any empty cell keeps the game
    /// going. On a full board a winning tile ends it, and otherwise it
    /// continues only while two equal neighbours share a row or column.
    pub fn is_game_over(&self) -> bool {
        if self.board.count_empty() > 0 {
            return false;
        }
        if self.is_game_won() {
            return true;
        }
        !self.board.has_adjacent_pair()
    }

    /// Current state. `Won` takes precedence over `Over`.
    pub fn state(&self) -> GameState {
        if self.is_game_won() {
            GameState::Won
        } else if self.is_game_over() {
            GameState::Over
        } else {
            GameState::Playing
        }
    }

    pub fn get_move_count(&self) -> u64 {
        self.move_count
    }

    /// Tile at (`row`, `col`); 0 means empty.
    ///
    /// # Panics
    /// On out-of-range coordinates.
    pub fn get_value(&self, row: usize, col: usize) -> u32 {
        self.board.get(row, col)
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Put a 2 in an empty cell chosen uniformly at random. A full board is
    /// left alone.
    fn spawn_tile(&mut self) -> Option<(usize, usize)> {
        let empty = self.board.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let (row, col) = empty[self.rng.gen_range(0..empty.len())];
        self.board.set(row, col, SPAWN_TILE);
        Some((row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DEFAULT_GRID_SIZE;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn game(rows: &[Vec<u32>]) -> Game {
        Game::from_board(Board::from_rows(rows).unwrap(), rng())
    }

    fn single_two(game: &Game) -> bool {
        let tiles: Vec<u32> = game.board().tiles().collect();
        tiles.iter().filter(|&&v| v == 2).count() == 1 && tiles.iter().filter(|&&v| v != 0).count() == 1
    }

    #[test]
    fn new_game_has_single_two() {
        let g = Game::seeded(4, 1);
        assert_eq!(g.size(), 4);
        assert_eq!(g.get_move_count(), 0);
        assert!(single_two(&g));
        assert_eq!(g.state(), GameState::Playing);
    }

    #[test]
    fn invalid_size_uses_default() {
        assert_eq!(Game::seeded(0, 1).size(), DEFAULT_GRID_SIZE);
        assert_eq!(Game::seeded(1, 1).size(), DEFAULT_GRID_SIZE);
        assert_eq!(Game::seeded(6, 1).size(), 6);
        assert_eq!(Game::default().size(), DEFAULT_GRID_SIZE);
    }

    #[test]
    fn left_merge_spawns_and_counts() {
        let mut g = game(&[vec![2, 2, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]]);
        let out = g.execute_move(Move::Left);
        assert!(out.moved);
        assert_eq!(out.merged, 4);
        let (r, c) = out.spawned.unwrap();
        assert_ne!((r, c), (0, 0));
        assert_eq!(g.get_value(r, c), 2);
        assert_eq!(g.get_value(0, 0), 4);
        assert_eq!(g.board().count_empty(), 14);
        assert_eq!(g.get_move_count(), 1);
        // Row 0 only differs from [4,0,0,0] if the spawn landed there.
        for col in 1..4 {
            if (0, col) != (r, c) {
                assert_eq!(g.get_value(0, col), 0);
            }
        }
    }

    #[test]
    fn right_merge_across_gap() {
        let mut g = game(&[vec![2, 0, 0, 2], vec![0; 4], vec![0; 4], vec![0; 4]]);
        let out = g.execute_move(Move::Right);
        assert!(out.moved);
        assert_eq!(g.get_value(0, 3), 4);
        let (r, c) = out.spawned.unwrap();
        for col in 0..3 {
            if (0, col) != (r, c) {
                assert_eq!(g.get_value(0, col), 0);
            }
        }
    }

    #[test]
    fn illegal_move_is_a_no_op() {
        let rows = vec![vec![2, 4, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]];
        let mut g = game(&rows);
        let before = g.board().clone();
        let out = g.execute_move(Move::Left);
        assert_eq!(out, MoveOutcome::default());
        assert_eq!(g.board(), &before);
        assert_eq!(g.get_move_count(), 0);
        g.execute_move(Move::Up);
        assert_eq!(g.board(), &before);
        assert_eq!(g.get_move_count(), 0);
    }

    #[test]
    fn pure_merge_without_gap_counts_as_move() {
        let mut g = game(&[vec![2, 2], vec![4, 8]]);
        let out = g.execute_move(Move::Left);
        assert!(out.moved);
        assert_eq!(out.spawned, Some((0, 1)));
        assert_eq!(g.board().rows(), vec![vec![4, 2], vec![4, 8]]);
        assert_eq!(g.get_move_count(), 1);
    }

    #[test]
    fn ceiling_tiles_do_not_merge_in_a_session() {
        let top = 1u32 << 31;
        let mut g = game(&[vec![top, top], vec![0, 0]]);
        let out = g.execute_move(Move::Left);
        assert_eq!(out, MoveOutcome::default());
        assert_eq!(g.board().rows(), vec![vec![top, top], vec![0, 0]]);
        assert_eq!(g.get_move_count(), 0);
        assert!(g.execute_move(Move::Down).moved);
        assert!(g.board().tiles().all(|v| v == 0 || v.is_power_of_two()));
    }

    #[test]
    fn packed_board_without_pairs_is_over() {
        let mut g = game(&[vec![2, 4, 2, 4], vec![4, 2, 4, 2], vec![2, 4, 2, 4], vec![4, 2, 4, 2]]);
        let before = g.board().clone();
        for dir in Move::ALL {
            assert!(!g.execute_move(dir).moved);
        }
        assert_eq!(g.board(), &before);
        assert_eq!(g.get_move_count(), 0);
        assert!(g.is_game_over());
        assert!(!g.is_game_won());
        assert_eq!(g.state(), GameState::Over);
    }

    #[test]
    fn full_board_with_pair_is_not_over() {
        let g = game(&[vec![2, 4, 2, 4], vec![4, 2, 4, 2], vec![2, 4, 2, 4], vec![4, 2, 8, 8]]);
        assert!(!g.is_game_over());
        let g = game(&[vec![2, 4, 2, 4], vec![4, 2, 4, 2], vec![2, 4, 2, 8], vec![4, 2, 4, 8]]);
        assert!(!g.is_game_over());
    }

    #[test]
    fn empty_cell_means_not_over() {
        let g = game(&[vec![2048, 4], vec![0, 8]]);
        assert!(!g.is_game_over());
        assert!(g.is_game_won());
        assert_eq!(g.state(), GameState::Won);
    }

    #[test]
    fn full_board_with_winning_tile_is_over() {
        let g = game(&[vec![2048, 2048], vec![4, 8]]);
        assert!(g.is_game_over());
        assert_eq!(g.state(), GameState::Won);
    }

    #[test]
    fn win_threshold() {
        assert!(!game(&[vec![1024, 0], vec![0, 0]]).is_game_won());
        assert!(game(&[vec![0, 4096], vec![0, 0]]).is_game_won());
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut g = Game::seeded(5, 3);
        for _ in 0..50 {
            g.execute_random_move();
        }
        assert!(g.get_move_count() > 0);
        g.reset();
        assert_eq!(g.size(), 5);
        assert_eq!(g.get_move_count(), 0);
        assert!(single_two(&g));
    }

    #[test]
    fn seeded_sessions_are_reproducible() {
        let mut a = Game::seeded(4, 99);
        let mut b = Game::seeded(4, 99);
        for _ in 0..100 {
            assert_eq!(a.execute_random_move(), b.execute_random_move());
        }
        assert_eq!(a.board(), b.board());
    }
}
