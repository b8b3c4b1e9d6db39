//! Slide/merge of single lines and whole boards. No randomness here.
//!
//! Every row or column is first read so that the edge the tiles move toward
//! is index 0 (see [`Board::extract_line`]), which makes the line algorithm
//! the same for all four directions:
//!
//! 1. compact: drop the zeros, keeping the order of the remaining tiles;
//! 2. merge: one left-to-right pass folding equal neighbours into their sum,
//!    never re-merging a tile created in the same pass;
//! 3. pad: refill with zeros up to the line length.

use crate::engine::{Board, Move};

/// Result of shifting a whole board in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftResult {
    pub board: Board,
    /// True if at least one line changed; only then is the move legal.
    pub moved: bool,
    /// Sum of the tile values created by merges during this shift.
    pub merged: u64,
}

/// Remove every empty cell, preserving the order of the tiles.
pub(crate) fn compact(line: &mut Vec<u32>) {
    line.retain(|&v| v != 0);
}

/// Single left-to-right merge pass over a compacted line. Returns the sum of
/// the values created.
///
/// A pair whose sum does not fit in a `u32` (two `1 << 31` tiles) stays apart.
pub(crate) fn merge(line: &mut Vec<u32>) -> u64 {
    let mut merged = 0;
    let mut idx = 0;
    while idx + 1 < line.len() {
        if line[idx] == line[idx + 1] {
            if let Some(doubled) = line[idx].checked_mul(2) {
                line[idx] = doubled;
                merged += u64::from(doubled);
                line.remove(idx + 1);
            }
        }
        idx += 1;
    }
    merged
}

pub(crate) fn pad(line: &mut Vec<u32>, len: usize) {
    line.resize(len, 0);
}

/// Slide and merge one oriented line toward index 0.
///
/// ```
/// use term_2048::engine::slide_line;
/// assert_eq!(slide_line(&[2, 2, 2, 2]).0, vec![4, 4, 0, 0]);
/// assert_eq!(slide_line(&[4, 0, 2, 2]).0, vec![4, 4, 0, 0]);
/// ```
pub fn slide_line(line: &[u32]) -> (Vec<u32>, u64) {
    let mut out = line.to_vec();
    compact(&mut out);
    let merged = merge(&mut out);
    pad(&mut out, line.len());
    (out, merged)
}

/// Slide/merge every line of `board` in `direction`, returning the new board
/// and whether anything moved.
pub fn shift(board: &Board, direction: Move) -> ShiftResult {
    let mut next = board.clone();
    let mut moved = false;
    let mut merged = 0;
    let axis = direction.axis();
    for index in 0..board.size() {
        let line = board.extract_line(axis, index, direction);
        let (slid, line_merged) = slide_line(&line);
        if slid != line {
            moved = true;
        }
        merged += line_merged;
        next.write_line(axis, index, direction, &slid);
    }
    ShiftResult { board: next, moved, merged }
}

/// True if a shift in any direction would change the board.
pub fn any_move_available(board: &Board) -> bool {
    Move::ALL.iter().any(|&dir| shift(board, dir).moved)
}
