use std::fmt;
use std::ops::Index;

use crate::engine::Move;
use crate::error::EngineError;

/// Which kind of line a move walks over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

/// An N×N 2048 board stored row-major in one contiguous buffer.
///
/// A cell holds 0 when empty, otherwise a power of two >= 2. Every write goes
/// through [`Board::set`]/[`Board::try_set`], which enforce that invariant.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<u32>,
}

/// True for 0 (empty) and powers of two >= 2.
#[inline]
pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

impl Board {
    /// An all-empty board of side `size`. Callers are expected to have
    /// validated `size` (see [`crate::engine::normalize_grid_size`]).
    pub fn empty(size: usize) -> Self {
        Board { size, cells: vec![0; size * size] }
    }

    /// Build a board from explicit rows.
    ///
    /// ```
    /// use term_2048::engine::Board;
    /// let b = Board::from_rows(&[vec![2, 0], vec![0, 4]]).unwrap();
    /// assert_eq!(b.get(1, 1), 4);
    /// ```
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, EngineError> {
        let size = rows.len();
        if size < 2 {
            return Err(EngineError::TooSmall(size));
        }
        let mut board = Board::empty(size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(EngineError::NotSquare { row, len: values.len(), expected: size });
            }
            for (col, &value) in values.iter().enumerate() {
                board.try_set(row, col, value)?;
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index_of(&self, row: usize, col: usize) -> Result<usize, EngineError> {
        if row >= self.size || col >= self.size {
            return Err(EngineError::OutOfRange { row, col, size: self.size });
        }
        Ok(row * self.size + col)
    }

    /// Checked read.
    pub fn try_get(&self, row: usize, col: usize) -> Result<u32, EngineError> {
        self.index_of(row, col).map(|idx| self.cells[idx])
    }

    /// Checked write. Rejects out-of-range cells and non-tile values.
    pub fn try_set(&mut self, row: usize, col: usize, value: u32) -> Result<(), EngineError> {
        if !is_valid_tile(value) {
            return Err(EngineError::InvalidTile(value));
        }
        let idx = self.index_of(row, col)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Read a cell.
    ///
    /// # Panics
    /// If `row` or `col` is outside `[0, size)`. That is a caller bug, the
    /// same contract as slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        match self.try_get(row, col) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }

    /// Write a cell.
    ///
    /// # Panics
    /// If the cell is out of range or `value` is not 0 or a power of two >= 2.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u32) {
        if let Err(e) = self.try_set(row, col, value) {
            panic!("{e}");
        }
    }

    /// Read the `index`-th row or column as `size` values, ordered so the
    /// edge the tiles move toward comes first.
    pub fn extract_line(&self, axis: Axis, index: usize, direction: Move) -> Vec<u32> {
        let mut line: Vec<u32> = (0..self.size)
            .map(|i| match axis {
                Axis::Row => self.get(index, i),
                Axis::Column => self.get(i, index),
            })
            .collect();
        if direction.is_reversed() {
            line.reverse();
        }
        line
    }

    /// Inverse of [`Board::extract_line`]: undo the orientation and store the
    /// values back into the same row or column.
    ///
    /// # Panics
    /// If `values.len() != size`, or on an out-of-range `index`.
    pub fn write_line(&mut self, axis: Axis, index: usize, direction: Move, values: &[u32]) {
        assert_eq!(values.len(), self.size, "line length must equal board size");
        let n = self.size;
        for (i, &value) in values.iter().enumerate() {
            let pos = if direction.is_reversed() { n - 1 - i } else { i };
            match axis {
                Axis::Row => self.set(index, pos, value),
                Axis::Column => self.set(pos, index, value),
            }
        }
    }

    /// Row-major iterator over all tile values.
    pub fn tiles(&self) -> impl Iterator<Item = u32> + '_ {
        self.cells.iter().copied()
    }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 0)
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Largest tile on the board, 0 if empty.
    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of every tile on the board.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// True if two neighbours in the same row or column hold the same non-zero value.
    pub fn has_adjacent_pair(&self) -> bool {
        let n = self.size;
        for row in 0..n {
            for col in 0..n {
                let v = self.cells[row * n + col];
                if v == 0 {
                    continue;
                }
                if col + 1 < n && self.cells[row * n + col + 1] == v {
                    return true;
                }
                if row + 1 < n && self.cells[(row + 1) * n + col] == v {
                    return true;
                }
            }
        }
        false
    }

    /// Copy of the board as nested rows.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.size).map(|r| r.to_vec()).collect()
    }

    pub(crate) fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = 0);
    }
}

impl Index<(usize, usize)> for Board {
    type Output = u32;

    fn index(&self, (row, col): (usize, usize)) -> &u32 {
        match self.index_of(row, col) {
            Ok(idx) => &self.cells[idx],
            Err(e) => panic!("{e}"),
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board").field("size", &self.size).field("rows", &self.rows()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: u32) -> String {
    match val {
        0 => String::from("      "),
        x => format!("{x:^6}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board {
        Board::from_rows(&[
            vec![2, 4, 8, 16],
            vec![32, 64, 128, 256],
            vec![512, 1024, 2048, 4096],
            vec![0, 2, 0, 4],
        ])
        .unwrap()
    }

    #[test]
    fn get_and_set_in_range() {
        let mut b = Board::empty(3);
        assert_eq!(b.get(2, 2), 0);
        b.set(2, 1, 8);
        assert_eq!(b.get(2, 1), 8);
        assert_eq!(b[(2, 1)], 8);
        assert_eq!(b.count_empty(), 8);
    }

    #[test]
    fn out_of_range_is_reported() {
        let mut b = Board::empty(4);
        assert_eq!(b.try_get(4, 0), Err(EngineError::OutOfRange { row: 4, col: 0, size: 4 }));
        assert_eq!(b.try_set(0, 9, 2), Err(EngineError::OutOfRange { row: 0, col: 9, size: 4 }));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_out_of_range_panics() {
        Board::empty(4).get(0, 4);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_out_of_range_panics() {
        let b = Board::empty(2);
        let _v = b[(2, 0)];
    }

    #[test]
    fn non_tile_values_are_rejected() {
        let mut b = Board::empty(2);
        assert_eq!(b.try_set(0, 0, 3), Err(EngineError::InvalidTile(3)));
        assert_eq!(b.try_set(0, 0, 1), Err(EngineError::InvalidTile(1)));
        assert!(b.try_set(0, 0, 1 << 20).is_ok());
    }

    #[test]
    fn from_rows_validates_shape() {
        assert_eq!(Board::from_rows(&[vec![2]]), Err(EngineError::TooSmall(1)));
        assert_eq!(
            Board::from_rows(&[vec![2, 0], vec![0]]),
            Err(EngineError::NotSquare { row: 1, len: 1, expected: 2 })
        );
    }

    #[test]
    fn extract_line_orients_toward_target_edge() {
        let b = sample();
        assert_eq!(b.extract_line(Axis::Row, 0, Move::Left), vec![2, 4, 8, 16]);
        assert_eq!(b.extract_line(Axis::Row, 0, Move::Right), vec![16, 8, 4, 2]);
        assert_eq!(b.extract_line(Axis::Column, 1, Move::Up), vec![4, 64, 1024, 2]);
        assert_eq!(b.extract_line(Axis::Column, 1, Move::Down), vec![2, 1024, 64, 4]);
    }

    #[test]
    fn write_line_restores_orientation() {
        let original = sample();
        for dir in Move::ALL {
            let mut b = original.clone();
            for idx in 0..4 {
                let line = b.extract_line(dir.axis(), idx, dir);
                b.write_line(dir.axis(), idx, dir, &line);
            }
            assert_eq!(b, original, "{dir}");
        }

        let mut b = Board::empty(4);
        b.write_line(Axis::Row, 3, Move::Right, &[4, 2, 0, 0]);
        assert_eq!(b.rows()[3], vec![0, 0, 2, 4]);
        b.write_line(Axis::Column, 0, Move::Down, &[8, 0, 0, 0]);
        assert_eq!(b.get(3, 0), 8);
    }

    #[test]
    fn queries() {
        let b = sample();
        assert_eq!(b.highest_tile(), 4096);
        assert_eq!(b.count_empty(), 2);
        assert_eq!(b.empty_cells(), vec![(3, 0), (3, 2)]);
        assert!(!b.has_adjacent_pair());
        assert_eq!(Board::empty(3).highest_tile(), 0);

        let pair = Board::from_rows(&[vec![2, 4], vec![8, 4]]).unwrap();
        assert!(pair.has_adjacent_pair());
        let zeros = Board::from_rows(&[vec![0, 0], vec![2, 4]]).unwrap();
        assert!(!zeros.has_adjacent_pair());
    }

    #[test]
    fn display_one_line_per_row() {
        let b = Board::from_rows(&[vec![2, 0], vec![0, 16]]).unwrap();
        let s = b.to_string();
        assert_eq!(s.lines().count(), 2);
        assert!(s.contains("  2   "));
        assert!(s.contains("  16  "));
    }
}
