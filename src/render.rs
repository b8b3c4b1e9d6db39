//! Text layout for the terminal driver.
//!
//! Nothing here touches the terminal: the functions turn a board and a few
//! counters into positioned strings, and [`crate::ui`] prints them. The
//! geometry mirrors a classic curses layout: a centered title on line 1, the
//! bordered board starting on line 3, and status lines under it.

use thiserror::Error;

use crate::engine::{Board, Move};

/// Title drawn at the top of the screen.
pub const TITLE: &str = "2048 - terminal edition";

const COUNT_LABEL: &str = "Number of Moves: ";
const LAST_MOVE_LABEL: &str = "Last Move: ";
const GAMES_LABEL: &str = "Games Played: ";

/// Free line between the title and the board, used for prompts.
const MESSAGE_ROW: usize = 2;
/// Screen line the board area starts on.
const AREA_TOP: usize = 3;
/// Horizontal distance between tile glyphs.
const CELL_WIDTH: usize = 5;
/// Vertical distance between tile rows.
const CELL_HEIGHT: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Terminal window is too small.\nGrid size is {grid_size}.\nNeed {need_rows} rows, have {have_rows} rows.\nNeed {need_cols} cols, have {have_cols} cols."
)]
pub struct TerminalTooSmall {
    pub grid_size: usize,
    pub need_rows: usize,
    pub have_rows: usize,
    pub need_cols: usize,
    pub have_cols: usize,
}

/// A piece of text anchored at a screen position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placed {
    pub row: usize,
    pub col: usize,
    pub text: String,
}

impl Placed {
    fn new(row: usize, col: usize, text: impl Into<String>) -> Self {
        Placed { row, col, text: text.into() }
    }
}

/// Screen geometry for a given grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub grid_size: usize,
    pub area_height: usize,
    pub area_width: usize,
}

impl Layout {
    pub fn new(grid_size: usize) -> Self {
        Layout {
            grid_size,
            area_height: (grid_size + 1) * CELL_HEIGHT + 1,
            area_width: (grid_size + 1) * CELL_WIDTH,
        }
    }

    /// Rows needed: title, gap, the board area, then the status lines.
    pub fn min_rows(&self) -> usize {
        self.area_height + 7
    }

    pub fn min_cols(&self) -> usize {
        self.area_width.max(TITLE.len())
    }

    /// Fail if a `rows` x `cols` terminal cannot hold the layout.
    pub fn check_fits(&self, rows: usize, cols: usize) -> Result<(), TerminalTooSmall> {
        if rows < self.min_rows() || cols < self.min_cols() {
            return Err(TerminalTooSmall {
                grid_size: self.grid_size,
                need_rows: self.min_rows(),
                have_rows: rows,
                need_cols: self.min_cols(),
                have_cols: cols,
            });
        }
        Ok(())
    }
}

/// Counters and messages shown under the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub move_count: u64,
    pub last_move: Option<Move>,
    pub games_played: Option<u64>,
    pub message: Option<String>,
}

/// Four-column glyph for one tile; empty cells show as dashes.
pub fn tile_glyph(value: u32) -> String {
    match value {
        0 => "----".to_string(),
        v if v < 10 => format!("{v:2}  "),
        v if v < 100 => format!("{v:3} "),
        v => format!("{v:4}"),
    }
}

fn last_move_name(last: Option<Move>) -> String {
    match last {
        Some(m) => format!("{:<5}", m.to_string()),
        None => "None ".to_string(),
    }
}

/// The bordered board area, one string per line, `area_width` characters each.
pub fn board_lines(board: &Board) -> Vec<String> {
    let layout = Layout::new(board.size());
    let (h, w) = (layout.area_height, layout.area_width);
    let edge = format!("+{}+", "-".repeat(w - 2));
    let blank = format!("|{}|", " ".repeat(w - 2));
    let mut lines: Vec<Vec<char>> = (0..h)
        .map(|i| if i == 0 || i == h - 1 { edge.chars().collect() } else { blank.chars().collect() })
        .collect();
    for row in 0..board.size() {
        let line = &mut lines[2 + row * CELL_HEIGHT];
        for col in 0..board.size() {
            let start = 3 + col * CELL_WIDTH;
            for (offset, ch) in tile_glyph(board.get(row, col)).chars().enumerate() {
                // Tiles wider than the glyph (>= 10000) spill into the gap.
                if let Some(slot) = line.get_mut(start + offset) {
                    *slot = ch;
                }
            }
        }
    }
    lines.into_iter().map(|l| l.into_iter().collect()).collect()
}

fn centered(cols: usize, len: usize) -> usize {
    cols.saturating_sub(len) / 2
}

/// Everything to draw for one frame on a terminal `cols` wide.
pub fn frame(board: &Board, status: &Status, cols: usize) -> Vec<Placed> {
    let layout = Layout::new(board.size());
    let mut out = Vec::with_capacity(layout.area_height + 5);
    out.push(Placed::new(1, centered(cols, TITLE.len()), TITLE));

    let left = centered(cols, layout.area_width);
    for (i, line) in board_lines(board).into_iter().enumerate() {
        out.push(Placed::new(AREA_TOP + i, left, line));
    }

    let below = AREA_TOP + layout.area_height;
    out.push(Placed::new(
        below + 1,
        centered(cols, COUNT_LABEL.len() + 2),
        format!("{COUNT_LABEL}{}", status.move_count),
    ));
    out.push(Placed::new(
        below + 2,
        centered(cols, LAST_MOVE_LABEL.len() + 5),
        format!("{LAST_MOVE_LABEL}{}", last_move_name(status.last_move)),
    ));
    if let Some(games) = status.games_played {
        out.push(Placed::new(below + 3, centered(cols, GAMES_LABEL.len() + 1), format!("{GAMES_LABEL}{games}")));
    }
    if let Some(msg) = &status.message {
        out.push(Placed::new(MESSAGE_ROW, centered(cols, msg.len()), msg.clone()));
    }
    out
}
