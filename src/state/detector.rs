//! Terminal detection run after every accepted board move.

use crate::state::board::{Board, Coord, Mark};

/// Contiguous marks needed for a win.
pub const LINE_LENGTH: usize = 4;

/// Horizontal, vertical, and both diagonals; each axis is scanned in both senses.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Result of evaluating the board after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The mover completed a line through the last modified cell.
    Line,
    /// No line, and no empty cell remains.
    Full,
    /// Play continues.
    Open,
}

/// Decide the outcome of the move that left `mark` at `at`.
///
/// The line check runs first so a move that both fills the last cell and
/// completes a line counts as a win.
pub fn evaluate(board: &Board, at: Coord, mark: Mark) -> Verdict {
    if completes_line(board, at, mark) {
        Verdict::Line
    } else if board.is_full() {
        Verdict::Full
    } else {
        Verdict::Open
    }
}

/// Whether `at` belongs to a run of at least [`LINE_LENGTH`] equal marks on any axis.
pub fn completes_line(board: &Board, at: Coord, mark: Mark) -> bool {
    if board.get(at) != Some(mark) {
        return false;
    }

    AXES.iter().any(|&(d_row, d_col)| {
        1 + run(board, at, mark, d_row, d_col) + run(board, at, mark, -d_row, -d_col)
            >= LINE_LENGTH
    })
}

/// Count equal marks walking away from `origin`, at most `LINE_LENGTH - 1` steps.
fn run(board: &Board, origin: Coord, mark: Mark, d_row: isize, d_col: isize) -> usize {
    let mut count = 0;
    let mut cursor = origin;
    while count < LINE_LENGTH - 1 {
        match board.step(cursor, d_row, d_col) {
            Some(next) if board.get(next) == Some(mark) => {
                count += 1;
                cursor = next;
            }
            _ => break,
        }
    }
    count
}
