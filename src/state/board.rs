//! Fixed-size grids shared by the four-in-a-row variants.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Piece a player leaves on a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Mark {
    /// Mark of the player in the first seat.
    X,
    /// Mark of the player in the second seat.
    O,
}

impl Mark {
    /// Mark owned by the player sitting at `seat`, if that seat plays with marks.
    pub fn for_seat(seat: usize) -> Option<Self> {
        match seat {
            0 => Some(Mark::X),
            1 => Some(Mark::O),
            _ => None,
        }
    }
}

/// Validated cell position (row 0 is the top row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl Coord {
    /// Build a coordinate from already checked indices.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Row-major grid where each cell is either empty or holds a [`Mark`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Mark>>,
}

impl Board {
    /// Create an empty board of the requested dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the signed position lies on the board.
    pub fn in_bounds(&self, row: i64, col: i64) -> bool {
        self.coord(row, col).is_some()
    }

    /// Convert a signed position into a [`Coord`] when it lies on the board.
    pub fn coord(&self, row: i64, col: i64) -> Option<Coord> {
        let row = usize::try_from(row).ok().filter(|row| *row < self.rows)?;
        let col = usize::try_from(col).ok().filter(|col| *col < self.cols)?;
        Some(Coord { row, col })
    }

    /// Neighbour reached by moving `d_row`/`d_col` cells away from `from`.
    pub fn step(&self, from: Coord, d_row: isize, d_col: isize) -> Option<Coord> {
        let row = from.row.checked_add_signed(d_row)?;
        let col = from.col.checked_add_signed(d_col)?;
        (row < self.rows && col < self.cols).then_some(Coord { row, col })
    }

    /// Mark stored at `at`; `None` for empty or off-board cells.
    pub fn get(&self, at: Coord) -> Option<Mark> {
        self.index(at).and_then(|index| self.cells[index])
    }

    /// Whether `at` is on the board and holds no mark.
    pub fn is_empty_at(&self, at: Coord) -> bool {
        self.index(at).is_some_and(|index| self.cells[index].is_none())
    }

    /// Write `mark` into `at`. Off-board coordinates are ignored, callers check bounds first.
    pub fn set(&mut self, at: Coord, mark: Mark) {
        if let Some(index) = self.index(at) {
            self.cells[index] = Some(mark);
        }
    }

    /// Empty the cell at `at`.
    pub fn clear(&mut self, at: Coord) {
        if let Some(index) = self.index(at) {
            self.cells[index] = None;
        }
    }

    /// True iff no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// How many cells currently hold `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|cell| **cell == Some(mark)).count()
    }

    /// Lowest empty row of `col`, scanning from the bottom.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows)
            .rev()
            .find(|row| self.cells[row * self.cols + col].is_none())
    }

    /// Whether `at` sits on the border of the board.
    pub fn is_outer_ring(&self, at: Coord) -> bool {
        at.row == 0 || at.col == 0 || at.row + 1 == self.rows || at.col + 1 == self.cols
    }

    /// Whether every border cell is occupied.
    pub fn outer_ring_full(&self) -> bool {
        self.coords()
            .filter(|at| self.is_outer_ring(*at))
            .all(|at| self.get(at).is_some())
    }

    /// Every coordinate of the board in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coord { row, col }))
    }

    /// Copy the grid out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<Option<Mark>>> {
        self.cells
            .chunks(self.cols.max(1))
            .map(<[Option<Mark>]>::to_vec)
            .collect()
    }

    fn index(&self, at: Coord) -> Option<usize> {
        (at.row < self.rows && at.col < self.cols).then(|| at.row * self.cols + at.col)
    }
}
