use crate::state::{
    board::{Board, Coord, Mark},
    rules::IllegalMove,
};

/// Drop `mark` into `column`, returning the cell it landed on.
pub fn drop_piece(board: &mut Board, column: usize, mark: Mark) -> Result<Coord, IllegalMove> {
    let row = board
        .lowest_empty_row(column)
        .ok_or(IllegalMove::ColumnFull { column })?;
    let landed = Coord::new(row, column);
    board.set(landed, mark);
    Ok(landed)
}
