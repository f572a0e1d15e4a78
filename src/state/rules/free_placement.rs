use crate::state::{
    board::{Board, Coord, Mark},
    rules::{IllegalMove, InvalidMove, RuleError},
};

/// Marks each player places before moves turn into slides.
pub const PLACEMENT_QUOTA: usize = 4;

/// Place a new mark while under the quota, otherwise slide an own mark from `from` to `to`.
pub fn place_or_slide(
    board: &mut Board,
    mark: Mark,
    to: Coord,
    from: Option<Coord>,
) -> Result<Coord, RuleError> {
    let placing = board.count(mark) < PLACEMENT_QUOTA;

    match (placing, from) {
        (true, Some(_)) => Err(InvalidMove::UnexpectedOrigin.into()),
        (false, None) => Err(InvalidMove::OriginRequired.into()),
        (true, None) => {
            ensure_free(board, to)?;
            board.set(to, mark);
            Ok(to)
        }
        (false, Some(origin)) => {
            match board.get(origin) {
                None => return Err(IllegalMove::OriginEmpty.into()),
                Some(owner) if owner != mark => return Err(IllegalMove::NotOwnMark.into()),
                Some(_) => {}
            }
            ensure_free(board, to)?;
            board.clear(origin);
            board.set(to, mark);
            Ok(to)
        }
    }
}

fn ensure_free(board: &Board, at: Coord) -> Result<(), IllegalMove> {
    if board.is_empty_at(at) {
        Ok(())
    } else {
        Err(IllegalMove::DestinationOccupied {
            row: at.row,
            col: at.col,
        })
    }
}
