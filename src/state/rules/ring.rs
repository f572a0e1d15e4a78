use crate::state::{
    board::{Board, Coord, Mark},
    rules::IllegalMove,
};

/// Place `mark` at `to`, keeping the interior closed until the border is full.
pub fn place(board: &mut Board, mark: Mark, to: Coord) -> Result<Coord, IllegalMove> {
    if !board.is_outer_ring(to) && !board.outer_ring_full() {
        return Err(IllegalMove::MustUseOuterRing);
    }
    if !board.is_empty_at(to) {
        return Err(IllegalMove::DestinationOccupied {
            row: to.row,
            col: to.col,
        });
    }
    board.set(to, mark);
    Ok(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_ring(board: &mut Board) {
        let ring: Vec<Coord> = board.coords().filter(|at| board.is_outer_ring(*at)).collect();
        for (n, at) in ring.into_iter().enumerate() {
            let mark = if n % 2 == 0 { Mark::X } else { Mark::O };
            place(board, mark, at).unwrap();
        }
    }

    #[test]
    fn interior_is_closed_while_the_ring_has_gaps() {
        let mut board = Board::new(4, 4);
        assert_eq!(
            place(&mut board, Mark::X, Coord::new(1, 1)),
            Err(IllegalMove::MustUseOuterRing)
        );
        assert!(board.is_empty_at(Coord::new(1, 1)));
        assert_eq!(place(&mut board, Mark::X, Coord::new(0, 1)), Ok(Coord::new(0, 1)));
    }

    #[test]
    fn interior_opens_once_the_ring_is_full() {
        let mut board = Board::new(4, 4);
        fill_ring(&mut board);
        assert!(board.outer_ring_full());
        assert_eq!(place(&mut board, Mark::O, Coord::new(2, 2)), Ok(Coord::new(2, 2)));
    }

    #[test]
    fn occupied_border_cell_is_rejected() {
        let mut board = Board::new(4, 4);
        place(&mut board, Mark::X, Coord::new(3, 0)).unwrap();
        assert_eq!(
            place(&mut board, Mark::O, Coord::new(3, 0)),
            Err(IllegalMove::DestinationOccupied { row: 3, col: 0 })
        );
    }
}
