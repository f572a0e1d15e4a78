//! Move validation and application for every variant.
//!
//! A move goes through two stages. [`check`] turns the caller's [`MoveIntent`]
//! into a [`CheckedMove`] using only the variant's static shape, so it can run
//! before the session lock is taken. [`apply`] then runs under the lock,
//! enforces the rules that depend on session state, mutates the session, and
//! settles the resulting status.

/// Free placements followed by slides.
pub mod free_placement;
/// Column drops.
pub mod gravity;
/// Ball hand-offs.
pub mod pass_ball;
/// Border-first placements.
pub mod ring;

use thiserror::Error;

use crate::state::{
    board::{Coord, Mark},
    detector::{self, Verdict},
    session::{PlayerId, Session, SessionStatus, Table, Variant},
};

/// Signed cell position as supplied by the caller, before bounds checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Row, counted from the top.
    pub row: i64,
    /// Column, counted from the left.
    pub col: i64,
}

/// Caller-supplied description of a move, prior to legality validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveIntent {
    /// Drop a piece into a column.
    Drop {
        /// Target column.
        column: i64,
    },
    /// Place a mark at `to`, sliding it from `from` when given.
    Place {
        /// Destination cell.
        to: Position,
        /// Origin of a slide.
        from: Option<Position>,
    },
    /// Hand one ball from one player to another.
    Pass {
        /// Player giving the ball.
        from: PlayerId,
        /// Player receiving the ball.
        to: PlayerId,
    },
}

/// Move whose payload fits the variant's board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckedMove {
    /// Column within the board width.
    Drop {
        /// Target column.
        column: usize,
    },
    /// On-board destination and optional on-board origin.
    Place {
        /// Destination cell.
        to: Coord,
        /// Origin of a slide.
        from: Option<Coord>,
    },
    /// Ball hand-off between two player ids.
    Pass {
        /// Player giving the ball.
        from: PlayerId,
        /// Player receiving the ball.
        to: PlayerId,
    },
}

/// Malformed or out-of-range move payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMove {
    /// Column outside `[0, width)`.
    #[error("column {column} is outside the board (width {width})")]
    InvalidColumn {
        /// Requested column.
        column: i64,
        /// Board width.
        width: usize,
    },
    /// Cell outside the board.
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
    },
    /// Slide without origin once the mover has all marks on the board.
    #[error("all marks are placed; a slide origin is required")]
    OriginRequired,
    /// Origin supplied where only placements are allowed.
    #[error("an origin is not allowed for this move")]
    UnexpectedOrigin,
    /// Intent kind does not belong to the session's variant.
    #[error("move kind does not apply to {variant}")]
    WrongIntent {
        /// Variant the move was sent to.
        variant: Variant,
    },
}

/// Well-formed move rejected by the rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalMove {
    /// No empty cell left in the column.
    #[error("column {column} is full")]
    ColumnFull {
        /// Requested column.
        column: usize,
    },
    /// Destination already holds a mark.
    #[error("cell ({row}, {col}) is already occupied")]
    DestinationOccupied {
        /// Destination row.
        row: usize,
        /// Destination column.
        col: usize,
    },
    /// Slide origin holds no mark.
    #[error("slide origin is empty")]
    OriginEmpty,
    /// Slide origin holds the opponent's mark.
    #[error("slide origin holds the opponent's mark")]
    NotOwnMark,
    /// Interior placement while border cells are still free.
    #[error("the outer ring must be filled first")]
    MustUseOuterRing,
    /// Ball passed to its own holder.
    #[error("a player cannot pass a ball to themselves")]
    SelfTransferNotAllowed,
    /// Giving player holds no ball.
    #[error("player `{player}` has no balls left")]
    SourceHasNoBalls {
        /// Giving player.
        player: PlayerId,
    },
    /// Player absent from the session or already out.
    #[error("player `{player}` is unknown or eliminated")]
    UnknownOrEliminatedPlayer {
        /// Offending player reference.
        player: PlayerId,
    },
    /// Board move sent on behalf of a player whose turn it is not.
    #[error("it is `{expected}`'s turn")]
    NotYourTurn {
        /// Player expected to move.
        expected: PlayerId,
    },
}

/// Any failure raised while checking or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Malformed payload.
    #[error(transparent)]
    Invalid(#[from] InvalidMove),
    /// Rule violation.
    #[error(transparent)]
    Illegal(#[from] IllegalMove),
    /// Session state breaks an engine invariant; indicates a bug.
    #[error("session invariant violated: {0}")]
    Corrupted(String),
}

/// Validate the structural shape of `intent` for `variant`.
pub fn check(variant: Variant, intent: MoveIntent) -> Result<CheckedMove, InvalidMove> {
    match (variant, intent) {
        (Variant::GravityFour, MoveIntent::Drop { column }) => {
            let width = board_shape(variant)?.1;
            usize::try_from(column)
                .ok()
                .filter(|column| *column < width)
                .map(|column| CheckedMove::Drop { column })
                .ok_or(InvalidMove::InvalidColumn { column, width })
        }
        (Variant::FreePlacementFour, MoveIntent::Place { to, from }) => {
            let to = on_board(variant, to)?;
            let from = from.map(|from| on_board(variant, from)).transpose()?;
            Ok(CheckedMove::Place { to, from })
        }
        (Variant::RingConstrainedFour, MoveIntent::Place { to, from }) => {
            if from.is_some() {
                return Err(InvalidMove::UnexpectedOrigin);
            }
            Ok(CheckedMove::Place {
                to: on_board(variant, to)?,
                from: None,
            })
        }
        (Variant::PassTheBall, MoveIntent::Pass { from, to }) => {
            Ok(CheckedMove::Pass { from, to })
        }
        (variant, _) => Err(InvalidMove::WrongIntent { variant }),
    }
}

/// Apply `mv` to an in-progress session and settle its status.
///
/// `actor`, when given, must be the player whose turn it is on board variants.
/// The ball variant has no turn gate. On error the session may be partially
/// modified; callers apply moves to a scratch copy.
pub fn apply(session: &mut Session, actor: Option<&str>, mv: CheckedMove) -> Result<(), RuleError> {
    if !session.status.is_in_progress() {
        return Err(RuleError::Corrupted(format!(
            "move applied to a session in status {:?}",
            session.status
        )));
    }

    match mv {
        CheckedMove::Pass { from, to } => apply_pass(session, &from, &to),
        board_move => apply_board_move(session, actor, board_move),
    }
}

fn apply_board_move(
    session: &mut Session,
    actor: Option<&str>,
    mv: CheckedMove,
) -> Result<(), RuleError> {
    let seat = session.turn_index;
    let mover = session
        .current_player()
        .ok_or_else(|| RuleError::Corrupted(format!("turn index {seat} out of range")))?;
    if let Some(actor) = actor {
        if actor != mover.id {
            if !session.players.iter().any(|player| player.id == actor) {
                return Err(IllegalMove::UnknownOrEliminatedPlayer {
                    player: actor.to_owned(),
                }
                .into());
            }
            return Err(IllegalMove::NotYourTurn {
                expected: mover.id.clone(),
            }
            .into());
        }
    }
    let mark = Mark::for_seat(seat)
        .ok_or_else(|| RuleError::Corrupted(format!("seat {seat} has no mark")))?;

    let variant = session.variant;
    let Table::Board(board) = &mut session.table else {
        return Err(RuleError::Corrupted(format!("{variant} session without a board")));
    };

    let landed = match (variant, mv) {
        (Variant::GravityFour, CheckedMove::Drop { column }) => {
            gravity::drop_piece(board, column, mark)?
        }
        (Variant::FreePlacementFour, CheckedMove::Place { to, from }) => {
            free_placement::place_or_slide(board, mark, to, from)?
        }
        (Variant::RingConstrainedFour, CheckedMove::Place { to, from: None }) => {
            ring::place(board, mark, to)?
        }
        (Variant::RingConstrainedFour, CheckedMove::Place { from: Some(_), .. }) => {
            return Err(InvalidMove::UnexpectedOrigin.into());
        }
        (variant, _) => return Err(InvalidMove::WrongIntent { variant }.into()),
    };

    settle_board(session, seat, landed, mark);
    Ok(())
}

fn settle_board(session: &mut Session, seat: usize, landed: Coord, mark: Mark) {
    let verdict = match &session.table {
        Table::Board(board) => detector::evaluate(board, landed, mark),
        Table::Balls(_) => Verdict::Open,
    };

    match verdict {
        Verdict::Line => {
            session.status = SessionStatus::Won {
                winner: session.players[seat].id.clone(),
            };
        }
        Verdict::Full => session.status = SessionStatus::Drawn,
        Verdict::Open => session.turn_index = (seat + 1) % session.players.len(),
    }
}

fn apply_pass(session: &mut Session, from: &str, to: &str) -> Result<(), RuleError> {
    let variant = session.variant;
    let Table::Balls(table) = &mut session.table else {
        return Err(InvalidMove::WrongIntent { variant }.into());
    };

    pass_ball::transfer(table, from, to)?;

    let mut remaining = table.remaining();
    if let (Some(last), None) = (remaining.next(), remaining.next()) {
        session.status = SessionStatus::Won {
            winner: last.player.id.clone(),
        };
    }

    session.turn_index = table
        .next_active(session.turn_index)
        .ok_or_else(|| RuleError::Corrupted("every ball seat is eliminated".into()))?;
    Ok(())
}

fn board_shape(variant: Variant) -> Result<(usize, usize), InvalidMove> {
    variant
        .dimensions()
        .ok_or(InvalidMove::WrongIntent { variant })
}

fn on_board(variant: Variant, position: Position) -> Result<Coord, InvalidMove> {
    let (rows, cols) = board_shape(variant)?;
    let row = usize::try_from(position.row).ok().filter(|row| *row < rows);
    let col = usize::try_from(position.col).ok().filter(|col| *col < cols);
    match (row, col) {
        (Some(row), Some(col)) => Ok(Coord::new(row, col)),
        _ => Err(InvalidMove::OutOfBounds {
            row: position.row,
            col: position.col,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session::{BallSettings, PlayerIdentity};

    fn session(variant: Variant, count: usize) -> Session {
        let players = (1..=count)
            .map(|n| PlayerIdentity {
                id: format!("p{n}"),
                name: format!("Player {n}"),
            })
            .collect();
        Session::new(variant, players, BallSettings::default())
    }

    fn drop_in(session: &mut Session, column: i64) -> Result<(), RuleError> {
        let mv = check(Variant::GravityFour, MoveIntent::Drop { column })?;
        apply(session, None, mv)
    }

    #[test]
    fn check_rejects_out_of_range_columns_and_cells() {
        assert_eq!(
            check(Variant::GravityFour, MoveIntent::Drop { column: 7 }),
            Err(InvalidMove::InvalidColumn {
                column: 7,
                width: 7
            })
        );
        assert_eq!(
            check(Variant::GravityFour, MoveIntent::Drop { column: -1 }),
            Err(InvalidMove::InvalidColumn {
                column: -1,
                width: 7
            })
        );
        assert_eq!(
            check(
                Variant::FreePlacementFour,
                MoveIntent::Place {
                    to: Position { row: 4, col: 0 },
                    from: None
                }
            ),
            Err(InvalidMove::OutOfBounds { row: 4, col: 0 })
        );
        assert_eq!(
            check(
                Variant::FreePlacementFour,
                MoveIntent::Place {
                    to: Position { row: 0, col: 0 },
                    from: Some(Position { row: 0, col: -2 })
                }
            ),
            Err(InvalidMove::OutOfBounds { row: 0, col: -2 })
        );
    }

    #[test]
    fn cells_are_bounded_by_the_variant_dimensions() {
        let corner = Position { row: 5, col: 6 };
        assert_eq!(
            on_board(Variant::GravityFour, corner),
            Ok(Coord::new(5, 6))
        );
        assert_eq!(
            on_board(Variant::FreePlacementFour, corner),
            Err(InvalidMove::OutOfBounds { row: 5, col: 6 })
        );
        assert_eq!(
            on_board(Variant::PassTheBall, Position { row: 0, col: 0 }),
            Err(InvalidMove::WrongIntent {
                variant: Variant::PassTheBall
            })
        );
    }

    #[test]
    fn check_rejects_intents_of_another_variant() {
        let pass = MoveIntent::Pass {
            from: "p1".into(),
            to: "p2".into(),
        };
        assert_eq!(
            check(Variant::GravityFour, pass),
            Err(InvalidMove::WrongIntent {
                variant: Variant::GravityFour
            })
        );
        assert_eq!(
            check(Variant::PassTheBall, MoveIntent::Drop { column: 0 }),
            Err(InvalidMove::WrongIntent {
                variant: Variant::PassTheBall
            })
        );
        assert_eq!(
            check(
                Variant::RingConstrainedFour,
                MoveIntent::Place {
                    to: Position { row: 0, col: 0 },
                    from: Some(Position { row: 0, col: 1 })
                }
            ),
            Err(InvalidMove::UnexpectedOrigin)
        );
    }

    #[test]
    fn turn_index_alternates_with_every_legal_move() {
        let mut game = session(Variant::GravityFour, 2);
        // Spread drops so no line forms: columns 0..7 twice, row by row.
        let columns = [0, 1, 2, 3, 4, 5, 6, 0, 1, 2, 3, 4, 5, 6];
        for (n, column) in columns.into_iter().enumerate() {
            drop_in(&mut game, column).unwrap();
            assert_eq!(game.status, SessionStatus::InProgress);
            assert_eq!(game.turn_index, (n + 1) % 2);
        }
    }

    #[test]
    fn failed_move_does_not_advance_the_turn() {
        let mut game = session(Variant::GravityFour, 2);
        for _ in 0..6 {
            drop_in(&mut game, 3).unwrap();
        }
        let before = game.clone();
        assert_eq!(
            drop_in(&mut game, 3),
            Err(RuleError::Illegal(IllegalMove::ColumnFull { column: 3 }))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn winning_drop_sets_winner_and_freezes_turn() {
        let mut game = session(Variant::GravityFour, 2);
        // X plays column 0, O plays column 1, X completes a vertical four.
        for column in [0, 1, 0, 1, 0, 1, 0] {
            drop_in(&mut game, column).unwrap();
        }
        assert_eq!(
            game.status,
            SessionStatus::Won {
                winner: "p1".into()
            }
        );
        assert_eq!(game.turn_index, 0);
    }

    #[test]
    fn moves_after_a_terminal_status_are_internal_errors() {
        let mut game = session(Variant::GravityFour, 2);
        game.status = SessionStatus::Drawn;
        let mv = check(Variant::GravityFour, MoveIntent::Drop { column: 0 }).unwrap();
        assert!(matches!(
            apply(&mut game, None, mv),
            Err(RuleError::Corrupted(_))
        ));
    }

    #[test]
    fn actor_must_hold_the_turn() {
        let mut game = session(Variant::RingConstrainedFour, 2);
        let mv = check(
            Variant::RingConstrainedFour,
            MoveIntent::Place {
                to: Position { row: 0, col: 0 },
                from: None,
            },
        )
        .unwrap();

        assert_eq!(
            apply(&mut game, Some("p2"), mv.clone()),
            Err(RuleError::Illegal(IllegalMove::NotYourTurn {
                expected: "p1".into()
            }))
        );
        assert_eq!(
            apply(&mut game, Some("stranger"), mv.clone()),
            Err(RuleError::Illegal(IllegalMove::UnknownOrEliminatedPlayer {
                player: "stranger".into()
            }))
        );
        apply(&mut game, Some("p1"), mv).unwrap();
        assert_eq!(game.turn_index, 1);
    }

    #[test]
    fn corrupted_turn_index_is_reported() {
        let mut game = session(Variant::GravityFour, 2);
        game.turn_index = 5;
        let mv = check(Variant::GravityFour, MoveIntent::Drop { column: 0 }).unwrap();
        assert!(matches!(
            apply(&mut game, None, mv),
            Err(RuleError::Corrupted(_))
        ));
    }

    #[test]
    fn ball_transfers_ignore_the_actor_and_keep_turn_on_active_seat() {
        let mut game = session(Variant::PassTheBall, 3);
        let Table::Balls(table) = &mut game.table else {
            panic!("expected balls");
        };
        table.seats[0].balls = 1;

        let mv = check(
            Variant::PassTheBall,
            MoveIntent::Pass {
                from: "p1".into(),
                to: "p2".into(),
            },
        )
        .unwrap();
        apply(&mut game, Some("p3"), mv).unwrap();

        let table = game.balls().unwrap();
        assert!(table.seats[0].eliminated);
        assert_eq!(game.turn_index, 1);
        assert_eq!(game.status, SessionStatus::InProgress);
    }
}
