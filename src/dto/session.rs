use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{format_system_time, validation::validate_player_id},
    state::{
        board::Mark,
        rules::Position,
        session::{PlayerIdentity, Session, SessionStatus, Table, Variant},
    },
};

/// Payload used to open a new session.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateSessionRequest {
    /// Participants in turn order.
    #[validate(length(min = 2, max = 6), nested)]
    pub players: Vec<PlayerInput>,
}

/// Player identity supplied by the account service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct PlayerInput {
    /// Stable identifier, unique within the session.
    #[validate(custom(function = "validate_player_id"))]
    pub id: String,
    /// Display name.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
}

impl From<PlayerInput> for PlayerIdentity {
    fn from(value: PlayerInput) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// Cell position on a board.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct CellInput {
    /// Row, counted from the top.
    pub row: i64,
    /// Column, counted from the left.
    pub col: i64,
}

impl From<CellInput> for Position {
    fn from(value: CellInput) -> Self {
        Self {
            row: value.row,
            col: value.col,
        }
    }
}

/// Move payload. Which fields are required depends on the variant:
/// `column` for gravity-four, `to` (and `from` for slides) for the placement
/// variants, `from_player`/`to_player` for pass-the-ball.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct MoveRequest {
    /// Acting player; when present on board variants it must hold the turn.
    #[serde(default)]
    #[validate(custom(function = "validate_player_id"))]
    pub player: Option<String>,
    /// Column to drop into (gravity-four).
    #[serde(default)]
    pub column: Option<i64>,
    /// Destination cell (placement variants).
    #[serde(default)]
    pub to: Option<CellInput>,
    /// Origin of a slide (free-placement-four).
    #[serde(default)]
    pub from: Option<CellInput>,
    /// Player giving a ball (pass-the-ball).
    #[serde(default)]
    pub from_player: Option<String>,
    /// Player receiving the ball (pass-the-ball).
    #[serde(default)]
    pub to_player: Option<String>,
}

/// Publicly visible session status.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusSummary {
    /// Moves are accepted.
    InProgress,
    /// A player won; see `winner`.
    Won,
    /// Board full without a line.
    Drawn,
    /// Ended by an explicit terminate call.
    Terminated,
}

impl From<&SessionStatus> for StatusSummary {
    fn from(value: &SessionStatus) -> Self {
        match value {
            SessionStatus::InProgress => StatusSummary::InProgress,
            SessionStatus::Won { .. } => StatusSummary::Won,
            SessionStatus::Drawn => StatusSummary::Drawn,
            SessionStatus::Terminated => StatusSummary::Terminated,
        }
    }
}

/// Player as listed in a session snapshot.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct PlayerSummary {
    /// Player identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Mark used on board variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<Mark>,
}

/// Ball holdings of one player.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct SeatSummary {
    /// Player sitting in this seat.
    pub player_id: String,
    /// Balls currently held.
    pub balls: u32,
    /// Whether the player ran out of balls.
    pub eliminated: bool,
}

/// Fully denormalized, read-only snapshot of a session.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionSummary {
    /// Session identifier.
    pub id: Uuid,
    /// Rule set of the session.
    pub variant: Variant,
    /// Players in turn order.
    pub players: Vec<PlayerSummary>,
    /// Rows of cells, top row first; present on board variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<Vec<Vec<Option<Mark>>>>,
    /// Present on pass-the-ball sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<Vec<SeatSummary>>,
    /// Informational cycle length of pass-the-ball sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_timer_secs: Option<u32>,
    /// Seat expected to move next.
    pub turn_index: usize,
    /// Lifecycle status.
    pub status: StatusSummary,
    /// Winning player id when `status` is `won`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// RFC 3339 time of the last accepted change.
    pub updated_at: String,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        let players = session
            .players
            .iter()
            .map(|player| PlayerSummary {
                id: player.id.clone(),
                name: player.name.clone(),
                mark: session.mark_of(&player.id),
            })
            .collect();

        let (board, seats, cycle_timer_secs) = match &session.table {
            Table::Board(board) => (Some(board.to_rows()), None, None),
            Table::Balls(table) => (
                None,
                Some(
                    table
                        .seats
                        .iter()
                        .map(|seat| SeatSummary {
                            player_id: seat.player.id.clone(),
                            balls: seat.balls,
                            eliminated: seat.eliminated,
                        })
                        .collect(),
                ),
                Some(table.cycle_timer_secs),
            ),
        };

        let winner = match &session.status {
            SessionStatus::Won { winner } => Some(winner.clone()),
            _ => None,
        };

        Self {
            id: session.id,
            variant: session.variant,
            players,
            board,
            seats,
            cycle_timer_secs,
            turn_index: session.turn_index,
            status: (&session.status).into(),
            winner,
            created_at: format_system_time(session.created_at),
            updated_at: format_system_time(session.updated_at),
        }
    }
}

impl From<Session> for SessionSummary {
    fn from(session: Session) -> Self {
        (&session).into()
    }
}
