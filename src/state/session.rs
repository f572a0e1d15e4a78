use std::{fmt, ops::RangeInclusive, time::SystemTime};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::state::board::{Board, Mark};

/// Opaque player identifier issued by the external account service.
pub type PlayerId = String;

/// Rule set a session is played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Pieces fall to the lowest empty row of the chosen column (6×7).
    GravityFour,
    /// Four free placements per player, then slides of own marks (4×4).
    FreePlacementFour,
    /// Border cells must be filled before the interior opens up (4×4).
    RingConstrainedFour,
    /// Players hand balls to each other until one remains.
    PassTheBall,
}

impl Variant {
    /// Every supported variant.
    pub const ALL: [Variant; 4] = [
        Variant::GravityFour,
        Variant::FreePlacementFour,
        Variant::RingConstrainedFour,
        Variant::PassTheBall,
    ];

    /// Board dimensions as `(rows, cols)`; `None` for the ball variant.
    pub fn dimensions(self) -> Option<(usize, usize)> {
        match self {
            Variant::GravityFour => Some((6, 7)),
            Variant::FreePlacementFour | Variant::RingConstrainedFour => Some((4, 4)),
            Variant::PassTheBall => None,
        }
    }

    /// Accepted number of players.
    pub fn player_range(self) -> RangeInclusive<usize> {
        match self {
            Variant::PassTheBall => 2..=6,
            _ => 2..=2,
        }
    }

    /// Path segment used by the HTTP layer.
    pub fn slug(self) -> &'static str {
        match self {
            Variant::GravityFour => "gravity-four",
            Variant::FreePlacementFour => "free-placement-four",
            Variant::RingConstrainedFour => "ring-constrained-four",
            Variant::PassTheBall => "pass-the-ball",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Identity of a player as handed over by the caller; never looked up or verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    /// Stable identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
}

/// Lifecycle status of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Moves are accepted.
    InProgress,
    /// The referenced player won.
    Won {
        /// Identifier of the winning player.
        winner: PlayerId,
    },
    /// The board filled up without a line.
    Drawn,
    /// The session was explicitly terminated.
    Terminated,
}

impl SessionStatus {
    /// Whether the session still accepts moves.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, SessionStatus::InProgress)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::InProgress => f.write_str("in progress"),
            SessionStatus::Won { winner } => write!(f, "won by {winner}"),
            SessionStatus::Drawn => f.write_str("drawn"),
            SessionStatus::Terminated => f.write_str("terminated"),
        }
    }
}

/// Per-player state of the ball variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallSeat {
    /// Player sitting in this seat.
    pub player: PlayerIdentity,
    /// Balls currently held.
    pub balls: u32,
    /// Set once the player runs out of balls; never cleared.
    pub eliminated: bool,
}

/// Defaults applied to freshly created ball sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallSettings {
    /// Balls each player starts with.
    pub starting_balls: u32,
    /// Cycle length in seconds. Stored for clients, not enforced.
    pub cycle_timer_secs: u32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            starting_balls: 10,
            cycle_timer_secs: 60,
        }
    }
}

/// Ball holdings of every seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallTable {
    /// Seats in turn order, parallel to the session players.
    pub seats: Vec<BallSeat>,
    /// Informational cycle timer copied from [`BallSettings`].
    pub cycle_timer_secs: u32,
}

impl BallTable {
    /// Seat index of `player` if it is still in play.
    pub fn active_seat(&self, player: &str) -> Option<usize> {
        self.seats
            .iter()
            .position(|seat| seat.player.id == player && !seat.eliminated)
    }

    /// Seats that have not been eliminated.
    pub fn remaining(&self) -> impl Iterator<Item = &BallSeat> {
        self.seats.iter().filter(|seat| !seat.eliminated)
    }

    /// First non-eliminated seat at or after `from`, wrapping around.
    pub fn next_active(&self, from: usize) -> Option<usize> {
        let len = self.seats.len();
        (0..len)
            .map(|offset| (from + offset) % len)
            .find(|index| !self.seats[*index].eliminated)
    }

    /// Total balls across all seats.
    pub fn total_balls(&self) -> u64 {
        self.seats.iter().map(|seat| u64::from(seat.balls)).sum()
    }
}

/// Variant-specific playing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Table {
    /// Grid shared by the four-in-a-row variants.
    Board(Board),
    /// Ball holdings for the pass-the-ball variant.
    Balls(BallTable),
}

/// One game instance and the unit of locking inside a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Store key, fixed at creation.
    pub id: Uuid,
    /// Rule set.
    pub variant: Variant,
    /// Participants in turn order; never changes after creation.
    pub players: Vec<PlayerIdentity>,
    /// Board or ball state.
    pub table: Table,
    /// Index into `players` of the player expected to move next.
    pub turn_index: usize,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// Creation timestamp for observability.
    pub created_at: SystemTime,
    /// Last accepted change.
    pub updated_at: SystemTime,
}

impl Session {
    /// Seed a new in-progress session with an empty board or full ball holdings.
    pub fn new(variant: Variant, players: Vec<PlayerIdentity>, balls: BallSettings) -> Self {
        let timestamp = SystemTime::now();
        let table = match variant.dimensions() {
            Some((rows, cols)) => Table::Board(Board::new(rows, cols)),
            None => Table::Balls(BallTable {
                seats: players
                    .iter()
                    .map(|player| BallSeat {
                        player: player.clone(),
                        balls: balls.starting_balls,
                        eliminated: false,
                    })
                    .collect(),
                cycle_timer_secs: balls.cycle_timer_secs,
            }),
        };

        Self {
            id: Uuid::new_v4(),
            variant,
            players,
            table,
            turn_index: 0,
            status: SessionStatus::InProgress,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Player expected to move next.
    pub fn current_player(&self) -> Option<&PlayerIdentity> {
        self.players.get(self.turn_index)
    }

    /// Mark owned by the player with `id`, for board variants.
    pub fn mark_of(&self, id: &str) -> Option<Mark> {
        if !matches!(self.table, Table::Board(_)) {
            return None;
        }
        self.players
            .iter()
            .position(|player| player.id == id)
            .and_then(Mark::for_seat)
    }

    /// Board of a board-variant session.
    pub fn board(&self) -> Option<&Board> {
        match &self.table {
            Table::Board(board) => Some(board),
            Table::Balls(_) => None,
        }
    }

    /// Ball holdings of a ball-variant session.
    pub fn balls(&self) -> Option<&BallTable> {
        match &self.table {
            Table::Balls(table) => Some(table),
            Table::Board(_) => None,
        }
    }
}
