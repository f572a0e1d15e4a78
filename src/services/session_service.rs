//! Session lifecycle: creation, moves, reads, and termination for every variant.

use std::{collections::HashSet, time::SystemTime};

use tracing::{debug, error, info};
use uuid::Uuid;

use crate::{
    dto::session::{CreateSessionRequest, MoveRequest, PlayerInput, SessionSummary},
    error::ServiceError,
    state::{
        SharedState,
        rules::{self, MoveIntent},
        session::{PlayerId, PlayerIdentity, Session, SessionStatus, Variant},
    },
};

/// Move request translated into engine terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    /// Player submitting the move, when the caller knows it.
    pub actor: Option<PlayerId>,
    /// Requested move.
    pub intent: MoveIntent,
}

/// Open a new session of `variant` for the supplied players.
pub async fn create_session(
    state: &SharedState,
    variant: Variant,
    request: CreateSessionRequest,
) -> Result<SessionSummary, ServiceError> {
    let players = build_players(variant, request.players)?;
    let session = Session::new(variant, players, state.config().pass_the_ball());
    let summary = SessionSummary::from(&session);

    let id = state.store(variant).create(session)?;
    info!(
        session_id = %id,
        %variant,
        players = summary.players.len(),
        "session created"
    );

    Ok(summary)
}

/// Snapshot of one session.
pub async fn get_session(
    state: &SharedState,
    variant: Variant,
    id: Uuid,
) -> Result<SessionSummary, ServiceError> {
    state
        .store(variant)
        .get(id)
        .await
        .map(SessionSummary::from)
        .ok_or_else(|| ServiceError::NotFound(format!("{variant} session `{id}` not found")))
}

/// Snapshots of every live session of `variant`, newest first.
pub async fn list_sessions(state: &SharedState, variant: Variant) -> Vec<SessionSummary> {
    let mut sessions = state.store(variant).list().await;
    sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sessions.iter().map(SessionSummary::from).collect()
}

/// Validate and apply one move, returning the resulting snapshot.
pub async fn apply_move(
    state: &SharedState,
    variant: Variant,
    id: Uuid,
    request: MoveRequest,
) -> Result<SessionSummary, ServiceError> {
    let command = build_command(variant, request)?;
    submit_move(state, variant, id, command).await
}

/// Apply an already translated move command.
///
/// Structural checks run before the session lock is taken so the critical
/// section only covers rule enforcement, detection, and publication.
pub async fn submit_move(
    state: &SharedState,
    variant: Variant,
    id: Uuid,
    command: MoveCommand,
) -> Result<SessionSummary, ServiceError> {
    let MoveCommand { actor, intent } = command;
    let checked = rules::check(variant, intent)?;

    let outcome = state
        .store(variant)
        .with_lock(id, |session| {
            if !session.status.is_in_progress() {
                return Err(ServiceError::SessionTerminal(session.status.clone()));
            }
            rules::apply(session, actor.as_deref(), checked)?;
            session.updated_at = SystemTime::now();
            Ok(session.clone())
        })
        .await;

    let session = match outcome {
        Ok(session) => session,
        Err(ServiceError::Internal(message)) => {
            error!(session_id = %id, %variant, %message, "session invariant violated");
            return Err(ServiceError::Internal(message));
        }
        Err(err) => {
            debug!(session_id = %id, %variant, error = %err, "move rejected");
            return Err(err);
        }
    };

    match &session.status {
        SessionStatus::InProgress => {
            debug!(session_id = %id, %variant, turn_index = session.turn_index, "move applied");
        }
        status => info!(session_id = %id, %variant, ?status, "session finished"),
    }

    Ok(session.into())
}

/// Terminate and forget a session.
pub async fn terminate_session(
    state: &SharedState,
    variant: Variant,
    id: Uuid,
) -> Result<(), ServiceError> {
    let session = state.store(variant).delete(id).await?;
    info!(
        session_id = %id,
        %variant,
        players = session.players.len(),
        "session terminated"
    );
    Ok(())
}

fn build_players(
    variant: Variant,
    players: Vec<PlayerInput>,
) -> Result<Vec<PlayerIdentity>, ServiceError> {
    let allowed = variant.player_range();
    if !allowed.contains(&players.len()) {
        return Err(ServiceError::InvalidInput(format!(
            "{variant} requires between {} and {} players (got {})",
            allowed.start(),
            allowed.end(),
            players.len()
        )));
    }

    let mut seen_ids = HashSet::new();
    players
        .into_iter()
        .map(|player| {
            if player.id.trim().is_empty() {
                return Err(ServiceError::InvalidInput(
                    "player id must not be empty".into(),
                ));
            }

            if player.name.trim().is_empty() {
                return Err(ServiceError::InvalidInput(
                    "player name must not be empty".into(),
                ));
            }

            if !seen_ids.insert(player.id.clone()) {
                return Err(ServiceError::InvalidInput(format!(
                    "duplicate player id `{}` detected",
                    player.id
                )));
            }

            Ok(player.into())
        })
        .collect()
}

fn build_command(variant: Variant, request: MoveRequest) -> Result<MoveCommand, ServiceError> {
    let MoveRequest {
        player,
        column,
        to,
        from,
        from_player,
        to_player,
    } = request;

    let intent = match variant {
        Variant::GravityFour => MoveIntent::Drop {
            column: column.ok_or_else(|| missing(variant, "column"))?,
        },
        Variant::FreePlacementFour | Variant::RingConstrainedFour => MoveIntent::Place {
            to: to.ok_or_else(|| missing(variant, "to"))?.into(),
            from: from.map(Into::into),
        },
        Variant::PassTheBall => MoveIntent::Pass {
            from: from_player.ok_or_else(|| missing(variant, "from_player"))?,
            to: to_player.ok_or_else(|| missing(variant, "to_player"))?,
        },
    };

    Ok(MoveCommand {
        actor: player,
        intent,
    })
}

fn missing(variant: Variant, field: &str) -> ServiceError {
    ServiceError::InvalidInput(format!("`{field}` is required for {variant} moves"))
}
