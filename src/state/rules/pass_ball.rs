use crate::state::{
    rules::{IllegalMove, RuleError},
    session::BallTable,
};

/// Move one ball from `from` to `to`, eliminating the giver when it runs dry.
pub fn transfer(table: &mut BallTable, from: &str, to: &str) -> Result<(), RuleError> {
    if from == to {
        return Err(IllegalMove::SelfTransferNotAllowed.into());
    }

    let source = table
        .active_seat(from)
        .ok_or_else(|| IllegalMove::UnknownOrEliminatedPlayer {
            player: from.to_owned(),
        })?;
    let target = table
        .active_seat(to)
        .ok_or_else(|| IllegalMove::UnknownOrEliminatedPlayer {
            player: to.to_owned(),
        })?;

    if table.seats[source].balls == 0 {
        return Err(IllegalMove::SourceHasNoBalls {
            player: from.to_owned(),
        }
        .into());
    }

    let received = table.seats[target]
        .balls
        .checked_add(1)
        .ok_or_else(|| RuleError::Corrupted(format!("ball count overflow for `{to}`")))?;
    table.seats[target].balls = received;

    let giver = &mut table.seats[source];
    giver.balls -= 1;
    if giver.balls == 0 {
        giver.eliminated = true;
    }
    Ok(())
}
