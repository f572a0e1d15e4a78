//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest player identifier accepted from the account service.
const MAX_PLAYER_ID_LENGTH: usize = 64;

/// Validates that a player ID is non-empty, bounded, and free of whitespace.
///
/// # Examples
///
/// ```ignore
/// validate_player_id("player-42") // Ok
/// validate_player_id("")          // Err - empty
/// validate_player_id("bad id")    // Err - whitespace
/// ```
pub fn validate_player_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() || id.len() > MAX_PLAYER_ID_LENGTH {
        let mut err = ValidationError::new("player_id_length");
        err.message = Some(
            format!(
                "Player ID must be between 1 and {MAX_PLAYER_ID_LENGTH} characters (got {})",
                id.len()
            )
            .into(),
        );
        return Err(err);
    }

    if id.chars().any(char::is_whitespace) {
        let mut err = ValidationError::new("player_id_format");
        err.message = Some("Player ID must not contain whitespace".into());
        return Err(err);
    }

    Ok(())
}
