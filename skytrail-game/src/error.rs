use thiserror::Error;

/// Errors surfaced by session and flight operations.
///
/// Every variant is a recoverable precondition failure: the operation that
/// produced it performed no mutation, and the caller may retry with
/// different input. `DataUnavailable` is the only variant originating from
/// the geographic collaborator; the session retries the lookup once before
/// reporting it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GameError {
    #[error("unknown role '{0}': expected cook, pilot, or fighter")]
    InvalidRole(String),
    #[error("no active session; start a new game first")]
    NoActiveSession,
    #[error("no active character; choose a role first")]
    NoActiveCharacter,
    #[error("no airport matches ident '{0}'")]
    DestinationNotFound(String),
    #[error("destination is {distance_km:.1} km away but current range is {range_km:.1} km")]
    DestinationUnreachable { distance_km: f64, range_km: f64 },
    #[error("flight needs {need} fuel (have {have})")]
    InsufficientFuel { have: i32, need: i32 },
    #[error("no food left to eat")]
    NoFood,
    #[error("hit points are already full")]
    FullHealth,
    #[error("geographic data unavailable: {0}")]
    DataUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_precondition() {
        let err = GameError::InsufficientFuel { have: 12, need: 30 };
        assert_eq!(err.to_string(), "flight needs 30 fuel (have 12)");

        let err = GameError::DestinationUnreachable {
            distance_km: 512.26,
            range_km: 400.0,
        };
        assert!(err.to_string().contains("512.3"));
        assert!(err.to_string().contains("400.0"));
    }
}
