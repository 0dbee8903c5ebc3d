use crate::game::Position;

/// Reasons a client message could not be acted on.
///
/// None of these close the connection; each is reported back to the
/// offending socket as an `error` message.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid message format: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("binary messages are not supported")]
    Binary,

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("{action} requires {field}")]
    MissingField {
        action: &'static str,
        field: &'static str,
    },

    #[error("square {0} is off the board")]
    OffBoard(Position),

    #[error("game not found: {0}")]
    GameNotFound(String),

    #[error("not in a game")]
    NotInGame,

    #[error("game session has ended")]
    SessionClosed,
}
