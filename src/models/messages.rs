use actix::Message;
use serde::{Deserialize, Serialize};

use crate::game::utils::{format_clock, status_text};
use crate::game::{GameState, Position};
use crate::models::ProtocolError;

/// Message sent from client to server
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ClientMessage {
    pub action: String,
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub row: Option<i8>,
    #[serde(default)]
    pub col: Option<i8>,
}

/// A validated client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create,
    Join(String),
    Select(Position),
    ToggleTimer,
    Reset,
    State,
}

impl ClientMessage {
    pub fn parse(text: &str) -> Result<Command, ProtocolError> {
        serde_json::from_str::<ClientMessage>(text)?.into_command()
    }

    pub fn into_command(self) -> Result<Command, ProtocolError> {
        match self.action.as_str() {
            "create" => Ok(Command::Create),
            "join" => {
                let game_id = self.game_id.ok_or(ProtocolError::MissingField {
                    action: "join",
                    field: "game_id",
                })?;
                Ok(Command::Join(game_id))
            }
            "select" => {
                let (Some(row), Some(col)) = (self.row, self.col) else {
                    return Err(ProtocolError::MissingField {
                        action: "select",
                        field: "row and col",
                    });
                };
                Ok(Command::Select(on_board(Position::new(row, col))?))
            }
            "toggle_timer" => Ok(Command::ToggleTimer),
            "reset" => Ok(Command::Reset),
            "state" => Ok(Command::State),
            _ => Err(ProtocolError::UnknownAction(self.action)),
        }
    }
}

fn on_board(pos: Position) -> Result<Position, ProtocolError> {
    if pos.is_valid() {
        Ok(pos)
    } else {
        Err(ProtocolError::OffBoard(pos))
    }
}

/// Message sent from server to client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServerMessage {
    pub message_type: String,
    pub game_id: Option<String>,
    pub state: Option<GameState>,
    pub status_text: Option<String>,
    pub white_clock: Option<String>,
    pub black_clock: Option<String>,
    pub error: Option<String>,
}

impl ServerMessage {
    /// Full snapshot of a game, tagged with `message_type`.
    pub fn snapshot(message_type: &str, game_id: &str, state: &GameState) -> Self {
        ServerMessage {
            message_type: message_type.to_string(),
            game_id: Some(game_id.to_string()),
            state: Some(state.clone()),
            status_text: Some(status_text(state)),
            white_clock: Some(format_clock(state.timer.white)),
            black_clock: Some(format_clock(state.timer.black)),
            error: None,
        }
    }

    pub fn error(game_id: Option<&str>, err: &ProtocolError) -> Self {
        ServerMessage {
            message_type: "error".to_string(),
            game_id: game_id.map(str::to_string),
            state: None,
            status_text: None,
            white_clock: None,
            black_clock: None,
            error: Some(err.to_string()),
        }
    }
}

/// Message type for WebSocket communication
#[derive(Message)]
#[rtype(result = "()")]
pub struct ChessWebSocketMessage(pub String);
