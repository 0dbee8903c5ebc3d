use super::board::Color;
use super::state::{GameState, GameStatus};

/// Convert a color to its capitalised display name
pub fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Get the game status as a string
pub fn game_status_str(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Playing => "playing",
        GameStatus::Check => "check",
        GameStatus::Checkmate => "checkmate",
        GameStatus::Stalemate => "stalemate",
        GameStatus::Draw => "draw",
    }
}

/// Format a clock value as `mm:ss`
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// One-line summary of where the game stands, for a status banner or a
/// victory dialog.
pub fn status_text(state: &GameState) -> String {
    match (state.game_status, state.winner) {
        (GameStatus::Checkmate, Some(winner)) => {
            let loser = winner.opponent();
            if state.timer.remaining(loser) == 0 {
                format!("{} wins on time", color_name(winner))
            } else {
                format!("Checkmate! {} wins", color_name(winner))
            }
        }
        (GameStatus::Checkmate, None) => "Checkmate!".to_string(),
        (GameStatus::Check, _) => format!("Check! {} to move", color_name(state.current_player)),
        (GameStatus::Stalemate, _) => "Stalemate!".to_string(),
        (GameStatus::Draw, _) => "Draw".to_string(),
        (GameStatus::Playing, _) => format!("{} to move", color_name(state.current_player)),
    }
}
