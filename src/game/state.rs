//! The game state machine.
//!
//! Every operation here takes the old [`GameState`] by value and returns the
//! next one. Nothing is patched in place from the outside; the session actor
//! swaps its whole state for the returned value.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use super::board::{Board, Color, Piece, PieceKind, Position};
use super::movegen::valid_moves;
use super::rules::{in_check, is_checkmate};

/// Seconds on each clock at the start of a game.
pub const INITIAL_CLOCK_SECS: u32 = 600;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Check,
    Checkmate,
    /// Never produced; see `rules::is_checkmate`.
    Stalemate,
    /// Never produced.
    Draw,
}

impl GameStatus {
    /// Terminal statuses freeze the game: clock ticks stop and clicks and
    /// moves return the state unchanged until a reset.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw
        )
    }
}

/// One entry of the move log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured_piece: Option<Piece>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub white: u32,
    pub black: u32,
    pub is_running: bool,
    pub active_player: Color,
}

impl Default for Timer {
    fn default() -> Self {
        Timer {
            white: INITIAL_CLOCK_SECS,
            black: INITIAL_CLOCK_SECS,
            is_running: false,
            active_player: Color::White,
        }
    }
}

impl Timer {
    pub fn remaining(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn with_remaining(mut self, color: Color, secs: u32) -> Timer {
        match color {
            Color::White => self.white = secs,
            Color::Black => self.black = secs,
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current_player: Color,
    pub selected_square: Option<Position>,
    pub valid_moves: Vec<Position>,
    pub game_status: GameStatus,
    pub winner: Option<Color>,
    pub move_history: Vec<Move>,
    pub timer: Timer,
}

impl Default for GameState {
    fn default() -> Self {
        initial_state()
    }
}

/// Fresh game: standard layout, white to move, both clocks full and stopped.
pub fn initial_state() -> GameState {
    GameState {
        board: Board::initial(),
        current_player: Color::White,
        selected_square: None,
        valid_moves: Vec::new(),
        game_status: GameStatus::Playing,
        winner: None,
        move_history: Vec::new(),
        timer: Timer::default(),
    }
}

/// Same value as [`initial_state`]. Cancelling the pending clock tick is the
/// job of whoever schedules it.
pub fn reset_game() -> GameState {
    initial_state()
}

/// Handles a click on `position`.
///
/// Clicking a highlighted destination of the selected piece plays the move.
/// Clicking one of the mover's own pieces selects it. Anything else clears
/// the selection. Clicks after the game has ended are ignored.
pub fn select_square(state: GameState, position: Position) -> GameState {
    if state.game_status.is_terminal() {
        return state;
    }

    if let Some(selected) = state.selected_square {
        if state.valid_moves.contains(&position) {
            return make_move(state, selected, position);
        }
    }

    if state.board.is_occupied_by(position, state.current_player) {
        let moves = valid_moves(&state.board, position);
        return GameState {
            selected_square: Some(position),
            valid_moves: moves,
            ..state
        };
    }

    GameState {
        selected_square: None,
        valid_moves: Vec::new(),
        ..state
    }
}

/// Plays `from -> to` for the side to move and derives the new status.
///
/// Returns `state` unchanged if `from` does not hold a piece of the side to
/// move or the game has already ended. The destination is not validated;
/// callers go through [`select_square`], which only offers generated moves.
pub fn make_move(state: GameState, from: Position, to: Position) -> GameState {
    if state.game_status.is_terminal() {
        return state;
    }
    let Some(piece) = state.board.piece_at(from) else {
        return state;
    };
    if piece.color != state.current_player || !to.is_valid() {
        return state;
    }

    let mover = state.current_player;
    let next = mover.opponent();
    let captured_piece = state.board.piece_at(to);
    let board = state.board.with_move(from, to);

    let (game_status, winner) = match captured_piece {
        Some(captured) if captured.kind == PieceKind::King => (GameStatus::Checkmate, Some(mover)),
        _ if in_check(&board, next) => {
            if is_checkmate(&board, next) {
                (GameStatus::Checkmate, Some(mover))
            } else {
                (GameStatus::Check, None)
            }
        }
        _ => (GameStatus::Playing, None),
    };

    let mut move_history = state.move_history;
    move_history.push(Move {
        from,
        to,
        piece,
        captured_piece,
        timestamp: now_millis(),
    });

    let timer = Timer {
        active_player: next,
        is_running: state.timer.is_running && game_status == GameStatus::Playing,
        ..state.timer
    };

    GameState {
        board,
        current_player: next,
        selected_square: None,
        valid_moves: Vec::new(),
        game_status,
        winner,
        move_history,
        timer,
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
