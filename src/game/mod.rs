pub mod board;
pub mod clock;
pub mod movegen;
pub mod rules;
pub mod state;
pub mod utils;

// Re-export important types
pub use board::{Board, Color, Piece, PieceKind, Position};
pub use clock::{should_run, tick, toggle_timer};
pub use movegen::valid_moves;
pub use rules::{in_check, is_checkmate};
pub use state::{
    initial_state, make_move, reset_game, select_square, GameState, GameStatus, Move, Timer,
};
