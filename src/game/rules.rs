use super::board::{Board, Color};
use super::movegen::valid_moves;

/// True if some piece of the opponent has a pseudo-legal move onto
/// `color`'s king. A color without a king is never in check.
pub fn in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.find_king(color) else {
        return false;
    };
    let attacker = color.opponent();

    board
        .pieces()
        .filter(|(_, piece)| piece.color == attacker)
        .any(|(from, _)| valid_moves(board, from).contains(&king))
}

/// True if `color` is in check and every pseudo-legal move it has still
/// leaves it in check.
///
/// Only meaningful for a side already in check; a side with no moves that is
/// not in check is reported as `false`, never as stalemate.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    if !in_check(board, color) {
        return false;
    }

    for (from, piece) in board.pieces() {
        if piece.color != color {
            continue;
        }
        for to in valid_moves(board, from) {
            let after = board.with_move(from, to);
            if !in_check(&after, color) {
                return false;
            }
        }
    }

    true
}
