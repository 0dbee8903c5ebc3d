use super::board::{Board, Color, PieceKind, Position};

const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Pseudo-legal destinations for the piece on `from`.
///
/// Respects the board edge and never lands on a piece of the mover's own
/// color, but does not look at check: a king may step onto an attacked
/// square and a pinned piece may leave its line. Empty if `from` is empty.
pub fn valid_moves(board: &Board, from: Position) -> Vec<Position> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    let color = piece.color;

    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, color),
        PieceKind::Rook => slide(board, from, color, &ROOK_DIRS),
        PieceKind::Bishop => slide(board, from, color, &BISHOP_DIRS),
        PieceKind::Queen => {
            let mut moves = slide(board, from, color, &ROOK_DIRS);
            moves.extend(slide(board, from, color, &BISHOP_DIRS));
            moves
        }
        PieceKind::King => step(board, from, color, &KING_STEPS),
        PieceKind::Knight => step(board, from, color, &KNIGHT_JUMPS),
    }
}

fn pawn_moves(board: &Board, from: Position, color: Color) -> Vec<Position> {
    let mut moves = Vec::new();
    let dir = color.forward();

    let one = from.offset(dir, 0);
    if one.is_valid() && board.is_empty_at(one) {
        moves.push(one);

        if from.row == color.pawn_start_row() {
            let two = from.offset(2 * dir, 0);
            if two.is_valid() && board.is_empty_at(two) {
                moves.push(two);
            }
        }
    }

    for d_col in [-1, 1] {
        let target = from.offset(dir, d_col);
        if board.is_occupied_by(target, color.opponent()) {
            moves.push(target);
        }
    }

    moves
}

fn slide(board: &Board, from: Position, color: Color, dirs: &[(i8, i8)]) -> Vec<Position> {
    let mut moves = Vec::new();
    for &(d_row, d_col) in dirs {
        let mut to = from.offset(d_row, d_col);
        while to.is_valid() {
            match board.piece_at(to) {
                None => moves.push(to),
                Some(blocker) => {
                    if blocker.color != color {
                        moves.push(to);
                    }
                    break;
                }
            }
            to = to.offset(d_row, d_col);
        }
    }
    moves
}

fn step(board: &Board, from: Position, color: Color, deltas: &[(i8, i8)]) -> Vec<Position> {
    deltas
        .iter()
        .map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&to| to.is_valid() && !board.is_occupied_by(to, color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Piece;

    fn p(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::White)
    }

    fn black(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::Black)
    }

    #[test]
    fn empty_square_has_no_moves() {
        assert!(valid_moves(&Board::initial(), p(4, 4)).is_empty());
        assert!(valid_moves(&Board::initial(), p(9, 9)).is_empty());
    }

    #[test]
    fn pawn_double_step_only_from_start_rank() {
        let board = Board::from_pieces([(p(6, 3), white(PieceKind::Pawn))]);
        assert_eq!(valid_moves(&board, p(6, 3)), vec![p(5, 3), p(4, 3)]);

        let board = board.with_move(p(6, 3), p(5, 3));
        assert_eq!(valid_moves(&board, p(5, 3)), vec![p(4, 3)]);
    }

    #[test]
    fn black_pawn_moves_down_the_board() {
        let board = Board::initial();
        assert_eq!(valid_moves(&board, p(1, 0)), vec![p(2, 0), p(3, 0)]);
    }

    #[test]
    fn pawn_double_step_needs_both_squares_empty() {
        let board = Board::from_pieces([
            (p(6, 2), white(PieceKind::Pawn)),
            (p(5, 2), black(PieceKind::Knight)),
            (p(6, 5), white(PieceKind::Pawn)),
            (p(4, 5), black(PieceKind::Knight)),
        ]);
        assert!(valid_moves(&board, p(6, 2)).is_empty());
        assert_eq!(valid_moves(&board, p(6, 5)), vec![p(5, 5)]);
    }

    #[test]
    fn pawn_captures_only_enemy_diagonals() {
        let board = Board::from_pieces([
            (p(4, 4), white(PieceKind::Pawn)),
            (p(3, 3), black(PieceKind::Rook)),
            (p(3, 5), white(PieceKind::Rook)),
        ]);
        assert_eq!(valid_moves(&board, p(4, 4)), vec![p(3, 4), p(3, 3)]);
    }

    #[test]
    fn pawn_on_edge_file_does_not_wrap() {
        let board = Board::from_pieces([
            (p(4, 0), white(PieceKind::Pawn)),
            (p(3, 7), black(PieceKind::Pawn)),
        ]);
        assert_eq!(valid_moves(&board, p(4, 0)), vec![p(3, 0)]);
    }

    #[test]
    fn rook_stops_before_friend() {
        let board = Board::from_pieces([
            (p(7, 0), white(PieceKind::Rook)),
            (p(7, 2), white(PieceKind::Knight)),
            (p(6, 0), white(PieceKind::Pawn)),
        ]);
        assert_eq!(valid_moves(&board, p(7, 0)), vec![p(7, 1)]);
    }

    #[test]
    fn rook_captures_foe_and_stops() {
        let board = Board::from_pieces([
            (p(7, 0), white(PieceKind::Rook)),
            (p(7, 2), black(PieceKind::Knight)),
            (p(6, 0), white(PieceKind::Pawn)),
        ]);
        let moves = valid_moves(&board, p(7, 0));
        assert_eq!(moves, vec![p(7, 1), p(7, 2)]);
        assert!(!moves.contains(&p(7, 3)));
    }

    #[test]
    fn bishop_rays_from_centre() {
        let board = Board::from_pieces([(p(3, 3), white(PieceKind::Bishop))]);
        assert_eq!(valid_moves(&board, p(3, 3)).len(), 13);
    }

    #[test]
    fn queen_is_rook_plus_bishop() {
        let board = Board::from_pieces([
            (p(3, 3), white(PieceKind::Queen)),
            (p(3, 5), black(PieceKind::Pawn)),
            (p(1, 1), white(PieceKind::Pawn)),
        ]);
        let rook = Board::from_pieces([
            (p(3, 3), white(PieceKind::Rook)),
            (p(3, 5), black(PieceKind::Pawn)),
            (p(1, 1), white(PieceKind::Pawn)),
        ]);
        let bishop = Board::from_pieces([
            (p(3, 3), white(PieceKind::Bishop)),
            (p(3, 5), black(PieceKind::Pawn)),
            (p(1, 1), white(PieceKind::Pawn)),
        ]);
        let mut expected = valid_moves(&rook, p(3, 3));
        expected.extend(valid_moves(&bishop, p(3, 3)));
        assert_eq!(valid_moves(&board, p(3, 3)), expected);
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let board = Board::initial();
        assert_eq!(valid_moves(&board, p(7, 1)), vec![p(5, 0), p(5, 2)]);
    }

    #[test]
    fn king_may_step_into_attack() {
        let board = Board::from_pieces([
            (p(7, 4), white(PieceKind::King)),
            (p(0, 3), black(PieceKind::Rook)),
        ]);
        let moves = valid_moves(&board, p(7, 4));
        assert_eq!(moves.len(), 5);
        assert!(moves.contains(&p(7, 3)));
    }

    #[test]
    fn king_in_corner_skips_own_pieces() {
        let board = Board::from_pieces([
            (p(0, 0), black(PieceKind::King)),
            (p(0, 1), black(PieceKind::Rook)),
            (p(1, 1), white(PieceKind::Pawn)),
        ]);
        assert_eq!(valid_moves(&board, p(0, 0)), vec![p(1, 0), p(1, 1)]);
    }
}
