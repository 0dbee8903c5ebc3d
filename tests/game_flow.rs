use hotseat_chess::game::{
    initial_state, make_move, reset_game, select_square, tick, toggle_timer, Board, Color,
    GameState, GameStatus, Piece, PieceKind, Position, Timer,
};

fn p(row: i8, col: i8) -> Position {
    Position::new(row, col)
}

fn click(state: GameState, from: Position, to: Position) -> GameState {
    select_square(select_square(state, from), to)
}

#[test]
fn opening_moves_alternate_turns() {
    let state = click(initial_state(), p(6, 4), p(4, 4));
    assert_eq!(state.current_player, Color::Black);

    // White may not move twice.
    let again = select_square(state.clone(), p(6, 3));
    assert_eq!(again.selected_square, None);

    let state = click(state, p(1, 4), p(3, 4));
    assert_eq!(state.current_player, Color::White);
    assert_eq!(state.move_history.len(), 2);
    assert_eq!(state.move_history[1].piece.color, Color::Black);
    assert!(state.move_history[0].timestamp <= state.move_history[1].timestamp);
}

#[test]
fn check_then_escape_returns_to_playing() {
    let board = Board::from_pieces([
        (p(7, 4), Piece::new(PieceKind::King, Color::White)),
        (p(0, 4), Piece::new(PieceKind::King, Color::Black)),
        (p(5, 0), Piece::new(PieceKind::Rook, Color::White)),
    ]);
    let state = GameState {
        board,
        ..initial_state()
    };
    let state = toggle_timer(state);

    let state = click(state, p(5, 0), p(5, 4));
    assert_eq!(state.game_status, GameStatus::Check);
    assert!(!state.timer.is_running);

    // The clock stays frozen while in check.
    assert_eq!(tick(state.clone()), state);

    let state = click(state, p(0, 4), p(0, 3));
    assert_eq!(state.game_status, GameStatus::Playing);
    assert_eq!(state.current_player, Color::White);
}

#[test]
fn scholars_mate() {
    let moves = [
        (p(6, 4), p(4, 4)),
        (p(1, 4), p(3, 4)),
        (p(7, 5), p(4, 2)),
        (p(0, 1), p(2, 2)),
        (p(7, 3), p(3, 7)),
        (p(0, 6), p(2, 5)),
        (p(3, 7), p(1, 5)),
    ];
    let mut state = initial_state();
    for (from, to) in moves {
        state = click(state, from, to);
    }
    assert_eq!(state.game_status, GameStatus::Checkmate);
    assert_eq!(state.winner, Some(Color::White));
    assert_eq!(
        state.move_history.last().and_then(|m| m.captured_piece),
        Some(Piece::new(PieceKind::Pawn, Color::Black))
    );
}

#[test]
fn no_legal_moves_without_check_stays_playing() {
    // Black king in the corner with every flight square covered but not
    // attacked itself. Never classified as stalemate.
    let board = Board::from_pieces([
        (p(0, 0), Piece::new(PieceKind::King, Color::Black)),
        (p(2, 1), Piece::new(PieceKind::Queen, Color::White)),
        (p(7, 7), Piece::new(PieceKind::King, Color::White)),
    ]);
    let state = GameState {
        board,
        ..initial_state()
    };
    let state = make_move(state, p(7, 7), p(7, 6));
    assert_eq!(state.current_player, Color::Black);
    assert_eq!(state.game_status, GameStatus::Playing);
    assert_eq!(state.winner, None);
}

#[test]
fn timeout_ends_game_for_the_active_player() {
    let state = GameState {
        timer: Timer {
            white: 600,
            black: 2,
            is_running: true,
            active_player: Color::Black,
        },
        ..initial_state()
    };
    let state = tick(state);
    assert_eq!(state.timer.black, 1);
    assert_eq!(state.game_status, GameStatus::Playing);

    let state = tick(state);
    assert_eq!(state.timer.black, 0);
    assert_eq!(state.game_status, GameStatus::Checkmate);
    assert_eq!(state.winner, Some(Color::White));
    assert!(!state.timer.is_running);

    // No further ticks once the game is over.
    assert_eq!(tick(state.clone()), state);
}

#[test]
fn reset_is_always_the_initial_state() {
    let mut state = toggle_timer(initial_state());
    for _ in 0..5 {
        state = tick(state);
    }
    state = click(state, p(6, 4), p(4, 4));
    state = tick(state);
    state = click(state, p(1, 3), p(3, 3));
    assert_eq!(state.timer.white, 595);
    assert_eq!(state.timer.black, 599);
    assert_ne!(state, initial_state());

    let fresh = reset_game();
    assert_eq!(fresh, initial_state());
    assert_eq!(fresh.board, Board::initial());
    assert_eq!(fresh.timer, Timer::default());
    assert!(!fresh.timer.is_running);
}
