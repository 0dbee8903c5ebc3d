use super::state::{GameState, GameStatus, Timer};

/// Whether a periodic tick should currently be scheduled.
pub fn should_run(state: &GameState) -> bool {
    state.timer.is_running && state.game_status == GameStatus::Playing
}

/// Flips the running flag. Board and turn are untouched.
pub fn toggle_timer(state: GameState) -> GameState {
    let timer = Timer {
        is_running: !state.timer.is_running,
        ..state.timer
    };
    GameState { timer, ..state }
}

/// One second off the active player's clock.
///
/// Reaching zero ends the game as a loss for the player who ran out. A tick
/// that arrives while the clock should not be running is dropped.
pub fn tick(state: GameState) -> GameState {
    if !should_run(&state) {
        return state;
    }

    let active = state.timer.active_player;
    let remaining = state.timer.remaining(active).saturating_sub(1);
    let timer = state.timer.with_remaining(active, remaining);

    if remaining == 0 {
        return GameState {
            game_status: GameStatus::Checkmate,
            winner: Some(active.opponent()),
            timer: Timer {
                is_running: false,
                ..timer
            },
            ..state
        };
    }

    GameState { timer, ..state }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Color;
    use crate::game::state::initial_state;

    fn running(white: u32, black: u32, active: Color) -> GameState {
        GameState {
            timer: Timer {
                white,
                black,
                is_running: true,
                active_player: active,
            },
            ..initial_state()
        }
    }

    #[test]
    fn tick_decrements_only_active_side() {
        let state = tick(running(600, 600, Color::Black));
        assert_eq!(state.timer.white, 600);
        assert_eq!(state.timer.black, 599);
        assert!(state.timer.is_running);
        assert_eq!(state.game_status, GameStatus::Playing);
    }

    #[test]
    fn last_second_loses_on_time() {
        let state = tick(running(1, 600, Color::White));
        assert_eq!(state.timer.white, 0);
        assert_eq!(state.game_status, GameStatus::Checkmate);
        assert_eq!(state.winner, Some(Color::Black));
        assert!(!state.timer.is_running);
        assert!(!should_run(&state));
    }

    #[test]
    fn already_empty_clock_stays_at_zero() {
        let state = tick(running(600, 0, Color::Black));
        assert_eq!(state.timer.black, 0);
        assert_eq!(state.winner, Some(Color::White));
    }

    #[test]
    fn paused_clock_ignores_tick() {
        let state = initial_state();
        assert!(!should_run(&state));
        assert_eq!(tick(state.clone()), state);
    }

    #[test]
    fn clock_does_not_run_during_check() {
        let state = GameState {
            game_status: GameStatus::Check,
            ..running(600, 600, Color::White)
        };
        assert!(!should_run(&state));
        assert_eq!(tick(state.clone()), state);
    }

    #[test]
    fn toggle_flips_running_flag_only() {
        let state = toggle_timer(initial_state());
        assert!(state.timer.is_running);
        assert_eq!(state.board, initial_state().board);
        assert_eq!(state.current_player, Color::White);
        let state = toggle_timer(state);
        assert_eq!(state, initial_state());
    }
}
