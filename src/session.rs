//! One live game.
//!
//! A `GameSession` actor is the sole owner of a [`GameState`]. Every request
//! it handles swaps the state for the value returned by a pure transition in
//! [`crate::game`], then re-evaluates whether the clock should be ticking and
//! pushes the new snapshot to every subscribed socket. The actor mailbox
//! serialises clicks and clock ticks, so no transition ever observes another
//! half-done.

use actix::prelude::*;
use actix_web::web;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::time::Duration;

use crate::game::utils::game_status_str;
use crate::game::{self, clock, GameState, Position};
use crate::models::{AppState, ChessWebSocketMessage, ServerMessage};

pub struct GameSession {
    id: String,
    state: GameState,
    tick_interval: Duration,
    tick_handle: Option<SpawnHandle>,
    subscribers: HashMap<String, Recipient<ChessWebSocketMessage>>,
    registry: Option<web::Data<AppState>>,
}

impl GameSession {
    pub fn new(id: String, tick_interval: Duration) -> Self {
        GameSession::with_state(id, tick_interval, game::initial_state())
    }

    pub fn with_state(id: String, tick_interval: Duration, state: GameState) -> Self {
        GameSession {
            id,
            state,
            tick_interval,
            tick_handle: None,
            subscribers: HashMap::new(),
            registry: None,
        }
    }

    /// Registers the session under its id; it drops itself from `registry`
    /// when it stops.
    pub fn registered_in(mut self, registry: web::Data<AppState>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replaces the state with `f(state)`, then reschedules and broadcasts.
    fn transition<F>(&mut self, ctx: &mut Context<Self>, f: F) -> GameState
    where
        F: FnOnce(GameState) -> GameState,
    {
        let prev = std::mem::take(&mut self.state);
        let prev_status = prev.game_status;
        self.state = f(prev);

        if self.state.game_status != prev_status {
            info!(
                "Game {} status {} -> {}",
                self.id,
                game_status_str(prev_status),
                game_status_str(self.state.game_status)
            );
        }

        self.reconcile_clock(ctx);
        self.broadcast(&ServerMessage::snapshot("state", &self.id, &self.state));
        self.state.clone()
    }

    fn reconcile_clock(&mut self, ctx: &mut Context<Self>) {
        let should_run = clock::should_run(&self.state);
        if should_run && self.tick_handle.is_none() {
            self.start_clock(ctx);
        } else if !should_run {
            self.stop_clock(ctx);
        }
    }

    fn start_clock(&mut self, ctx: &mut Context<Self>) {
        self.stop_clock(ctx);
        debug!("Game {}: clock started", self.id);
        let handle = ctx.run_interval(self.tick_interval, |act, ctx| {
            act.transition(ctx, clock::tick);
        });
        self.tick_handle = Some(handle);
    }

    fn stop_clock(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.tick_handle.take() {
            debug!("Game {}: clock stopped", self.id);
            ctx.cancel_future(handle);
        }
    }

    fn send_to(&self, recipient: &Recipient<ChessWebSocketMessage>, message: &ServerMessage) {
        match serde_json::to_string(message) {
            Ok(text) => recipient.do_send(ChessWebSocketMessage(text)),
            Err(e) => warn!("Error serializing message: {}", e),
        }
    }

    fn broadcast(&self, message: &ServerMessage) {
        if self.subscribers.is_empty() {
            return;
        }
        let text = match serde_json::to_string(message) {
            Ok(s) => s,
            Err(e) => {
                warn!("Error serializing message: {}", e);
                return;
            }
        };
        debug!(
            "Broadcasting {} to {} connection(s) of game {}",
            message.message_type,
            self.subscribers.len(),
            self.id
        );
        for recipient in self.subscribers.values() {
            recipient.do_send(ChessWebSocketMessage(text.clone()));
        }
    }
}

impl Actor for GameSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("Game session {} started", self.id);
        if let Some(registry) = &self.registry {
            registry.register(&self.id, ctx.address());
            info!("Total active games: {}", registry.game_count());
        }
        self.reconcile_clock(ctx);
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        info!("Game session {} stopped", self.id);
        if let Some(registry) = &self.registry {
            registry.remove(&self.id);
            info!("Total active games: {}", registry.game_count());
        }
    }
}

/// Attach a socket to this game. The socket is sent one snapshot tagged
/// `greeting`, then every later snapshot.
#[derive(Message)]
#[rtype(result = "GameState")]
pub struct Subscribe {
    pub conn_id: String,
    pub greeting: &'static str,
    pub recipient: Recipient<ChessWebSocketMessage>,
}

/// Detach a socket. The session stops once nobody is left.
#[derive(Message)]
#[rtype(result = "usize")]
pub struct Unsubscribe {
    pub conn_id: String,
}

#[derive(Message)]
#[rtype(result = "GameState")]
pub struct SelectSquare(pub Position);

#[derive(Message)]
#[rtype(result = "GameState")]
pub struct ToggleTimer;

#[derive(Message)]
#[rtype(result = "GameState")]
pub struct ResetGame;

#[derive(Message)]
#[rtype(result = "GameState")]
pub struct GetState;

impl Handler<Subscribe> for GameSession {
    type Result = MessageResult<Subscribe>;

    fn handle(&mut self, msg: Subscribe, _: &mut Self::Context) -> Self::Result {
        info!("Connection {} joined game {}", msg.conn_id, self.id);
        self.send_to(
            &msg.recipient,
            &ServerMessage::snapshot(msg.greeting, &self.id, &self.state),
        );
        self.subscribers.insert(msg.conn_id, msg.recipient);
        MessageResult(self.state.clone())
    }
}

impl Handler<Unsubscribe> for GameSession {
    type Result = usize;

    fn handle(&mut self, msg: Unsubscribe, ctx: &mut Self::Context) -> usize {
        self.subscribers.remove(&msg.conn_id);
        info!("Connection {} left game {}", msg.conn_id, self.id);
        if self.subscribers.is_empty() {
            info!("No more connections in game {}. Cleaning up.", self.id);
            self.stop_clock(ctx);
            ctx.stop();
        }
        self.subscribers.len()
    }
}

impl Handler<SelectSquare> for GameSession {
    type Result = MessageResult<SelectSquare>;

    fn handle(&mut self, msg: SelectSquare, ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.transition(ctx, |state| game::select_square(state, msg.0)))
    }
}

impl Handler<ToggleTimer> for GameSession {
    type Result = MessageResult<ToggleTimer>;

    fn handle(&mut self, _: ToggleTimer, ctx: &mut Self::Context) -> Self::Result {
        // A fresh run replaces whatever tick was pending.
        self.stop_clock(ctx);
        MessageResult(self.transition(ctx, clock::toggle_timer))
    }
}

impl Handler<ResetGame> for GameSession {
    type Result = MessageResult<ResetGame>;

    fn handle(&mut self, _: ResetGame, ctx: &mut Self::Context) -> Self::Result {
        self.stop_clock(ctx);
        MessageResult(self.transition(ctx, |_| game::reset_game()))
    }
}

impl Handler<GetState> for GameSession {
    type Result = MessageResult<GetState>;

    fn handle(&mut self, _: GetState, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.state.clone())
    }
}
