//! Two-player, same-device chess with per-side countdown clocks.
//!
//! [`game`] holds the rules engine and the pure state machine. The rest of
//! the crate hosts one [`session::GameSession`] actor per game and exposes it
//! to a browser front-end over a WebSocket.

pub mod config;
pub mod game;
pub mod models;
pub mod routes;
pub mod session;
pub mod websocket;
