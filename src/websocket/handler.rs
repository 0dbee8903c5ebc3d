use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{info, warn};
use uuid::Uuid;

use crate::models::{
    AppState, ChessWebSocketMessage, ClientMessage, Command, ProtocolError, ServerMessage,
};
use crate::session::{
    GameSession, ResetGame, SelectSquare, Subscribe, ToggleTimer, Unsubscribe,
};

/// WebSocket handler for chess games
pub struct ChessWebSocket {
    pub id: String,
    pub app_state: web::Data<AppState>,
    pub game_id: String,
    pub session: Option<Addr<GameSession>>,
}

impl ChessWebSocket {
    pub fn new(app_state: web::Data<AppState>) -> Self {
        ChessWebSocket {
            id: Uuid::new_v4().to_string(),
            app_state,
            game_id: String::new(),
            session: None,
        }
    }

    fn game_id(&self) -> Option<&str> {
        if self.game_id.is_empty() {
            None
        } else {
            Some(&self.game_id)
        }
    }

    fn send_error(&self, err: &ProtocolError, ctx: &mut ws::WebsocketContext<Self>) {
        warn!("Connection {}: {}", self.id, err);
        match serde_json::to_string(&ServerMessage::error(self.game_id(), err)) {
            Ok(text) => ctx.text(text),
            Err(e) => warn!("Error serializing error message: {}", e),
        }
    }

    pub fn handle_message(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let result = ClientMessage::parse(text).and_then(|command| {
            info!("Connection {}: {:?}", self.id, command);
            self.handle_command(command, ctx)
        });
        if let Err(err) = result {
            self.send_error(&err, ctx);
        }
    }

    fn handle_command(
        &mut self,
        command: Command,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Result<(), ProtocolError> {
        match command {
            Command::Create => {
                self.handle_create(ctx);
                Ok(())
            }
            Command::Join(game_id) => self.handle_join(game_id, ctx),
            Command::Select(pos) => self.forward(SelectSquare(pos)),
            Command::ToggleTimer => self.forward(ToggleTimer),
            Command::Reset => self.forward(ResetGame),
            Command::State => {
                let session = self.current_session()?;
                self.subscribe(session, "state", ctx)
            }
        }
    }

    fn current_session(&self) -> Result<Addr<GameSession>, ProtocolError> {
        self.session.clone().ok_or(ProtocolError::NotInGame)
    }

    /// Hands a request to the game's session; the session answers every
    /// subscriber with a fresh snapshot.
    fn forward<M>(&self, msg: M) -> Result<(), ProtocolError>
    where
        M: Message + Send + 'static,
        M::Result: Send,
        GameSession: Handler<M>,
    {
        deliver(&self.current_session()?, msg)
    }

    fn subscribe(
        &self,
        session: Addr<GameSession>,
        greeting: &'static str,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Result<(), ProtocolError> {
        let msg = Subscribe {
            conn_id: self.id.clone(),
            greeting,
            recipient: ctx.address().recipient(),
        };
        deliver(&session, msg)
    }

    fn leave_game(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Removing connection {} from game {}", self.id, self.game_id);
            session.do_send(Unsubscribe {
                conn_id: self.id.clone(),
            });
        }
        self.game_id.clear();
    }

    fn handle_create(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        self.leave_game();

        let game_id = Uuid::new_v4().to_string();
        info!("Creating game {} for connection {}", game_id, self.id);
        let session = GameSession::new(game_id.clone(), self.app_state.tick_interval)
            .registered_in(self.app_state.clone())
            .start();

        // A freshly started session cannot have a closed mailbox.
        session.do_send(Subscribe {
            conn_id: self.id.clone(),
            greeting: "game_created",
            recipient: ctx.address().recipient(),
        });
        self.game_id = game_id;
        self.session = Some(session);
    }

    fn handle_join(
        &mut self,
        game_id: String,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Result<(), ProtocolError> {
        let session = self
            .app_state
            .find(&game_id)
            .ok_or_else(|| ProtocolError::GameNotFound(game_id.clone()))?;

        if self.game_id != game_id {
            self.leave_game();
        }
        self.subscribe(session.clone(), "joined", ctx)?;
        self.game_id = game_id;
        self.session = Some(session);
        Ok(())
    }
}

impl Actor for ChessWebSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, _: &mut Self::Context) {
        info!("WebSocket connection started: {}", self.id);
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        self.leave_game();
        info!("WebSocket connection closed: {}", self.id);
        Running::Stop
    }
}

impl Handler<ChessWebSocketMessage> for ChessWebSocket {
    type Result = ();

    fn handle(&mut self, msg: ChessWebSocketMessage, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

// WebSocket message handler
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ChessWebSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Text(text)) => {
                self.handle_message(&text, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.send_error(&ProtocolError::Binary, ctx);
            }
            Ok(ws::Message::Close(reason)) => {
                info!("Connection closed: {:?}", reason);
                ctx.close(reason);
                ctx.stop();
            }
            _ => {
                ctx.stop();
            }
        }
    }
}

/// Queues `msg` for the session. A full mailbox still accepts the message;
/// only a stopped session is an error.
fn deliver<M>(session: &Addr<GameSession>, msg: M) -> Result<(), ProtocolError>
where
    M: Message + Send + 'static,
    M::Result: Send,
    GameSession: Handler<M>,
{
    match session.try_send(msg) {
        Ok(()) => Ok(()),
        Err(SendError::Full(msg)) => {
            session.do_send(msg);
            Ok(())
        }
        Err(SendError::Closed(_)) => Err(ProtocolError::SessionClosed),
    }
}

/// WebSocket connection handler
pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let ws = ChessWebSocket::new(app_state);
    info!("New WebSocket connection: {}", ws.id);
    ws::start(ws, &req, stream)
}
