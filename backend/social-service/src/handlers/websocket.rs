//! Live notification stream
//!
//! Each session registers with the local `ConnectionManager`; notifications pushed
//! by the dispatcher arrive as JSON text frames. Clients only ever send pongs.

use super::UserId;
use crate::state::AppState;
use actix::{Actor, ActorContext, ActorFutureExt, AsyncContext, StreamHandler, WrapFuture};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use notification_service::{ConnectionManager, WebSocketMessage};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, info, warn};
use uuid::Uuid;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct NotificationSession {
    user_id: Uuid,
    hub: ConnectionManager,
    connection_id: Option<Uuid>,
    hb: Instant,
}

impl NotificationSession {
    pub fn new(user_id: Uuid, hub: ConnectionManager) -> Self {
        Self {
            user_id,
            hub,
            connection_id: None,
            hb: Instant::now(),
        }
    }

    fn hb(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                warn!(user = %act.user_id, "WebSocket heartbeat failed, disconnecting");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn send(&self, message: &WebSocketMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match message.to_json() {
            Ok(text) => ctx.text(text),
            Err(e) => warn!(user = %self.user_id, error = %e, "Failed to encode WebSocket message"),
        }
    }
}

impl Actor for NotificationSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.hb(ctx);

        let (tx, rx) = mpsc::unbounded_channel();
        ctx.add_stream(UnboundedReceiverStream::new(rx));

        let hub = self.hub.clone();
        let user_id = self.user_id;
        ctx.wait(
            async move { hub.subscribe(user_id, tx).await }
                .into_actor(self)
                .map(|connection_id, act, ctx| {
                    act.connection_id = Some(connection_id);
                    info!(
                        user = %act.user_id,
                        connection = %connection_id,
                        "Notification stream opened"
                    );
                    act.send(&WebSocketMessage::connected(connection_id.to_string()), ctx);
                }),
        );
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(connection_id) = self.connection_id.take() {
            let hub = self.hub.clone();
            let user_id = self.user_id;
            actix::spawn(async move {
                hub.unsubscribe(user_id, connection_id).await;
            });
            info!(user = %user_id, connection = %connection_id, "Notification stream closed");
        }
    }
}

/// Messages routed to this session by the hub
impl StreamHandler<WebSocketMessage> for NotificationSession {
    fn handle(&mut self, message: WebSocketMessage, ctx: &mut Self::Context) {
        self.send(&message, ctx);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for NotificationSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => match WebSocketMessage::from_json(&text) {
                Ok(WebSocketMessage::Pong { .. }) => {
                    self.hb = Instant::now();
                }
                Ok(_) | Err(_) => {
                    debug!(user = %self.user_id, "Ignoring unsupported client message");
                    self.send(
                        &WebSocketMessage::error("UNSUPPORTED", "Clients may only send pong"),
                        ctx,
                    );
                }
            },
            Ok(ws::Message::Binary(_)) => {
                warn!("Binary WebSocket messages not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!(user = %self.user_id, error = %e, "WebSocket protocol error");
                ctx.stop();
            }
            _ => {}
        }
    }
}

/// GET /ws/notifications
pub async fn notifications_ws(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
    caller: UserId,
) -> Result<HttpResponse, Error> {
    ws::start(
        NotificationSession::new(caller.0, state.hub.clone()),
        &req,
        stream,
    )
}
