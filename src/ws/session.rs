//! The session/transport adapter (component F): one actix actor per
//! websocket connection, mirroring the teacher's `ws::session::WsSession`
//! almost exactly — the same 20s heartbeat / 40s timeout bookkeeping and
//! the same "parse fails ⇒ send `error` and close" discipline for
//! malformed frames. Unlike the teacher, `join_room` both seats the client
//! and subscribes it to that room's broadcast fan-out; there is no separate
//! subscribe/unsubscribe pair (§4.F Expansion).

use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};

use crate::error::GameError;
use crate::room::{ClientId, Room, RoomError};
use crate::state::AppState;
use crate::ws::hub::Deliver;
use crate::ws::protocol::{to_bid_action, ClientMsg, ServerMsg};

/// The `type` tags `ClientMsg` knows how to parse (§4.F). Checked before the
/// full deserialize so an unrecognized type reports `GameError::UnknownType`
/// rather than whatever `serde`'s generic "unknown variant" text would say.
const KNOWN_CLIENT_MSG_TYPES: &[&str] = &[
    "join_room",
    "start_game",
    "play_card",
    "choose_trump",
    "announce_belote",
];

/// Two-stage parse of an inbound frame (§7 `ProtocolError`): first extract
/// and validate the `type` tag, then fully deserialize. Distinguishes an
/// unrecognized type from any other malformed envelope so both `GameError`
/// variants are actually reachable.
fn parse_client_msg(text: &str) -> Result<ClientMsg, GameError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|err| GameError::Protocol(err.to_string()))?;
    let tag = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| GameError::Protocol("missing field `type`".to_string()))?;
    if !KNOWN_CLIENT_MSG_TYPES.contains(&tag) {
        return Err(GameError::UnknownType(tag.to_string()));
    }
    serde_json::from_value(value).map_err(|err| GameError::Protocol(err.to_string()))
}

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let conn_id = ClientId::new_v4();
    let session = ClientSession::new(conn_id, app_state.get_ref().clone());
    ws::start(session, &req, stream)
}

pub struct ClientSession {
    conn_id: ClientId,
    app_state: AppState,
    room_code: Option<String>,
    last_heartbeat: Instant,
}

impl ClientSession {
    fn new(conn_id: ClientId, app_state: AppState) -> Self {
        Self {
            conn_id,
            app_state,
            room_code: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, message: impl Into<String>) {
        Self::send_json(ctx, &ServerMsg::error(message));
    }

    fn send_error_and_close(ctx: &mut ws::WebsocketContext<Self>, message: impl Into<String>) {
        Self::send_error(ctx, message);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    /// Dispatch an already-parsed command to the current room, then
    /// broadcast the resulting per-viewer state on success. Room/domain
    /// rejections are reported to the sender only (§7 propagation policy);
    /// they never close the socket. Distinguishes never having joined a
    /// room at all from holding a room code the registry no longer
    /// resolves — e.g. the room emptied out and was dropped while this
    /// session still remembered it — surfacing `RoomError::RoomNotFound`
    /// for the latter (§4.E, §7).
    fn dispatch(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        command: impl FnOnce(&Room, ClientId) -> Result<(), RoomError>,
    ) {
        let Some(code) = self.room_code.as_ref() else {
            Self::send_error(ctx, "join a room before sending this command");
            return;
        };
        let Some(room) = self.app_state.rooms().get(code) else {
            Self::send_error(ctx, GameError::from(RoomError::RoomNotFound).message());
            return;
        };
        match command(&room, self.conn_id) {
            Ok(()) => {
                if let Some(views) = room.deal_views() {
                    self.app_state.hub().broadcast_views(code, views);
                }
            }
            Err(err) => Self::send_error(ctx, GameError::from(err).message()),
        }
    }

    /// Vacate this session's seat in `old_code`, matching the teardown
    /// `stopped()` performs on disconnect: unregister from the hub first,
    /// then release the seat and either broadcast the updated roster or
    /// drop the room if it's now empty.
    fn leave_room(&self, old_code: &str) {
        self.app_state.hub().unregister(old_code, self.conn_id);
        if let Some(old_room) = self.app_state.rooms().get(old_code) {
            match old_room.disconnect(self.conn_id) {
                Some(roster) => self
                    .app_state
                    .hub()
                    .broadcast(old_code, ServerMsg::room_update(roster)),
                None => self.app_state.rooms().remove_if_empty(old_code),
            }
        }
    }

    fn handle_join_room(
        &mut self,
        ctx: &mut ws::WebsocketContext<Self>,
        room_code: String,
        nickname: String,
    ) {
        let normalized = room_code.trim().to_uppercase();
        if normalized.is_empty() {
            Self::send_error(ctx, "room code must not be empty");
            return;
        }

        let room = self.app_state.rooms().get_or_create(&normalized);
        match room.join(self.conn_id, nickname) {
            Ok(roster) => {
                // §3: a client occupies at most one seat across all rooms
                // at any instant. Only once the new seat is secured do we
                // vacate the old one, so a rejected join (room full) never
                // costs the client their existing seat.
                if let Some(old) = self.room_code.clone() {
                    if old != normalized {
                        self.leave_room(&old);
                    }
                }
                self.room_code = Some(normalized.clone());
                let recipient = ctx.address().recipient::<Deliver>();
                self.app_state
                    .hub()
                    .register(&normalized, self.conn_id, recipient);
                info!(room = %normalized, client = %self.conn_id, "[WS SESSION] joined room");
                self.app_state
                    .hub()
                    .broadcast(&normalized, ServerMsg::room_update(roster));
            }
            Err(err) => Self::send_error(ctx, GameError::from(err).message()),
        }
    }
}

impl Actor for ClientSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(code) = self.room_code.take() {
            self.app_state.hub().unregister(&code, self.conn_id);
            if let Some(room) = self.app_state.rooms().get(&code) {
                match room.disconnect(self.conn_id) {
                    Some(roster) => {
                        self.app_state
                            .hub()
                            .broadcast(&code, ServerMsg::room_update(roster));
                    }
                    None => self.app_state.rooms().remove_if_empty(&code),
                }
            }
        }
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ClientSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                let cmd = match parse_client_msg(&text) {
                    Ok(cmd) => cmd,
                    Err(err) => {
                        Self::send_error_and_close(ctx, err.message());
                        return;
                    }
                };
                debug!(conn_id = %self.conn_id, "[WS SESSION] dispatching command");
                match cmd {
                    ClientMsg::JoinRoom {
                        room_code,
                        nickname,
                    } => self.handle_join_room(ctx, room_code, nickname),
                    ClientMsg::StartGame => {
                        self.dispatch(ctx, |room, client| room.start_game(client))
                    }
                    ClientMsg::PlayCard { card } => {
                        self.dispatch(ctx, |room, client| room.play_card(client, card))
                    }
                    ClientMsg::ChooseTrump { action, suit } => self
                        .dispatch(ctx, |room, client| {
                            room.submit_bid(client, to_bid_action(action, suit))
                        }),
                    ClientMsg::AnnounceBelote => {
                        self.dispatch(ctx, |room, client| room.announce_belote(client))
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error_and_close(ctx, "binary frames are not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Deliver> for ClientSession {
    type Result = ();

    fn handle(&mut self, msg: Deliver, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
