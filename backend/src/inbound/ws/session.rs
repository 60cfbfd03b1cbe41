//! Per-connection explorer session.
//!
//! Each connection owns its [`ExplorerState`]; the catalogue and territory
//! data are shared read-only through the [`ExplorerContext`]. Search and
//! price actions are debounced on the trailing edge, every other action is
//! applied immediately after flushing anything still queued.
//!
//! The public WebSocket contract pings every 5s and considers a connection
//! idle after 10s without client traffic. Tests shorten these intervals.

use std::time::Instant;

use actix_ws::{CloseCode, CloseReason, Closed, Message, MessageStream, ProtocolError, Session};
use tokio::time::{self, Duration};
use tracing::{debug, warn};

use crate::domain::geo::DeviceProfile;
use crate::domain::{
    DEFAULT_MAX_RESULTS, Error, ExplorerAction, ExplorerContext, ExplorerState, TraceId, reduce,
    render,
};
use crate::inbound::http::search::{MAX_LIMIT, search_hits};
use crate::inbound::ws::debounce::Debouncer;
use crate::inbound::ws::messages::{ClientMessage, ServerMessage};
use crate::inbound::ws::state::WsState;

/// Time between heartbeats to the client (5s in production, shorter in tests).
#[cfg(not(test))]
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
#[cfg(test)]
const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(50);

/// Max idle time before disconnecting the client (10s in production, shorter in tests).
#[cfg(not(test))]
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);
#[cfg(test)]
const CLIENT_TIMEOUT: Duration = Duration::from_millis(100);

pub(super) async fn handle_ws_session(state: WsState, session: Session, stream: MessageStream) {
    WsSession::new(&state).run(session, stream).await;
}

enum SessionError {
    ClientClosed(Option<CloseReason>),
    StreamClosed,
    HeartbeatTimeout,
    Protocol(ProtocolError),
    InvalidPayload,
    Network(Closed),
}

enum CloseAction {
    None,
    Close(Option<CloseReason>),
}

struct WsSession {
    context: ExplorerContext,
    state: ExplorerState,
    device: DeviceProfile,
    debouncer: Debouncer,
}

/// Resolve at `deadline`, or never when nothing is queued.
async fn debounce_elapsed(deadline: Option<time::Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl WsSession {
    fn new(ws_state: &WsState) -> Self {
        let context = ws_state.context.clone();
        let state = ExplorerState::initial(context.catalogue());
        Self {
            context,
            state,
            device: DeviceProfile::default(),
            debouncer: Debouncer::new(ws_state.debounce),
        }
    }

    async fn run(mut self, mut session: Session, mut stream: MessageStream) {
        let mut last_heartbeat = Instant::now();
        let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);

        if let Err(error) = self.send_state(&mut session, TraceId::generate()).await {
            warn!(error = %error, "WebSocket send failed before the first frame");
            return;
        }

        loop {
            let deadline = self.debouncer.next_deadline();
            let result = tokio::select! {
                _ = heartbeat.tick() => {
                    Self::handle_heartbeat_tick(&mut session, &last_heartbeat).await
                }
                () = debounce_elapsed(deadline) => {
                    self.flush_due(&mut session).await.map_err(SessionError::Network)
                }
                message = stream.recv() => {
                    self.handle_stream_message(&mut session, &mut last_heartbeat, message)
                        .await
                }
            };

            if let Err(error) = result {
                Self::log_shutdown_reason(&error);
                let close_action = Self::close_action_for(&error);
                Self::close_session_if_needed(session, close_action).await;
                return;
            }
        }
    }

    async fn handle_heartbeat_tick(
        session: &mut Session,
        last_heartbeat: &Instant,
    ) -> Result<(), SessionError> {
        if Instant::now().duration_since(*last_heartbeat) > CLIENT_TIMEOUT {
            return Err(SessionError::HeartbeatTimeout);
        }

        session.ping(b"").await.map_err(SessionError::Network)
    }

    async fn handle_stream_message(
        &mut self,
        session: &mut Session,
        last_heartbeat: &mut Instant,
        message: Option<Result<Message, ProtocolError>>,
    ) -> Result<(), SessionError> {
        let Some(message) = message else {
            return Err(SessionError::StreamClosed);
        };

        match message {
            Ok(message) => self.handle_message(session, last_heartbeat, message).await,
            Err(error) => Err(SessionError::Protocol(error)),
        }
    }

    async fn handle_message(
        &mut self,
        session: &mut Session,
        last_heartbeat: &mut Instant,
        message: Message,
    ) -> Result<(), SessionError> {
        match message {
            Message::Ping(payload) => {
                *last_heartbeat = Instant::now();
                session
                    .pong(&payload)
                    .await
                    .map_err(SessionError::Network)?;
                Ok(())
            }
            Message::Text(text) => {
                *last_heartbeat = Instant::now();
                self.handle_text_message(session, text.as_ref()).await
            }
            Message::Pong(_) | Message::Binary(_) | Message::Continuation(_) | Message::Nop => {
                *last_heartbeat = Instant::now();
                Ok(())
            }
            Message::Close(reason) => Err(SessionError::ClientClosed(reason)),
        }
    }

    async fn handle_text_message(
        &mut self,
        session: &mut Session,
        text: &str,
    ) -> Result<(), SessionError> {
        let message = match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => message,
            Err(error) => {
                warn!(error = %error, "Rejected malformed WebSocket payload");
                return Err(SessionError::InvalidPayload);
            }
        };

        let trace_id = TraceId::generate();
        TraceId::scope(
            trace_id,
            self.handle_client_message(session, trace_id, message),
        )
        .await
        .map_err(SessionError::Network)
    }

    async fn handle_client_message(
        &mut self,
        session: &mut Session,
        trace_id: TraceId,
        message: ClientMessage,
    ) -> Result<(), Closed> {
        match message {
            ClientMessage::Action { action, device } => {
                if let Some(class) = action.debounce_class() {
                    debug!(?class, %trace_id, "queueing debounced action");
                    self.debouncer
                        .push(class, action, device, time::Instant::now());
                    return Ok(());
                }
                for pending in self.debouncer.drain() {
                    if let Err(error) = self.apply(pending.action, pending.device) {
                        debug!(%trace_id, code = ?error.code(), "queued action rejected");
                        Self::send(session, &ServerMessage::error(trace_id, error)).await?;
                    }
                }
                self.apply_and_send(session, trace_id, action, device).await
            }
            ClientMessage::Search { query, limit } => {
                let limit = limit.unwrap_or(DEFAULT_MAX_RESULTS);
                if limit > MAX_LIMIT {
                    let error = Error::invalid_request(format!(
                        "limit must be at most {MAX_LIMIT}"
                    ))
                    .with_details(serde_json::json!({ "field": "limit", "max": MAX_LIMIT }));
                    return Self::send(session, &ServerMessage::error(trace_id, error)).await;
                }
                let query = query.trim().to_owned();
                let results = search_hits(self.context.catalogue(), &query, limit);
                let message = ServerMessage::SearchResults {
                    trace_id,
                    query,
                    results,
                };
                Self::send(session, &message).await
            }
            ClientMessage::Resize { device } => {
                self.device = device;
                self.send_state(session, trace_id).await
            }
        }
    }

    async fn flush_due(&mut self, session: &mut Session) -> Result<(), Closed> {
        for pending in self.debouncer.take_due(time::Instant::now()) {
            let trace_id = TraceId::generate();
            TraceId::scope(
                trace_id,
                self.apply_and_send(session, trace_id, pending.action, pending.device),
            )
            .await?;
        }
        Ok(())
    }

    async fn apply_and_send(
        &mut self,
        session: &mut Session,
        trace_id: TraceId,
        action: ExplorerAction,
        device: Option<DeviceProfile>,
    ) -> Result<(), Closed> {
        match self.apply(action, device) {
            Ok(()) => self.send_state(session, trace_id).await,
            Err(error) => {
                debug!(%trace_id, code = ?error.code(), "explorer action rejected");
                Self::send(session, &ServerMessage::error(trace_id, error)).await
            }
        }
    }

    /// Reduce `action` into the owned state; a rejected action changes nothing.
    fn apply(
        &mut self,
        action: ExplorerAction,
        device: Option<DeviceProfile>,
    ) -> Result<(), Error> {
        let next = reduce(self.context.catalogue(), &self.state, action)?;
        self.state = next;
        if let Some(device) = device {
            self.device = device;
        }
        Ok(())
    }

    async fn send_state(&self, session: &mut Session, trace_id: TraceId) -> Result<(), Closed> {
        let view = render(&self.context, &self.state, &self.device);
        let message = ServerMessage::State {
            trace_id,
            state: self.state.clone(),
            view,
        };
        Self::send(session, &message).await
    }

    async fn send(session: &mut Session, payload: &ServerMessage) -> Result<(), Closed> {
        match serde_json::to_string(payload) {
            Ok(body) => session.text(body).await,
            Err(error) => {
                // Debug builds fail fast on schema drift; release builds keep the connection.
                if cfg!(debug_assertions) {
                    panic!("explorer frames must serialize: {error}");
                } else {
                    warn!(error = %error, "Failed to serialize WebSocket payload");
                }
                Ok(())
            }
        }
    }

    fn log_shutdown_reason(error: &SessionError) {
        match error {
            SessionError::HeartbeatTimeout => {
                warn!("WebSocket heartbeat timeout; closing connection");
            }
            SessionError::Protocol(error) => {
                warn!(error = %error, "WebSocket protocol error");
            }
            SessionError::Network(error) => {
                warn!(error = %error, "WebSocket send failed; closing connection");
            }
            SessionError::InvalidPayload
            | SessionError::ClientClosed(_)
            | SessionError::StreamClosed => {}
        }
    }

    fn close_action_for(error: &SessionError) -> CloseAction {
        match error {
            SessionError::HeartbeatTimeout => CloseAction::Close(Some(CloseReason {
                code: CloseCode::Normal,
                description: Some("heartbeat timeout".to_owned()),
            })),
            SessionError::Protocol(_) => CloseAction::Close(Some(CloseReason {
                code: CloseCode::Protocol,
                description: Some("protocol error".to_owned()),
            })),
            SessionError::InvalidPayload => CloseAction::Close(Some(CloseReason {
                code: CloseCode::Policy,
                description: Some("invalid payload".to_owned()),
            })),
            SessionError::ClientClosed(reason) => CloseAction::Close(reason.clone()),
            SessionError::StreamClosed | SessionError::Network(_) => CloseAction::None,
        }
    }

    async fn close_session_if_needed(session: Session, close_action: CloseAction) {
        if let CloseAction::Close(reason) = close_action {
            if let Err(error) = session.close(reason).await {
                warn!(error = %error, "Failed to close WebSocket session");
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
