//! Route handlers for the streaming protocol endpoint.
//!
//! A client opens `GET /sse` and holds the response open. The first event on
//! the stream is `endpoint`, carrying the callback address for invocations.
//! The client then posts invocations to `POST /messages?sessionId=<id>`;
//! results come back on the open stream as `message` events, uncaught
//! failures as `error` events. Closing the connection (either side) removes
//! the session; its identifier is invalid from then on.

use std::{convert::Infallible, sync::Arc};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{
        IntoResponse, Sse,
        sse::{Event, KeepAlive},
    },
    routing::{get, post},
};
use futures::{
    future,
    stream::{self, Stream, StreamExt},
};
use jokebox_core::CallToolRequest;
use jokebox_session::{Session, SessionEvent, SessionId, SessionRegistry};
use jokebox_tools::{ToolDescriptor, ToolRegistry};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Fixed sub-path clients post invocations to.
pub const MESSAGES_PATH: &str = "/messages";

/// Shared state behind every route.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
    pub tools: Arc<ToolRegistry>,
}

impl AppState {
    #[must_use]
    pub fn new(sessions: Arc<SessionRegistry>, tools: Arc<ToolRegistry>) -> Self {
        Self { sessions, tools }
    }
}

/// Build the server router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/sse", get(sse_handler))
        .route(MESSAGES_PATH, post(messages_handler))
        .route("/tools", get(tools_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "jokebox is running"
}

async fn tools_handler(State(state): State<AppState>) -> Json<Vec<ToolDescriptor>> {
    Json(state.tools.descriptors())
}

/// Unregisters the session when the SSE stream is dropped, whichever side
/// closed the connection.
struct DisconnectGuard {
    id: SessionId,
    sessions: Arc<SessionRegistry>,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        self.sessions.unregister(self.id);
        tracing::info!(session_id = %self.id, "connection closed");
    }
}

async fn sse_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::unbounded_channel();
    let session = Arc::new(Session::new(tx, Arc::clone(&state.tools)));
    let id = state.sessions.register(session);

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let endpoint = format!("http://{host}{MESSAGES_PATH}?sessionId={id}");
    tracing::info!(session_id = %id, endpoint = %endpoint, "connection opened");

    let guard = DisconnectGuard {
        id,
        sessions: Arc::clone(&state.sessions),
    };

    let opening = stream::once(future::ready(Ok::<_, Infallible>(
        Event::default().event("endpoint").data(endpoint),
    )));
    let live = UnboundedReceiverStream::new(rx).map(move |event| {
        // The guard lives exactly as long as the stream does.
        let _open = &guard;
        Ok(to_sse_event(&event))
    });

    Sse::new(opening.chain(live)).keep_alive(KeepAlive::default())
}

fn to_sse_event(event: &SessionEvent) -> Event {
    match event {
        SessionEvent::Message(envelope) => match serde_json::to_string(envelope) {
            Ok(json) => Event::default().event("message").data(json),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize envelope");
                Event::default()
                    .event("error")
                    .data(r#"{"message":"serialization failure"}"#)
            }
        },
        SessionEvent::Error { message } => Event::default()
            .event("error")
            .data(serde_json::json!({ "message": message }).to_string()),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessagesParams {
    session_id: SessionId,
}

async fn messages_handler(
    State(state): State<AppState>,
    Query(params): Query<MessagesParams>,
    Json(request): Json<CallToolRequest>,
) -> impl IntoResponse {
    let Some(session) = state.sessions.lookup(params.session_id) else {
        tracing::warn!(session_id = %params.session_id, "invocation for unknown session");
        return (StatusCode::BAD_REQUEST, "Unknown or expired sessionId").into_response();
    };

    // Each invocation runs on its own task, so rapid invocations on one
    // session may interleave at await points; the server does not serialize
    // per-session handling.
    tokio::spawn(async move { session.dispatch(request).await });
    StatusCode::ACCEPTED.into_response()
}
