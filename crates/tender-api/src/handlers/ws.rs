//! WebSocket upgrade handler.

use axum::extract::ws::{CloseFrame, Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::http::HeaderMap;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use tender_auth::Session;
use tender_core::error::AppError;

use crate::dto::request::WsQuery;
use crate::error::ApiError;
use crate::extractors::session_token;
use crate::state::AppState;

/// GET /ws?token={session token}
///
/// Browsers that cannot set headers on the upgrade fall back to the
/// session cookie.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .or_else(|| session_token(&headers))
        .ok_or_else(|| AppError::authentication("Please sign in to continue."))?;
    let session = state.sessions.authenticate(&token)?;

    Ok(ws.on_upgrade(move |socket| handle_socket(state, session, socket)))
}

async fn handle_socket(state: AppState, session: Session, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (handle, mut outbound_rx) = state
        .realtime
        .connections
        .register(session.id, session.email.clone());
    let conn_id = handle.id;
    let mut shutdown = state.realtime.shutdown_receiver();

    info!(conn_id = %conn_id, email = %session.email, "WebSocket connection established");

    loop {
        tokio::select! {
            outbound = outbound_rx.recv() => {
                let Some(message) = outbound else { break };
                let terminal = message.is_terminal();
                let payload = match serde_json::to_string(&message) {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!(conn_id = %conn_id, error = %e, "Failed to serialize outbound message");
                        continue;
                    }
                };
                if ws_tx.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
                if terminal {
                    let _ = ws_tx
                        .send(Message::Close(Some(CloseFrame {
                            code: 4001,
                            reason: "session ended".into(),
                        })))
                        .await;
                    break;
                }
            }
            inbound = ws_rx.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        state.realtime.handle_inbound(conn_id, text.as_str()).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!(conn_id = %conn_id, error = %e, "WebSocket error");
                        break;
                    }
                }
            }
            _ = shutdown.recv() => {
                let _ = ws_tx.send(Message::Close(None)).await;
                break;
            }
        }
    }

    handle.mark_closed();
    state.realtime.connections.unregister(conn_id);
    info!(conn_id = %conn_id, "WebSocket connection closed");
}
