//! Server-sent event stream
//!
//! One long-lived `GET /api/events` connection per client replaces
//! per-resource polling: cart updates, catalog changes and availability
//! flips all arrive as named SSE events carrying the [`SyncEvent`] JSON.
//!
//! Lagging consumers skip missed events rather than blocking writers; the
//! payloads are advisory and clients refetch on reconnect.

use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use axum::{Router, extract::State, routing::get};
use futures::Stream;
use tokio::sync::broadcast::error::RecvError;

use crate::core::{ServerState, SyncEvent};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/events", get(stream))
}

async fn stream(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.sync_tx.subscribe();

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => match to_sse(&event) {
                    Some(sse) => return Some((Ok(sse), rx)),
                    None => continue,
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "SSE consumer lagged, skipping events");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn to_sse(event: &SyncEvent) -> Option<Event> {
    Event::default()
        .event(event.resource.clone())
        .json_data(event)
        .ok()
}
