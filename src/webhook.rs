//! Webhook transport.
//!
//! One route does everything: Telegram POSTs updates to `/`, GET probes get
//! a static liveness string, anything else is rejected with 405. A POST is
//! always answered 200: a non-2xx response would make the platform retry
//! the same update indefinitely, so even undecodable payloads and handler
//! failures are swallowed here after logging.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::bot::Dispatcher;
use crate::event::{InboundEvent, WebhookUpdate};

/// Body served to GET probes.
pub const LIVENESS: &str = "Bot Telegram Anda berjalan. Kirim pesan /start di Telegram.";

/// Shared state for the webhook server.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness).post(receive_update))
        .fallback(method_not_allowed)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "webhook server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// POST handler: receive one update, dispatch it, acknowledge regardless.
pub async fn receive_update(State(state): State<AppState>, body: String) -> StatusCode {
    debug!(bytes = body.len(), "webhook update received");

    let update = match WebhookUpdate::from_json(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, "undecodable webhook payload dropped");
            return StatusCode::OK;
        }
    };

    let Some(event) = InboundEvent::from_update(update) else {
        debug!("update carries nothing to dispatch");
        return StatusCode::OK;
    };

    if let Err(e) = state.dispatcher.handle_event(event).await {
        error!(error = %e, "event handling failed");
    }

    StatusCode::OK
}

/// GET handler: liveness probe.
pub async fn liveness() -> &'static str {
    LIVENESS
}

pub async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}
