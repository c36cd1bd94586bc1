use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::timeout::TimeoutLayer;

use crate::client::WhatsappClient;
use crate::handlers;
use crate::session::SessionWatch;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionWatch,
    pub client: Arc<dyn WhatsappClient>,
}

pub fn build_app(state: AppState, request_timeout_seconds: u64) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/mcp/get_recent_messages", get(handlers::get_recent_messages))
        .route("/mcp/send_message", post(handlers::send_message))
        .route("/livez", get(handlers::livez))
        .route("/readyz", get(handlers::readyz))
        .route("/version", get(handlers::version))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(request_timeout_seconds),
        ))
}
