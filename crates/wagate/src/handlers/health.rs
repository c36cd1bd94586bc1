use axum::extract::State;
use axum::http::StatusCode;

use crate::server::AppState;

pub async fn livez() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Ready only when the WhatsApp session is usable.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.session.is_ready() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    }
}
