//! Error response helpers.
//!
//! Every failed request returns the same body shape: `{ok: false, error}`.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

/// Error text for requests made while the session is unusable.
pub const NOT_READY: &str = "WhatsApp client not ready. Please scan QR or wait.";

pub fn bad_request(error: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    error_response(StatusCode::BAD_REQUEST, error)
}

pub fn not_ready() -> (StatusCode, Json<ErrorBody>) {
    error_response(StatusCode::SERVICE_UNAVAILABLE, NOT_READY)
}

pub fn upstream_failure(error: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, error)
}

fn error_response(
    status: StatusCode,
    error: impl Into<String>,
) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            ok: false,
            error: error.into(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes() {
        let (status, body) = bad_request("Provide to or chatId");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.ok);
        assert_eq!(body.error, "Provide to or chatId");

        let (status, body) = not_ready();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.error, NOT_READY);

        let (status, _) = upstream_failure("boom");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
