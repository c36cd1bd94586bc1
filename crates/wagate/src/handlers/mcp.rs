//! Messaging endpoint handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use wagate_protocol::{ChatMessage, jid};

use crate::response;
use crate::server::AppState;

/// Default number of messages returned when no usable limit is given.
const DEFAULT_LIMIT: usize = 10;

/// Upper bound on the number of messages returned per request.
const MAX_LIMIT: i64 = 50;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentMessagesQuery {
    to: Option<String>,
    chat_id: Option<String>,
    /// Kept as a raw string so non-numeric input degrades to the default
    /// instead of failing query deserialization.
    limit: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentMessagesResponse {
    ok: bool,
    chat_id: String,
    count: usize,
    messages: Vec<MessageRecord>,
}

/// One conversation message, projected for API consumers.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    from: String,
    to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    body: String,
    timestamp: i64,
    from_me: bool,
}

#[derive(Deserialize)]
pub struct SendMessageBody {
    to: Option<String>,
    text: Option<String>,
    message: Option<String>,
}

#[derive(Serialize)]
pub struct SendMessageResponse {
    ok: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /mcp/get_recent_messages
pub async fn get_recent_messages(
    State(state): State<AppState>,
    Query(query): Query<RecentMessagesQuery>,
) -> Response {
    if !state.session.is_ready() {
        return response::not_ready().into_response();
    }

    let Some(chat_id) = resolve_target(query.chat_id.as_deref(), query.to.as_deref()) else {
        return response::bad_request("Provide to or chatId").into_response();
    };

    let limit = resolve_limit(query.limit.as_deref());

    // Over-fetch so that filtered-out system/media entries don't leave the
    // page short. The floor of 10 is fixed policy.
    let raw = match state.client.fetch_messages(&chat_id, limit.max(10)).await {
        Ok(messages) => messages,
        Err(e) => return response::upstream_failure(e.to_string()).into_response(),
    };

    let messages = project_records(raw, limit);

    let body = RecentMessagesResponse {
        ok: true,
        count: messages.len(),
        chat_id,
        messages,
    };

    (StatusCode::OK, Json(body)).into_response()
}

/// POST /mcp/send_message
pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<SendMessageBody>,
) -> Response {
    // Field validation comes before the readiness check.
    let to = body.to.as_deref().filter(|s| !s.is_empty());
    let text = body
        .text
        .as_deref()
        .or(body.message.as_deref())
        .filter(|s| !s.is_empty());

    let (Some(to), Some(text)) = (to, text) else {
        return response::bad_request("Missing required fields: to, text").into_response();
    };

    if !state.session.is_ready() {
        return response::not_ready().into_response();
    }

    let chat_id = jid::normalize(to);

    match state.client.send_message(&chat_id, text).await {
        Ok(()) => (StatusCode::OK, Json(SendMessageResponse { ok: true })).into_response(),
        Err(e) => response::upstream_failure(e.to_string()).into_response(),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolve the target chat address: an explicit chatId wins, otherwise the
/// raw recipient is normalized. Blank values count as absent.
fn resolve_target(chat_id: Option<&str>, to: Option<&str>) -> Option<String> {
    if let Some(id) = chat_id
        && !id.trim().is_empty()
    {
        return Some(id.to_string());
    }

    match to {
        Some(t) if !t.trim().is_empty() => Some(jid::normalize(t)),
        _ => None,
    }
}

/// Total clamp for the requested message count: absent, non-numeric, and
/// non-positive values all fall back to the default; the upper bound is 50.
fn resolve_limit(raw: Option<&str>) -> usize {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(n) if n >= 1 => n.min(MAX_LIMIT) as usize,
        _ => DEFAULT_LIMIT,
    }
}

/// Keep text entries, then take the most recent `limit` of them in
/// chronological order. Filtering happens before truncation.
fn project_records(history: Vec<ChatMessage>, limit: usize) -> Vec<MessageRecord> {
    let filtered: Vec<ChatMessage> = history
        .into_iter()
        .filter(|m| !m.body.trim().is_empty())
        .collect();

    let start = filtered.len().saturating_sub(limit);
    filtered
        .into_iter()
        .skip(start)
        .map(|m| MessageRecord {
            id: m.id,
            from: m.from,
            to: m.to,
            author: m.author,
            body: m.body,
            timestamp: m.timestamp,
            from_me: m.from_me,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(body: &str, timestamp: i64) -> ChatMessage {
        ChatMessage {
            id: Some(format!("msg_{timestamp}")),
            from: "15551234567@c.us".to_string(),
            to: "15557654321@c.us".to_string(),
            author: None,
            body: body.to_string(),
            timestamp,
            from_me: false,
        }
    }

    #[test]
    fn test_resolve_limit_defaults() {
        assert_eq!(resolve_limit(None), 10);
        assert_eq!(resolve_limit(Some("")), 10);
        assert_eq!(resolve_limit(Some("abc")), 10);
    }

    #[test]
    fn test_resolve_limit_clamps_upper_bound() {
        assert_eq!(resolve_limit(Some("1000")), 50);
        assert_eq!(resolve_limit(Some("50")), 50);
        assert_eq!(resolve_limit(Some("3")), 3);
    }

    #[test]
    fn test_resolve_limit_non_positive_uses_default() {
        assert_eq!(resolve_limit(Some("0")), 10);
        assert_eq!(resolve_limit(Some("-5")), 10);
    }

    #[test]
    fn test_resolve_target_prefers_chat_id() {
        assert_eq!(
            resolve_target(Some("123@g.us"), Some("555")),
            Some("123@g.us".to_string())
        );
    }

    #[test]
    fn test_resolve_target_normalizes_to() {
        assert_eq!(
            resolve_target(None, Some("(555) 123-4567")),
            Some("5551234567@c.us".to_string())
        );
        // Blank chatId falls through to `to`.
        assert_eq!(
            resolve_target(Some(""), Some("555")),
            Some("555@c.us".to_string())
        );
    }

    #[test]
    fn test_resolve_target_none() {
        assert_eq!(resolve_target(None, None), None);
        assert_eq!(resolve_target(Some("  "), Some("")), None);
    }

    #[test]
    fn test_project_filters_before_truncating() {
        let history = vec![
            entry("A", 1),
            entry("", 2),
            entry("C", 3),
            entry("D", 4),
        ];

        let records = project_records(history, 2);
        let bodies: Vec<&str> = records.iter().map(|r| r.body.as_str()).collect();
        assert_eq!(bodies, vec!["C", "D"]);
    }

    #[test]
    fn test_project_discards_whitespace_bodies() {
        let history = vec![entry("  ", 1), entry("hi", 2)];
        let records = project_records(history, 10);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].body, "hi");
    }

    #[test]
    fn test_project_short_history() {
        let history = vec![entry("only", 1)];
        let records = project_records(history, 5);
        assert_eq!(records.len(), 1);
    }
}
