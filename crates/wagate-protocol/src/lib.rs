//! Bridge protocol types for communication between Wagate and the WhatsApp
//! web bridge.
//!
//! The bridge is a sidecar process that owns the actual WhatsApp web
//! session. It pushes lifecycle events to Wagate as JSON Lines
//! (newline-delimited JSON) and answers chat-history and send requests over
//! its local HTTP API. This crate defines both sides of that contract.
//!
//! # Example: parsing an event line
//!
//! ```
//! use wagate_protocol::SessionEvent;
//!
//! let line = r#"{"type":"disconnected","reason":"NAVIGATION"}"#;
//! let event: SessionEvent = serde_json::from_str(line).unwrap();
//! assert!(matches!(event, SessionEvent::Disconnected { .. }));
//! ```

pub mod jid;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Events (Bridge → Wagate)
// ============================================================================

/// Lifecycle events pushed by the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A QR code must be scanned to authenticate the session.
    ///
    /// Rendering the code is the bridge's job; Wagate only observes this
    /// for operational visibility.
    QrChallenge { data: String },

    /// The WhatsApp session is connected and usable.
    Ready,

    /// Authentication with WhatsApp failed. The operator must
    /// re-authenticate out of band; no automatic recovery exists.
    AuthFailure { message: String },

    /// The WhatsApp session dropped (any reason).
    Disconnected { reason: String },

    /// An incoming message arrived. Observed and logged only; it does not
    /// feed back into request handling.
    MessageReceived(Box<IncomingMessage>),
}

/// Data for an incoming message event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Chat the message belongs to (full JID).
    pub chat_id: String,
    /// Sender JID.
    pub from: String,
    /// Message body text, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Timestamp when the message was sent (from the platform).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

// ============================================================================
// Chat History (HTTP API payloads)
// ============================================================================

/// One raw entry from a chat's message history, as the bridge reports it.
///
/// System and media-only entries arrive with an empty `body`; callers
/// filter on that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Serialized platform message ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Sender JID.
    pub from: String,
    /// Recipient JID.
    pub to: String,
    /// Author JID, set for group-chat messages only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Body text. Empty for system/media-only entries.
    #[serde(default)]
    pub body: String,
    /// Unix timestamp in seconds, passed through verbatim.
    pub timestamp: i64,
    /// Whether the account itself sent this message.
    #[serde(default)]
    pub from_me: bool,
}

/// Response body of `GET /chats/{chat_id}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchMessagesResponse {
    pub messages: Vec<ChatMessage>,
}

/// Request body of `POST /messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub chat_id: String,
    pub body: String,
}
