//! WhatsApp client seam.
//!
//! Request handlers talk to the WhatsApp session through the
//! [`WhatsappClient`] trait; the production implementation is
//! [`BridgeClient`], which calls the bridge sidecar's local HTTP API.

mod bridge;
mod error;

pub use bridge::{BridgeClient, stream_events};
pub use error::ClientError;

use async_trait::async_trait;

use wagate_protocol::ChatMessage;

/// Operations the gateway needs from the WhatsApp session.
#[async_trait]
pub trait WhatsappClient: Send + Sync {
    /// Fetch up to `limit` raw history entries for a chat, oldest first.
    async fn fetch_messages(
        &self,
        chat_id: &str,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, ClientError>;

    /// Send a text message to a chat.
    async fn send_message(&self, chat_id: &str, body: &str) -> Result<(), ClientError>;
}
