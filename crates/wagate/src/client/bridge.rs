//! HTTP client for the WhatsApp web bridge sidecar.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use wagate_protocol::{ChatMessage, FetchMessagesResponse, SendMessageRequest, SessionEvent};

use super::WhatsappClient;
use super::error::ClientError;

/// Client for the bridge's local HTTP API.
pub struct BridgeClient {
    client: Client,
    base_url: String,
}

impl BridgeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn error_from(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        ClientError::Bridge { status, message }
    }
}

#[async_trait]
impl WhatsappClient for BridgeClient {
    async fn fetch_messages(
        &self,
        chat_id: &str,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        let url = format!("{}/chats/{}/messages", self.base_url, chat_id);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let body: FetchMessagesResponse = response.json().await?;
        Ok(body.messages)
    }

    async fn send_message(&self, chat_id: &str, body: &str) -> Result<(), ClientError> {
        let url = format!("{}/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&SendMessageRequest {
                chat_id: chat_id.to_string(),
                body: body.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Ok(())
    }
}

// ============================================================================
// Event Stream
// ============================================================================

/// Tail the bridge's `/events` endpoint and forward lifecycle events.
///
/// The endpoint serves newline-delimited JSON. If the connection drops,
/// this re-attaches after `reconnect_delay` — that keeps the pipe to the
/// *bridge* alive; reconnecting the WhatsApp session itself is the
/// bridge's business. Returns when `tx` has no receivers left.
pub async fn stream_events(
    base_url: String,
    reconnect_delay: Duration,
    tx: mpsc::Sender<SessionEvent>,
) {
    let client = Client::new();
    let url = format!("{base_url}/events");

    loop {
        if tx.is_closed() {
            return;
        }

        debug!(url = %url, "Attaching to bridge event stream");
        match client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                if !forward_lines(response, &tx).await {
                    return;
                }
                warn!("Bridge event stream ended");
            }
            Ok(response) => {
                warn!(status = %response.status(), "Bridge event stream rejected");
            }
            Err(e) => {
                warn!(error = %e, "Failed to reach bridge event stream");
            }
        }

        tokio::time::sleep(reconnect_delay).await;
    }
}

/// Split the response body into lines and forward each parsed event.
///
/// Returns false when the receiving side is gone and the loop should stop.
async fn forward_lines(response: reqwest::Response, tx: &mpsc::Sender<SessionEvent>) -> bool {
    let mut stream = response.bytes_stream();
    let mut buffer: Vec<u8> = Vec::new();

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Bridge event stream read error");
                return true;
            }
        };
        buffer.extend_from_slice(&chunk);

        while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<SessionEvent>(line) {
                Ok(event) => {
                    if tx.send(event).await.is_err() {
                        return false;
                    }
                }
                Err(e) => {
                    warn!(error = %e, line = %line, "Unparseable bridge event");
                }
            }
        }
    }

    true
}
