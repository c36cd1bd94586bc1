//! Common test utilities.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;

use wagate::client::{ClientError, WhatsappClient};
use wagate::server::{AppState, build_app};
use wagate::session::{SessionStatus, SessionWatch};
use wagate_protocol::ChatMessage;

/// A collaborator call observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch { chat_id: String, limit: usize },
    Send { chat_id: String, body: String },
}

/// Scripted WhatsApp client: returns canned history or a canned error,
/// and records every call it receives.
#[derive(Default)]
pub struct MockClient {
    pub history: Vec<ChatMessage>,
    pub fail_with: Option<String>,
    pub calls: Mutex<Vec<Call>>,
}

impl MockClient {
    pub fn with_history(history: Vec<ChatMessage>) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn bridge_error(&self) -> Option<ClientError> {
        self.fail_with.as_ref().map(|message| ClientError::Bridge {
            status: 404,
            message: message.clone(),
        })
    }
}

#[async_trait]
impl WhatsappClient for MockClient {
    async fn fetch_messages(
        &self,
        chat_id: &str,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        self.calls.lock().unwrap().push(Call::Fetch {
            chat_id: chat_id.to_string(),
            limit,
        });
        if let Some(err) = self.bridge_error() {
            return Err(err);
        }
        Ok(self.history.clone())
    }

    async fn send_message(&self, chat_id: &str, body: &str) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(Call::Send {
            chat_id: chat_id.to_string(),
            body: body.to_string(),
        });
        if let Some(err) = self.bridge_error() {
            return Err(err);
        }
        Ok(())
    }
}

/// Build a test app around the given mock, with the session in `status`.
pub fn test_app(status: SessionStatus, client: Arc<MockClient>) -> Router {
    let session = SessionWatch::new();
    session.set(status);
    let state = AppState { session, client };
    build_app(state, 30)
}

/// A chat history entry with the given body and timestamp.
pub fn entry(body: &str, timestamp: i64) -> ChatMessage {
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
