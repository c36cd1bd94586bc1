//! HTTP request handlers.

mod health;
mod index;
mod mcp;
mod version;

pub use health::{livez, readyz};
pub use index::index;
pub use mcp::{get_recent_messages, send_message};
pub use version::version;
