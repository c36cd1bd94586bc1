//! Wagate - a small HTTP gateway that exposes a WhatsApp messaging account
//! as a request/response API.

pub mod build_info;
pub mod client;
pub mod config;
pub mod handlers;
pub mod response;
pub mod server;
pub mod session;
