//! HTTP and WebSocket handlers.

mod http;
mod websocket;

pub use http::{get_lobby, health_check};
pub use websocket::websocket_handler;
