use crate::model::connection::ConnectionId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages a client sends over its gateway channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Announce a display name. The connection is unnamed until this arrives.
    SetName { name: String },
    /// Global chat text.
    Chat { text: String },
    /// Typing indicator, labelled however the client reports itself.
    Typing { user: String },
    /// Connection-negotiation envelope, forwarded opaque.
    Signal { envelope: Value },
}

/// Messages the relay emits to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Echo confirmation of a successful name announcement.
    NameAck { name: String },
    /// Current announced-participant count, broadcast on every change.
    ActiveUsers { count: usize },
    Chat { text: String, sender: ConnectionId },
    Typing { user: String },
    Signal { envelope: Value },
}
