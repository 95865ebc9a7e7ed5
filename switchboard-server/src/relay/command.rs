use serde_json::Value;
use switchboard_core::ConnectionId;

/// Events flowing from the session gateway into the relay loop.
#[derive(Debug)]
pub enum RelayCommand {
    /// A new gateway connection was accepted (still unnamed).
    Connect { connection_id: ConnectionId },

    /// The client announced its display name.
    SetName {
        connection_id: ConnectionId,
        name: String,
    },

    /// Global chat text.
    Chat {
        connection_id: ConnectionId,
        text: String,
    },

    /// Typing indicator.
    Typing {
        connection_id: ConnectionId,
        user: String,
    },

    /// Opaque signaling envelope to forward.
    Signal {
        connection_id: ConnectionId,
        envelope: Value,
    },

    /// The gateway connection closed.
    Disconnect { connection_id: ConnectionId },
}
