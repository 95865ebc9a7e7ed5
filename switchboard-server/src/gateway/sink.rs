use async_trait::async_trait;
use switchboard_core::{ConnectionId, ServerMessage};

/// The delivery surface the relay requires from the transport: these three
/// primitives are the entire sink contract. Implemented by the WebSocket
/// gateway in production and by a capturing mock in tests.
#[async_trait]
pub trait GatewaySink: Send + Sync {
    /// Deliver to a single connection.
    async fn send_to(&self, recipient: ConnectionId, message: ServerMessage);

    /// Deliver to every connected client.
    async fn broadcast(&self, message: ServerMessage);

    /// Deliver to every connected client except `sender`.
    async fn broadcast_except(&self, sender: ConnectionId, message: ServerMessage);
}
