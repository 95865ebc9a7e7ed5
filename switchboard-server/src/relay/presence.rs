use crate::gateway::GatewaySink;
use std::sync::Arc;
use switchboard_core::ServerMessage;

/// Pushes the announced-participant count to every connected client after
/// each registry mutation that changes it. One broadcast per join/leave,
/// no batching.
pub struct PresenceBroadcaster {
    gateway: Arc<dyn GatewaySink>,
}

impl PresenceBroadcaster {
    pub fn new(gateway: Arc<dyn GatewaySink>) -> Self {
        Self { gateway }
    }

    pub async fn announce(&self, count: usize) {
        self.gateway
            .broadcast(ServerMessage::ActiveUsers { count })
            .await;
    }
}
