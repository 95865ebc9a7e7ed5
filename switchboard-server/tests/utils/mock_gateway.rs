use async_trait::async_trait;
use std::sync::Arc;
use switchboard_core::{ConnectionId, ServerMessage};
use switchboard_server::GatewaySink;
use tokio::sync::Mutex;

/// How a captured delivery was addressed.
#[derive(Debug, Clone, PartialEq)]
pub enum Recipient {
    One(ConnectionId),
    All,
    AllExcept(ConnectionId),
}

/// One outgoing message captured by the mock, with its addressing mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub recipient: Recipient,
    pub message: ServerMessage,
}

/// Mock GatewaySink that captures all outgoing deliveries for verification.
#[derive(Clone, Default)]
pub struct MockGatewaySink {
    deliveries: Arc<Mutex<Vec<Delivery>>>,
}

impl MockGatewaySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything captured so far, in emission order.
    pub async fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().await.clone()
    }

    pub async fn delivery_count(&self) -> usize {
        self.deliveries.lock().await.len()
    }

    /// Messages a specific connection would have received, whether directed
    /// at it or broadcast.
    pub async fn visible_to(&self, id: &ConnectionId) -> Vec<ServerMessage> {
        self.deliveries
            .lock()
            .await
            .iter()
            .filter(|delivery| match &delivery.recipient {
                Recipient::One(target) => target == id,
                Recipient::All => true,
                Recipient::AllExcept(except) => except != id,
            })
            .map(|delivery| delivery.message.clone())
            .collect()
    }

    /// Messages sent to `id` alone (directed delivery only).
    pub async fn directed_to(&self, id: &ConnectionId) -> Vec<ServerMessage> {
        self.deliveries
            .lock()
            .await
            .iter()
            .filter(|delivery| delivery.recipient == Recipient::One(id.clone()))
            .map(|delivery| delivery.message.clone())
            .collect()
    }

    /// Every broadcast presence count, in emission order.
    pub async fn active_user_counts(&self) -> Vec<usize> {
        self.deliveries
            .lock()
            .await
            .iter()
            .filter_map(|delivery| match delivery.message {
                ServerMessage::ActiveUsers { count } => Some(count),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, recipient: Recipient, message: ServerMessage) {
        tracing::debug!("[MockGateway] {:?} -> {:?}", recipient, message);
        self.deliveries.lock().await.push(Delivery { recipient, message });
    }
}

#[async_trait]
impl GatewaySink for MockGatewaySink {
    async fn send_to(&self, recipient: ConnectionId, message: ServerMessage) {
        self.record(Recipient::One(recipient), message).await;
    }

    async fn broadcast(&self, message: ServerMessage) {
        self.record(Recipient::All, message).await;
    }

    async fn broadcast_except(&self, sender: ConnectionId, message: ServerMessage) {
        self.record(Recipient::AllExcept(sender), message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_gateway_tracks_addressing() {
        let sink = MockGatewaySink::new();
        let a = ConnectionId::new();
        let b = ConnectionId::new();

        sink.send_to(a.clone(), ServerMessage::NameAck { name: "a".into() })
            .await;
        sink.broadcast(ServerMessage::ActiveUsers { count: 2 }).await;
        sink.broadcast_except(a.clone(), ServerMessage::Typing { user: "a".into() })
            .await;

        assert_eq!(sink.delivery_count().await, 3);
        assert_eq!(sink.visible_to(&a).await.len(), 2);
        assert_eq!(sink.visible_to(&b).await.len(), 2);
        assert_eq!(sink.directed_to(&a).await.len(), 1);
        assert_eq!(sink.active_user_counts().await, vec![2]);
    }
}
