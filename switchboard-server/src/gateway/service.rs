use crate::gateway::GatewaySink;
use crate::relay::RelayCommand;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use switchboard_core::{ConnectionId, RelayError, ServerMessage};
use tokio::sync::mpsc;
use tracing::{error, warn};

struct GatewayInner {
    connections: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// Tracks every open WebSocket and exposes the three delivery primitives
/// the relay needs. Cheap to clone; shared with the axum handlers as state.
#[derive(Clone)]
pub struct GatewayService {
    inner: Arc<GatewayInner>,
    pub(crate) relay_tx: mpsc::Sender<RelayCommand>,
}

impl GatewayService {
    pub fn new(relay_tx: mpsc::Sender<RelayCommand>) -> Self {
        Self {
            inner: Arc::new(GatewayInner {
                connections: DashMap::new(),
            }),
            relay_tx,
        }
    }

    pub fn add_connection(&self, id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.connections.insert(id, tx);
    }

    pub fn remove_connection(&self, id: &ConnectionId) {
        self.inner.connections.remove(id);
    }

    fn deliver(&self, id: &ConnectionId, text: &str) -> Result<(), RelayError> {
        let Some(tx) = self.inner.connections.get(id) else {
            return Err(RelayError::UnknownRecipient(id.clone()));
        };

        if let Err(e) = tx.send(Message::Text(text.into())) {
            error!("Failed to queue message for {}: {}", id, e);
        }
        Ok(())
    }

    fn encode(message: &ServerMessage) -> Option<String> {
        match serde_json::to_string(message) {
            Ok(json) => Some(json),
            Err(e) => {
                error!("Failed to serialize server message: {}", e);
                None
            }
        }
    }

    /// Collect recipient ids up front so no map guard is held while sending.
    fn targets(&self, except: Option<&ConnectionId>) -> Vec<ConnectionId> {
        self.inner
            .connections
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|id| Some(id) != except)
            .collect()
    }
}

#[async_trait]
impl GatewaySink for GatewayService {
    async fn send_to(&self, recipient: ConnectionId, message: ServerMessage) {
        let Some(json) = Self::encode(&message) else {
            return;
        };
        if let Err(e) = self.deliver(&recipient, &json) {
            warn!("Dropping directed message: {}", e);
        }
    }

    async fn broadcast(&self, message: ServerMessage) {
        let Some(json) = Self::encode(&message) else {
            return;
        };
        for id in self.targets(None) {
            // A connection can close mid-broadcast; delivery is best-effort.
            let _ = self.deliver(&id, &json);
        }
    }

    async fn broadcast_except(&self, sender: ConnectionId, message: ServerMessage) {
        let Some(json) = Self::encode(&message) else {
            return;
        };
        for id in self.targets(Some(&sender)) {
            let _ = self.deliver(&id, &json);
        }
    }
}
