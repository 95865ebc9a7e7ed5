use crate::config::SignalScope;
use crate::gateway::GatewaySink;
use crate::registry::PairingPolicy;
use serde_json::Value;
use std::sync::Arc;
use switchboard_core::{ConnectionId, ServerMessage, SignalEnvelope};
use tracing::{debug, warn};

/// Resolves recipients for chat, typing and signaling traffic and hands the
/// messages to the gateway. All routing is fire-and-forget; delivery to a
/// departed recipient is dropped without telling the sender.
pub struct SignalRouter {
    gateway: Arc<dyn GatewaySink>,
    scope: SignalScope,
}

impl SignalRouter {
    pub fn new(gateway: Arc<dyn GatewaySink>, scope: SignalScope) -> Self {
        Self { gateway, scope }
    }

    /// Chat is global: everyone receives it, the sender included.
    pub async fn route_chat(&self, sender: ConnectionId, text: String) {
        self.gateway
            .broadcast(ServerMessage::Chat { text, sender })
            .await;
    }

    pub async fn route_typing(&self, user: String) {
        self.gateway.broadcast(ServerMessage::Typing { user }).await;
    }

    /// Forward an envelope unchanged. Only the `kind` tag is inspected, and
    /// only for logging; envelopes without a recognized kind are dropped.
    pub async fn route_signal(
        &self,
        sender: ConnectionId,
        envelope: Value,
        pairing: &PairingPolicy,
    ) {
        let kind = match SignalEnvelope::kind_of(&envelope) {
            Ok(kind) => kind,
            Err(e) => {
                warn!("Dropping signal from {}: {}", sender, e);
                return;
            }
        };

        match self.scope {
            SignalScope::Broadcast => {
                debug!("Relaying {} from {} to all other peers", kind, sender);
                self.gateway
                    .broadcast_except(sender, ServerMessage::Signal { envelope })
                    .await;
            }
            SignalScope::RoomScoped => match pairing.peer_of(&sender) {
                Some(peer) => {
                    debug!("Relaying {} from {} to {}", kind, sender, peer);
                    self.gateway
                        .send_to(peer.clone(), ServerMessage::Signal { envelope })
                        .await;
                }
                None => debug!("Dropping {} from unpaired sender {}", kind, sender),
            },
        }
    }
}
