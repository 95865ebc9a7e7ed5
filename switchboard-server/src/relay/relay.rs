use crate::config::SignalScope;
use crate::gateway::GatewaySink;
use crate::registry::{PairingPolicy, Registry};
use crate::relay::{PresenceBroadcaster, RelayCommand, SignalRouter};
use std::collections::HashSet;
use std::sync::Arc;
use switchboard_core::{ConnectionId, ServerMessage};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The relay event loop. It owns every piece of shared state (registry,
/// pairing, live-connection set), so connect/announce/disconnect handling
/// is serialized by construction. Outbound delivery goes through channels
/// and never blocks the loop on socket I/O.
pub struct Relay {
    registry: Registry,
    pairing: PairingPolicy,
    connections: HashSet<ConnectionId>,
    router: SignalRouter,
    presence: PresenceBroadcaster,
    gateway: Arc<dyn GatewaySink>,
    command_rx: mpsc::Receiver<RelayCommand>,
}

impl Relay {
    pub fn new(
        command_rx: mpsc::Receiver<RelayCommand>,
        gateway: Arc<dyn GatewaySink>,
        scope: SignalScope,
    ) -> Self {
        Self {
            registry: Registry::new(),
            pairing: PairingPolicy::new(),
            connections: HashSet::new(),
            router: SignalRouter::new(gateway.clone(), scope),
            presence: PresenceBroadcaster::new(gateway.clone()),
            gateway,
            command_rx,
        }
    }

    pub async fn run(mut self) {
        info!("Relay event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Relay event loop finished");
    }

    async fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Connect { connection_id } => {
                if !self.connections.insert(connection_id.clone()) {
                    warn!("Gateway delivered a second connect for {}", connection_id);
                    return;
                }
                debug!("Connection {} accepted, awaiting announcement", connection_id);
            }

            RelayCommand::SetName {
                connection_id,
                name,
            } => {
                self.handle_announce(connection_id, name).await;
            }

            RelayCommand::Chat {
                connection_id,
                text,
            } => {
                if self.is_live(&connection_id) {
                    self.router.route_chat(connection_id, text).await;
                }
            }

            RelayCommand::Typing {
                connection_id,
                user,
            } => {
                if self.is_live(&connection_id) {
                    self.router.route_typing(user).await;
                }
            }

            RelayCommand::Signal {
                connection_id,
                envelope,
            } => {
                if self.is_live(&connection_id) {
                    self.router
                        .route_signal(connection_id, envelope, &self.pairing)
                        .await;
                }
            }

            RelayCommand::Disconnect { connection_id } => {
                self.handle_disconnect(connection_id).await;
            }
        }
    }

    async fn handle_announce(&mut self, connection_id: ConnectionId, name: String) {
        if !self.is_live(&connection_id) {
            return;
        }

        match self.registry.add(connection_id.clone(), name.clone()) {
            Ok(join_order) => {
                info!(
                    "Connection {} announced as '{}' (join order {})",
                    connection_id, name, join_order
                );

                self.gateway
                    .send_to(connection_id.clone(), ServerMessage::NameAck { name })
                    .await;

                if let Some(room) = self.pairing.on_announce(connection_id) {
                    info!("Formed room between {} and {}", room.first, room.second);
                }

                debug!("Registry order: {:?}", self.registry.snapshot());
                self.presence.announce(self.registry.count()).await;
            }
            Err(e) => {
                let existing = self.registry.get(&connection_id).map(|p| p.name.as_str());
                warn!("Rejected announcement: {} (keeping {:?})", e, existing);
            }
        }
    }

    async fn handle_disconnect(&mut self, connection_id: ConnectionId) {
        if !self.connections.remove(&connection_id) {
            debug!("Ignoring repeated disconnect for {}", connection_id);
            return;
        }

        let removed = self.registry.remove(&connection_id);

        if let Some(orphan) = self.pairing.on_disconnect(&connection_id) {
            info!(
                "Room dissolved by {} leaving, {} is unpaired",
                connection_id, orphan
            );
        }

        if removed {
            debug!(
                "Participant {} removed, {} announced remain",
                connection_id,
                self.registry.count()
            );
            self.presence.announce(self.registry.count()).await;
        }
    }

    fn is_live(&self, connection_id: &ConnectionId) -> bool {
        if self.connections.contains(connection_id) {
            return true;
        }
        debug!("Dropping event from departed connection {}", connection_id);
        false
    }
}
