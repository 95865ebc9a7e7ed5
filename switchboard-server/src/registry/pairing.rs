use std::collections::VecDeque;
use switchboard_core::{ConnectionId, Room};

/// Groups announced participants into two-party rooms in arrival order.
///
/// A pending queue holds announced-but-unpaired connections; the moment it
/// holds two entries both are popped and form a room. Disconnects clear
/// pending entries and dissolve rooms; the surviving member is left
/// unpaired and is not re-queued.
#[derive(Debug, Default)]
pub struct PairingPolicy {
    pending: VecDeque<ConnectionId>,
    rooms: Vec<Room>,
}

impl PairingPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new announcement. Returns the room formed, if this
    /// announcement completed a pair.
    pub fn on_announce(&mut self, id: ConnectionId) -> Option<Room> {
        if self.is_paired(&id) || self.pending.contains(&id) {
            return None;
        }

        self.pending.push_back(id);
        if self.pending.len() < 2 {
            return None;
        }

        let first = self.pending.pop_front()?;
        let second = self.pending.pop_front()?;
        let room = Room::new(first, second);
        self.rooms.push(room.clone());

        Some(room)
    }

    /// Drop a connection from pairing state. Returns the orphaned peer if a
    /// formed room had to be dissolved.
    pub fn on_disconnect(&mut self, id: &ConnectionId) -> Option<ConnectionId> {
        self.pending.retain(|pending| pending != id);

        let position = self.rooms.iter().position(|room| room.contains(id))?;
        let room = self.rooms.swap_remove(position);
        room.peer_of(id).cloned()
    }

    /// The room member paired with `id`, if any.
    pub fn peer_of(&self, id: &ConnectionId) -> Option<&ConnectionId> {
        self.rooms.iter().find_map(|room| room.peer_of(id))
    }

    pub fn is_paired(&self, id: &ConnectionId) -> bool {
        self.rooms.iter().any(|room| room.contains(id))
    }

    pub fn is_pending(&self, id: &ConnectionId) -> bool {
        self.pending.contains(id)
    }
}
