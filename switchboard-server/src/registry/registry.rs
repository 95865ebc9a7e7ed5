use std::collections::HashMap;
use switchboard_core::{ConnectionId, RelayError};

/// One announced participant. Owned exclusively by the registry; other
/// components only ever hold `ConnectionId`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub join_order: u64,
}

/// The set of announced participants, keyed by connection id. The active
/// count is always derived from the map, never kept as a separate counter.
#[derive(Debug, Default)]
pub struct Registry {
    participants: HashMap<ConnectionId, Participant>,
    next_join_order: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly announced participant, returning its join order.
    pub fn add(&mut self, id: ConnectionId, name: String) -> Result<u64, RelayError> {
        if self.participants.contains_key(&id) {
            return Err(RelayError::DuplicateConnection(id));
        }

        let join_order = self.next_join_order;
        self.next_join_order += 1;
        self.participants.insert(id, Participant { name, join_order });

        Ok(join_order)
    }

    /// Remove a participant if present. Removing an absent id is not an error.
    pub fn remove(&mut self, id: &ConnectionId) -> bool {
        self.participants.remove(id).is_some()
    }

    pub fn count(&self) -> usize {
        self.participants.len()
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Participant> {
        self.participants.get(id)
    }

    /// Connection ids ordered by join order.
    pub fn snapshot(&self) -> Vec<ConnectionId> {
        let mut entries: Vec<_> = self.participants.iter().collect();
        entries.sort_by_key(|(_, participant)| participant.join_order);
        entries.into_iter().map(|(id, _)| id.clone()).collect()
    }
}
