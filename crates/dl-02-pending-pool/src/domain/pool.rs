//! # Pending Pool
//!
//! Ordered, not-yet-sealed payloads. Admission order is sealing order.
//! No deduplication: admission rules decide what may enter.

use shared_types::Payload;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingPool {
    entries: Vec<Payload>,
}

impl PendingPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, payload: Payload) {
        self.entries.push(payload);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Payloads in admission order.
    pub fn entries(&self) -> &[Payload] {
        &self.entries
    }

    /// Payloads from most to least recently admitted.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &Payload> {
        self.entries.iter().rev()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
