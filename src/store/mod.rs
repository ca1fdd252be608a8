//! In-memory ticket store.
//!
//! The store is the authoritative ticket collection for the current page:
//! recreated at page load, replaced wholesale by reloads, patched in place by
//! modal callbacks. It performs no I/O itself — reloads are driven from the
//! page controller through a begin/complete token pair so that a stale
//! response can never overwrite newer state (see `begin_reload`).

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::types::{Ticket, TicketId};

/// Handle shared between the page controller and modal callbacks.
///
/// All mutation happens on the page's single event loop; the mutex is
/// interior mutability, not contention control, and is never held across an
/// await point.
pub type SharedStore = Arc<Mutex<TicketStore>>;

/// Token identifying one in-flight reload. Obtained from `begin_reload`,
/// spent by `complete_reload`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadToken(u64);

#[derive(Debug, Default)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    /// Last issued sequence number (reloads and local writes share it).
    seq: u64,
    /// Sequence number of the newest applied write.
    applied: u64,
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// The live collection, newest-first for tickets added via `upsert`.
    pub fn all(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn get(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Start a reload. The returned token must be handed back to
    /// `complete_reload` together with the fetched collection; tokens issued
    /// before a newer completed reload or any local write are rejected there.
    pub fn begin_reload(&mut self) -> ReloadToken {
        ReloadToken(self.next_seq())
    }

    /// Replace the whole collection, unless the token went stale while the
    /// fetch was in flight. Returns whether the reload was applied.
    pub fn complete_reload(&mut self, token: ReloadToken, tickets: Vec<Ticket>) -> bool {
        if token.0 <= self.applied {
            tracing::debug!(
                token = token.0,
                applied = self.applied,
                "discarding stale reload response"
            );
            return false;
        }
        self.tickets = dedupe_by_id(tickets);
        self.applied = token.0;
        true
    }

    /// Replace the entry with the same id in place, or prepend a new one
    /// (new tickets surface first in the list).
    pub fn upsert(&mut self, ticket: Ticket) {
        match self.tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(slot) => *slot = ticket,
            None => self.tickets.insert(0, ticket),
        }
        self.applied = self.next_seq();
    }

    /// Delete the entry with that id. Absent ids are a no-op, not an error.
    pub fn remove(&mut self, id: TicketId) -> bool {
        let before = self.tickets.len();
        self.tickets.retain(|t| t.id != id);
        let removed = self.tickets.len() != before;
        if removed {
            self.applied = self.next_seq();
        }
        removed
    }
}

/// Keep the first occurrence of each id. The server should never send
/// duplicates, but the no-two-entries-per-id invariant holds regardless.
fn dedupe_by_id(tickets: Vec<Ticket>) -> Vec<Ticket> {
    let mut seen = HashSet::new();
    tickets
        .into_iter()
        .filter(|t| seen.insert(t.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TicketPriority, TicketStatus};

    fn ticket(id: TicketId, status: TicketStatus) -> Ticket {
        Ticket {
            id,
            title: format!("Ticket {id}"),
            description: None,
            status,
            priority: TicketPriority::Medium,
            created_at: "2025-06-01T10:30:00".to_string(),
            user_id: 1,
            assigned_to: None,
            assignee_name: None,
            user_name: None,
        }
    }

    fn loaded(store: &mut TicketStore, tickets: Vec<Ticket>) {
        let token = store.begin_reload();
        assert!(store.complete_reload(token, tickets));
    }

    #[test]
    fn test_reload_replaces_collection() {
        let mut store = TicketStore::new();
        loaded(&mut store, vec![ticket(1, TicketStatus::Open)]);
        loaded(
            &mut store,
            vec![ticket(2, TicketStatus::Closed), ticket(3, TicketStatus::Open)],
        );
        assert_eq!(store.len(), 2);
        assert!(store.get(1).is_none());
    }

    #[test]
    fn test_reload_dedupes_by_id_keeping_first() {
        let mut store = TicketStore::new();
        let mut dup = ticket(1, TicketStatus::Closed);
        dup.title = "duplicate".to_string();
        loaded(&mut store, vec![ticket(1, TicketStatus::Open), dup]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().status, TicketStatus::Open);
    }

    #[test]
    fn test_upsert_existing_replaces_in_place() {
        let mut store = TicketStore::new();
        loaded(
            &mut store,
            vec![ticket(1, TicketStatus::Open), ticket(2, TicketStatus::Closed)],
        );

        store.upsert(ticket(2, TicketStatus::Open));

        assert_eq!(store.len(), 2, "upsert on existing id keeps the length");
        assert_eq!(store.all()[1].id, 2, "replaced entry keeps its position");
        assert_eq!(store.all()[1].status, TicketStatus::Open);
    }

    #[test]
    fn test_upsert_new_prepends() {
        let mut store = TicketStore::new();
        loaded(&mut store, vec![ticket(1, TicketStatus::Open)]);

        store.upsert(ticket(7, TicketStatus::Open));

        assert_eq!(store.len(), 2);
        assert_eq!(store.all()[0].id, 7, "new tickets surface first");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = TicketStore::new();
        loaded(&mut store, vec![ticket(1, TicketStatus::Open)]);
        assert!(!store.remove(42));
        assert_eq!(store.len(), 1);
        assert!(store.remove(1));
        assert!(store.is_empty());
    }

    /// A reload that started before a newer reload completed must be dropped,
    /// even though its response arrives later.
    #[test]
    fn test_stale_reload_loses_to_newer_reload() {
        let mut store = TicketStore::new();
        let slow = store.begin_reload();
        let fast = store.begin_reload();

        assert!(store.complete_reload(fast, vec![ticket(2, TicketStatus::Open)]));
        assert!(!store.complete_reload(slow, vec![ticket(1, TicketStatus::Open)]));

        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].id, 2);
    }

    /// A reload that started before a local write (optimistic update) must
    /// not clobber that write when its response finally lands.
    #[test]
    fn test_stale_reload_loses_to_local_write() {
        let mut store = TicketStore::new();
        loaded(&mut store, vec![ticket(1, TicketStatus::Open)]);

        let inflight = store.begin_reload();
        store.upsert(ticket(1, TicketStatus::Closed));

        assert!(!store.complete_reload(inflight, vec![ticket(1, TicketStatus::Open)]));
        assert_eq!(store.get(1).unwrap().status, TicketStatus::Closed);
    }

    #[test]
    fn test_sequential_reloads_apply_normally() {
        let mut store = TicketStore::new();
        loaded(&mut store, vec![ticket(1, TicketStatus::Open)]);
        loaded(&mut store, vec![ticket(2, TicketStatus::Open)]);
        assert_eq!(store.all()[0].id, 2);
    }
}
