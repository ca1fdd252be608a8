//! Page-level controller.
//!
//! Owns what used to be ambient module-level globals on each page: the
//! ticket store, the active filter criteria, and the wiring between modal
//! callbacks and the store. One instance per page load.

use std::sync::Arc;

use crate::error::Result;
use crate::filter::{self, FilterCriteria};
use crate::modal::{AssignTicketModal, CreateModalOptions, CreateTicketModal, EditTicketModal};
use crate::project::{self, TicketRow, TicketStats};
use crate::store::{SharedStore, TicketStore};
use crate::transport::TicketApi;
use crate::types::{CurrentUser, Ticket, TicketId};

/// Which listing endpoint feeds this page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketScope {
    /// The current user's visible tickets (`GET /api/tickets`).
    Mine,
    /// Every ticket, admin dashboards only (`GET /api/tickets/admin/all`).
    All,
}

pub struct PageController {
    api: Arc<dyn TicketApi>,
    store: SharedStore,
    user: CurrentUser,
    scope: TicketScope,
    criteria: FilterCriteria,
}

impl PageController {
    /// Controller with the scope implied by the user's role.
    pub fn new(api: Arc<dyn TicketApi>, user: CurrentUser) -> Self {
        let scope = if user.is_admin {
            TicketScope::All
        } else {
            TicketScope::Mine
        };
        Self::with_scope(api, user, scope)
    }

    pub fn with_scope(api: Arc<dyn TicketApi>, user: CurrentUser, scope: TicketScope) -> Self {
        Self {
            api,
            store: TicketStore::new().into_shared(),
            user,
            scope,
            criteria: FilterCriteria::default(),
        }
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn scope(&self) -> TicketScope {
        self.scope
    }

    /// Handle to the page's store, shared with modal callbacks.
    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.store)
    }

    /// Full reload through the transport, sequenced against concurrent
    /// reloads and local writes.
    ///
    /// Transport errors propagate without touching the collection (the view
    /// keeps the last-known-good data). `Ok(false)` means a newer reload or
    /// a local write won the race and this response was discarded.
    pub async fn reload(&self) -> Result<bool> {
        let token = self.store.lock().begin_reload();
        let tickets = match self.scope {
            TicketScope::Mine => self.api.list_tickets().await?,
            TicketScope::All => self.api.list_all_tickets().await?,
        };
        Ok(self.store.lock().complete_reload(token, tickets))
    }

    /// Delete on the server, then drop the entry locally. The caller is
    /// responsible for any "are you sure" confirmation.
    pub async fn delete_ticket(&self, id: TicketId) -> Result<()> {
        self.api.delete_ticket(id).await?;
        self.store.lock().remove(id);
        Ok(())
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
    }

    /// Snapshot of the full collection, e.g. for seeding an edit dialog.
    pub fn all_tickets(&self) -> Vec<Ticket> {
        self.store.lock().all().to_vec()
    }

    /// The filtered view backing the table.
    pub fn visible(&self) -> Vec<Ticket> {
        filter::apply(self.store.lock().all(), &self.criteria)
    }

    /// Stat tiles are computed over the full collection even while the table
    /// shows a filtered view; the divergence is deliberate UX.
    pub fn stats(&self) -> TicketStats {
        project::stats(self.store.lock().all())
    }

    pub fn rows(&self) -> Vec<TicketRow> {
        project::rows(&self.visible(), &self.user)
    }

    /// Create dialog wired to prepend new tickets into this page's store.
    pub fn create_modal(&self, options: CreateModalOptions) -> CreateTicketModal {
        let mut modal = CreateTicketModal::new(Arc::clone(&self.api), self.user.clone(), options);
        let store = self.store();
        modal.on_created(move |ticket| store.lock().upsert(ticket.clone()));
        modal
    }

    /// Edit dialog wired to patch updated tickets into this page's store,
    /// seeded with the current collection for lookup.
    pub fn edit_modal(&self) -> EditTicketModal {
        let mut modal = EditTicketModal::new(Arc::clone(&self.api), self.user.clone());
        modal.set_tickets(self.all_tickets());
        let store = self.store();
        modal.on_updated(move |ticket| store.lock().upsert(ticket.clone()));
        modal
    }

    /// Assign dialog wired to patch reassigned tickets into this page's
    /// store.
    pub fn assign_modal(&self) -> AssignTicketModal {
        let mut modal = AssignTicketModal::new(Arc::clone(&self.api));
        let store = self.store();
        modal.on_assigned(move |ticket| store.lock().upsert(ticket.clone()));
        modal
    }
}
