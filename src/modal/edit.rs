//! Edit-ticket dialog controller.

use std::sync::Arc;

use crate::error::{FrontdeskError, Result};
use crate::notify::Notice;
use crate::transport::TicketApi;
use crate::types::{CurrentUser, Ticket, TicketId, TicketPriority, TicketStatus, TicketUpdate, UserId};

use super::{DialogState, ModalPhase, SubmitOutcome, SubmitToken, TicketCallback};

/// The edit form as presented to the user, prefilled from the ticket.
///
/// `status` and `assigned_to` exist only on the admin form; for everyone
/// else they stay `None` and are omitted from the submitted payload.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
    pub status: Option<TicketStatus>,
    /// Admin-only; `Some(None)` clears the assignment.
    pub assigned_to: Option<Option<UserId>>,
}

impl EditForm {
    fn prefill(ticket: &Ticket, is_admin: bool) -> Self {
        Self {
            id: ticket.id,
            title: ticket.title.clone(),
            description: ticket.description.clone().unwrap_or_default(),
            priority: ticket.priority,
            status: is_admin.then_some(ticket.status),
            assigned_to: is_admin.then_some(ticket.assigned_to),
        }
    }
}

pub struct EditTicketModal {
    api: Arc<dyn TicketApi>,
    user: CurrentUser,
    state: DialogState,
    /// Cached collection for ticket lookup, kept in sync by the page.
    tickets: Vec<Ticket>,
    current: Option<EditForm>,
    on_updated: Option<TicketCallback>,
}

impl EditTicketModal {
    pub fn new(api: Arc<dyn TicketApi>, user: CurrentUser) -> Self {
        Self {
            api,
            user,
            state: DialogState::default(),
            tickets: Vec::new(),
            current: None,
            on_updated: None,
        }
    }

    /// Register the callback invoked with the server's ticket after a
    /// successful update.
    pub fn on_updated(&mut self, callback: impl Fn(&Ticket) + Send + Sync + 'static) {
        self.on_updated = Some(Box::new(callback));
    }

    /// Replace the cached collection used to look tickets up at open time.
    pub fn set_tickets(&mut self, tickets: Vec<Ticket>) {
        self.tickets = tickets;
    }

    pub fn phase(&self) -> ModalPhase {
        self.state.phase()
    }

    pub fn is_open(&self) -> bool {
        self.state.phase() != ModalPhase::Closed
    }

    /// The prefilled form while the dialog is open.
    pub fn current(&self) -> Option<&EditForm> {
        self.current.as_ref()
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.state.drain()
    }

    /// Open the dialog prefilled from the ticket with this id, looked up in
    /// `tickets` when given, else in the cached collection.
    ///
    /// Authorization precondition: the acting user must be an admin, the
    /// ticket's creator, or its assignee. A refused open queues the denial
    /// notice and leaves the dialog state untouched.
    pub fn open(&mut self, id: TicketId, tickets: Option<&[Ticket]>) -> Result<EditForm> {
        let collection = tickets.unwrap_or(&self.tickets);
        let Some(ticket) = collection.iter().find(|t| t.id == id) else {
            self.state.push(Notice::error("Ticket not found"));
            return Err(FrontdeskError::TicketNotFound(id));
        };

        if !self.user.can_edit(ticket) {
            let message = "You can only edit tickets you created or that are assigned to you.";
            self.state.push(Notice::error(message));
            return Err(FrontdeskError::Authorization(message.to_string()));
        }

        let form = EditForm::prefill(ticket, self.user.is_admin);
        self.state.open();
        self.current = Some(form.clone());
        Ok(form)
    }

    pub fn close(&mut self) {
        self.state.close();
        self.current = None;
    }

    pub fn begin_submit(&mut self) -> Option<SubmitToken> {
        self.state.begin_submit()
    }

    /// Apply the transport result of a submission started with
    /// `begin_submit`. Stale responses (dialog closed or reopened since) are
    /// ignored.
    pub fn finish_submit(&mut self, token: SubmitToken, result: Result<Ticket>) -> SubmitOutcome {
        if !self.state.response_applies(token) {
            return SubmitOutcome::Skipped;
        }
        match result {
            Ok(ticket) => {
                self.state.push(Notice::success("Ticket updated successfully!"));
                if let Some(callback) = &self.on_updated {
                    callback(&ticket);
                }
                self.state.close();
                self.current = None;
                SubmitOutcome::Done(ticket)
            }
            Err(err) => {
                self.state.fail_submit();
                self.state
                    .push(Notice::error(format!("Failed to update ticket: {err}")));
                SubmitOutcome::Failed
            }
        }
    }

    /// Submit the (possibly user-edited) form. Role-gated fields are
    /// included in the payload only when the acting user's form carries
    /// them.
    pub async fn submit(&mut self, form: &EditForm) -> SubmitOutcome {
        let Some(token) = self.begin_submit() else {
            return SubmitOutcome::Skipped;
        };
        let update = TicketUpdate {
            title: form.title.clone(),
            description: form.description.clone(),
            priority: form.priority,
            status: if self.user.is_admin { form.status } else { None },
            assigned_to: if self.user.is_admin {
                form.assigned_to
            } else {
                None
            },
        };
        let result = self.api.update_ticket(form.id, &update).await;
        self.finish_submit(token, result)
    }
}
