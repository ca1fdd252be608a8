//! Assign-ticket dialog controller (admin only).

use std::sync::Arc;

use crate::error::Result;
use crate::notify::Notice;
use crate::transport::TicketApi;
use crate::types::{Ticket, TicketId, UserId};

use super::{DialogState, ModalPhase, SubmitOutcome, SubmitToken, TicketCallback};

pub struct AssignTicketModal {
    api: Arc<dyn TicketApi>,
    state: DialogState,
    ticket_id: Option<TicketId>,
    on_assigned: Option<TicketCallback>,
}

impl AssignTicketModal {
    pub fn new(api: Arc<dyn TicketApi>) -> Self {
        Self {
            api,
            state: DialogState::default(),
            ticket_id: None,
            on_assigned: None,
        }
    }

    /// Register the callback invoked with the server's ticket after a
    /// successful assignment.
    pub fn on_assigned(&mut self, callback: impl Fn(&Ticket) + Send + Sync + 'static) {
        self.on_assigned = Some(Box::new(callback));
    }

    pub fn phase(&self) -> ModalPhase {
        self.state.phase()
    }

    pub fn is_open(&self) -> bool {
        self.state.phase() != ModalPhase::Closed
    }

    /// The ticket this dialog is assigning, while open.
    pub fn ticket_id(&self) -> Option<TicketId> {
        self.ticket_id
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.state.drain()
    }

    /// Open blank except for the target ticket's identity.
    pub fn open(&mut self, ticket_id: TicketId) {
        self.state.open();
        self.ticket_id = Some(ticket_id);
    }

    pub fn close(&mut self) {
        self.state.close();
        self.ticket_id = None;
    }

    pub fn begin_submit(&mut self) -> Option<SubmitToken> {
        self.state.begin_submit()
    }

    pub fn finish_submit(&mut self, token: SubmitToken, result: Result<Ticket>) -> SubmitOutcome {
        if !self.state.response_applies(token) {
            return SubmitOutcome::Skipped;
        }
        match result {
            Ok(ticket) => {
                self.state.push(Notice::success("Ticket assigned successfully"));
                if let Some(callback) = &self.on_assigned {
                    callback(&ticket);
                }
                self.state.close();
                self.ticket_id = None;
                SubmitOutcome::Done(ticket)
            }
            Err(err) => {
                self.state.fail_submit();
                self.state
                    .push(Notice::error(format!("Failed to assign ticket: {err}")));
                SubmitOutcome::Failed
            }
        }
    }

    /// Submit just the assignment for the target ticket.
    pub async fn submit(&mut self, assigned_to: Option<UserId>) -> SubmitOutcome {
        let Some(ticket_id) = self.ticket_id else {
            return SubmitOutcome::Skipped;
        };
        let Some(token) = self.begin_submit() else {
            return SubmitOutcome::Skipped;
        };
        let result = self.api.assign_ticket(ticket_id, assigned_to).await;
        self.finish_submit(token, result)
    }
}
