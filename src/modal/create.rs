//! Create-ticket dialog controller.

use std::sync::Arc;

use crate::error::{FrontdeskError, Result};
use crate::notify::Notice;
use crate::transport::TicketApi;
use crate::types::{AssignableUser, CurrentUser, Ticket, TicketDraft};

use super::{DialogState, ModalPhase, SubmitOutcome, SubmitToken, TicketCallback};

/// Page-supplied options, recognized across all embedding pages.
#[derive(Debug, Clone)]
pub struct CreateModalOptions {
    /// Navigate away after a successful create (see `take_redirect`).
    pub redirect_after_create: bool,
    pub redirect_url: String,
}

impl Default for CreateModalOptions {
    fn default() -> Self {
        Self {
            redirect_after_create: false,
            redirect_url: "/dashboard".to_string(),
        }
    }
}

pub struct CreateTicketModal {
    api: Arc<dyn TicketApi>,
    user: CurrentUser,
    options: CreateModalOptions,
    state: DialogState,
    assignees: Vec<AssignableUser>,
    on_created: Option<TicketCallback>,
    redirect: Option<String>,
}

impl CreateTicketModal {
    pub fn new(api: Arc<dyn TicketApi>, user: CurrentUser, options: CreateModalOptions) -> Self {
        Self {
            api,
            user,
            options,
            state: DialogState::default(),
            assignees: Vec::new(),
            on_created: None,
            redirect: None,
        }
    }

    /// Register the callback invoked with the server's ticket after a
    /// successful create.
    pub fn on_created(&mut self, callback: impl Fn(&Ticket) + Send + Sync + 'static) {
        self.on_created = Some(Box::new(callback));
    }

    pub fn phase(&self) -> ModalPhase {
        self.state.phase()
    }

    pub fn is_open(&self) -> bool {
        self.state.phase() != ModalPhase::Closed
    }

    /// Assignee choices loaded for admin users; empty means "unassigned only".
    pub fn assignees(&self) -> &[AssignableUser] {
        &self.assignees
    }

    /// Queued user-facing notifications, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.state.drain()
    }

    /// Consume the pending navigation request, if a successful create asked
    /// for one. Routing itself belongs to the embedding page.
    pub fn take_redirect(&mut self) -> Option<String> {
        self.redirect.take()
    }

    /// Open the dialog blank. Admin users additionally get the
    /// assignable-users list; that fetch failing is non-fatal — the dialog
    /// degrades to "unassigned only" with a warning that names the failure
    /// class.
    pub async fn open(&mut self) {
        self.state.open();
        self.assignees.clear();
        if !self.user.is_admin {
            return;
        }

        let epoch = self.state.epoch();
        match self.api.list_assignable_users().await {
            Ok(users) => {
                if self.state.still_open(epoch) {
                    self.assignees = users;
                }
            }
            Err(err) => {
                tracing::warn!("assignee list unavailable, degrading to unassigned: {err}");
                let message = match &err {
                    FrontdeskError::Network(_) => {
                        "Network issue loading assignee list. You can still create tickets unassigned."
                    }
                    e if e.is_forbidden() => {
                        "You lack permission to load assignees. Ticket will be unassigned."
                    }
                    e if e.is_unauthorized() => "Session expired. Please log in again to assign.",
                    _ => "Unable to load assignees. Creating unassigned tickets only.",
                };
                self.state.push(Notice::warning(message));
            }
        }
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    /// Start a submission. `None` when the dialog is not open or a
    /// submission is already in flight (single-flight per open dialog).
    pub fn begin_submit(&mut self) -> Option<SubmitToken> {
        self.state.begin_submit()
    }

    /// Apply the transport result of a submission started with
    /// `begin_submit`. Responses from a dialog that has since closed or
    /// reopened are ignored.
    pub fn finish_submit(&mut self, token: SubmitToken, result: Result<Ticket>) -> SubmitOutcome {
        if !self.state.response_applies(token) {
            return SubmitOutcome::Skipped;
        }
        match result {
            Ok(ticket) => {
                self.state.push(Notice::success("Ticket created successfully!"));
                if let Some(callback) = &self.on_created {
                    callback(&ticket);
                }
                if self.options.redirect_after_create {
                    self.redirect = Some(self.options.redirect_url.clone());
                }
                self.state.close();
                SubmitOutcome::Done(ticket)
            }
            Err(err) => {
                self.state.fail_submit();
                self.state
                    .push(Notice::error(format!("Failed to create ticket: {err}")));
                SubmitOutcome::Failed
            }
        }
    }

    /// Validate-free submit: the server is authoritative, its validation
    /// errors surface verbatim via the error notice.
    pub async fn submit(&mut self, draft: &TicketDraft) -> SubmitOutcome {
        let Some(token) = self.begin_submit() else {
            return SubmitOutcome::Skipped;
        };
        // The assignee field only exists on the admin form.
        let draft = if self.user.is_admin {
            draft.clone()
        } else {
            TicketDraft {
                assigned_to: None,
                ..draft.clone()
            }
        };
        let result = self.api.create_ticket(&draft).await;
        self.finish_submit(token, result)
    }
}
