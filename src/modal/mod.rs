//! Modal dialog controllers.
//!
//! One controller per dialog (create / edit / assign), each a small state
//! machine: `Closed → Open → Submitting → {Closed on success, Open with an
//! error notice on failure}`. Controllers talk to the transport and report
//! results through explicitly registered callbacks; they never touch the
//! store or the DOM themselves.
//!
//! Submission is token-gated: `begin_submit` hands out a token only while
//! the dialog is open with nothing in flight (single-flight), and
//! `finish_submit` ignores responses whose token no longer matches the
//! dialog epoch — a dialog closed while its request was in flight simply
//! drops the response.

pub mod assign;
pub mod create;
pub mod edit;

pub use assign::AssignTicketModal;
pub use create::{CreateModalOptions, CreateTicketModal};
pub use edit::{EditForm, EditTicketModal};

use crate::notify::Notice;
use crate::types::Ticket;

/// Dialog lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Open,
    Submitting,
}

/// Token for one submission attempt. Carries the dialog epoch it was issued
/// under; `finish_submit` refuses tokens from a dialog that has since closed
/// or reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitToken {
    epoch: u64,
}

/// What became of a submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The server accepted; carries the ticket it returned.
    Done(Ticket),
    /// The server rejected the submission or was unreachable. The dialog
    /// stays open with the error queued as a notice.
    Failed,
    /// Nothing happened: the dialog was not open, another submission was in
    /// flight, or the dialog went away while this one was in flight.
    Skipped,
}

/// Callback invoked with the server's ticket on a successful submission.
pub type TicketCallback = Box<dyn Fn(&Ticket) + Send + Sync>;

/// State every dialog controller shares: phase, epoch, queued notices.
#[derive(Debug, Default)]
pub(crate) struct DialogState {
    phase: ModalPhase,
    epoch: u64,
    notices: Vec<Notice>,
}

impl DialogState {
    pub(crate) fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn open(&mut self) {
        self.epoch += 1;
        self.phase = ModalPhase::Open;
    }

    pub(crate) fn close(&mut self) {
        self.epoch += 1;
        self.phase = ModalPhase::Closed;
    }

    /// Whether the dialog opened at `epoch` is still the one on screen.
    pub(crate) fn still_open(&self, epoch: u64) -> bool {
        self.epoch == epoch && self.phase != ModalPhase::Closed
    }

    pub(crate) fn begin_submit(&mut self) -> Option<SubmitToken> {
        if self.phase != ModalPhase::Open {
            return None;
        }
        self.phase = ModalPhase::Submitting;
        Some(SubmitToken { epoch: self.epoch })
    }

    /// Whether a response for this token may still be applied.
    pub(crate) fn response_applies(&self, token: SubmitToken) -> bool {
        self.phase == ModalPhase::Submitting && token.epoch == self.epoch
    }

    /// Re-enable the form after a failed submission.
    pub(crate) fn fail_submit(&mut self) {
        self.phase = ModalPhase::Open;
    }

    pub(crate) fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub(crate) fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
