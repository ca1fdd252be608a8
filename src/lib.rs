pub mod config;
pub mod error;
pub mod filter;
pub mod modal;
pub mod notify;
pub mod page;
pub mod project;
pub mod store;
pub mod transport;
pub mod types;

pub use config::ClientConfig;
pub use error::{FrontdeskError, Result};
pub use filter::{AssigneeCriterion, FilterCriteria, UNASSIGNED_VALUE};
pub use modal::{
    AssignTicketModal, CreateModalOptions, CreateTicketModal, EditForm, EditTicketModal,
    ModalPhase, SubmitOutcome, SubmitToken,
};
pub use notify::{Notice, NoticeLevel};
pub use page::{PageController, TicketScope};
pub use project::{TicketRow, TicketStats, format_created_at, rows, stats};
pub use store::{ReloadToken, SharedStore, TicketStore};
pub use transport::{ApiClient, TicketApi};
pub use types::{
    AssignRequest, AssignableUser, CurrentUser, Ticket, TicketDraft, TicketId, TicketPriority,
    TicketStatus, TicketUpdate, UserId, VALID_PRIORITIES, VALID_STATUSES,
};
