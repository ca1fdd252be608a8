//! Shared test helpers: mock data builders and a scripted `TicketApi`.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use frontdesk::{
    AssignableUser, CurrentUser, FrontdeskError, Result, Ticket, TicketApi, TicketDraft, TicketId,
    TicketPriority, TicketStatus, TicketUpdate, UserId,
};

// ============================================================================
// Mock data builders
// ============================================================================

pub fn mock_ticket(id: TicketId, status: TicketStatus) -> Ticket {
    Ticket {
        id,
        title: format!("Ticket {id}"),
        description: Some(format!("Description for ticket {id}")),
        status,
        priority: TicketPriority::Medium,
        created_at: "2025-06-01T10:30:00".to_string(),
        user_id: 1,
        assigned_to: None,
        assignee_name: None,
        user_name: Some("Pat Doe".to_string()),
    }
}

pub fn mock_user(id: UserId, is_admin: bool) -> CurrentUser {
    CurrentUser {
        id,
        is_admin,
        first_name: "Pat".to_string(),
        last_name: "Doe".to_string(),
    }
}

pub fn mock_assignable(id: UserId, name: &str) -> AssignableUser {
    AssignableUser {
        id,
        full_name: Some(name.to_string()),
        first_name: None,
        last_name: None,
        username: format!("user{id}"),
    }
}

pub fn http_error(status: u16, message: &str) -> FrontdeskError {
    FrontdeskError::Http {
        status,
        message: message.to_string(),
    }
}

pub fn network_error() -> FrontdeskError {
    FrontdeskError::Network("connection refused".to_string())
}

// ============================================================================
// Scripted TicketApi
// ============================================================================

/// Scripted stand-in for the HTTP client. Responses are queued per endpoint
/// and consumed in order; calls are recorded for assertions.
#[derive(Default)]
pub struct MockApi {
    pub list_responses: Mutex<VecDeque<Result<Vec<Ticket>>>>,
    pub users_responses: Mutex<VecDeque<Result<Vec<AssignableUser>>>>,
    pub create_responses: Mutex<VecDeque<Result<Ticket>>>,
    pub update_responses: Mutex<VecDeque<Result<Ticket>>>,
    pub assign_responses: Mutex<VecDeque<Result<Ticket>>>,
    pub delete_responses: Mutex<VecDeque<Result<()>>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_list(self: &Arc<Self>, response: Result<Vec<Ticket>>) -> Arc<Self> {
        self.list_responses.lock().push_back(response);
        Arc::clone(self)
    }

    pub fn push_users(self: &Arc<Self>, response: Result<Vec<AssignableUser>>) -> Arc<Self> {
        self.users_responses.lock().push_back(response);
        Arc::clone(self)
    }

    pub fn push_create(self: &Arc<Self>, response: Result<Ticket>) -> Arc<Self> {
        self.create_responses.lock().push_back(response);
        Arc::clone(self)
    }

    pub fn push_update(self: &Arc<Self>, response: Result<Ticket>) -> Arc<Self> {
        self.update_responses.lock().push_back(response);
        Arc::clone(self)
    }

    pub fn push_assign(self: &Arc<Self>, response: Result<Ticket>) -> Arc<Self> {
        self.assign_responses.lock().push_back(response);
        Arc::clone(self)
    }

    pub fn push_delete(self: &Arc<Self>, response: Result<()>) -> Arc<Self> {
        self.delete_responses.lock().push_back(response);
        Arc::clone(self)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    fn next<T>(&self, queue: &Mutex<VecDeque<Result<T>>>, endpoint: &str) -> Result<T> {
        queue
            .lock()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left for {endpoint}"))
    }
}

#[async_trait]
impl TicketApi for MockApi {
    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        self.record("list_tickets");
        self.next(&self.list_responses, "list_tickets")
    }

    async fn list_all_tickets(&self) -> Result<Vec<Ticket>> {
        self.record("list_all_tickets");
        self.next(&self.list_responses, "list_all_tickets")
    }

    async fn list_assignable_users(&self) -> Result<Vec<AssignableUser>> {
        self.record("list_assignable_users");
        self.next(&self.users_responses, "list_assignable_users")
    }

    async fn create_ticket(&self, draft: &TicketDraft) -> Result<Ticket> {
        self.record(format!(
            "create_ticket title={} assigned_to={:?}",
            draft.title, draft.assigned_to
        ));
        self.next(&self.create_responses, "create_ticket")
    }

    async fn update_ticket(&self, id: TicketId, update: &TicketUpdate) -> Result<Ticket> {
        self.record(format!(
            "update_ticket id={id} status={:?} assigned_to={:?}",
            update.status, update.assigned_to
        ));
        self.next(&self.update_responses, "update_ticket")
    }

    async fn assign_ticket(&self, id: TicketId, assigned_to: Option<UserId>) -> Result<Ticket> {
        self.record(format!("assign_ticket id={id} assigned_to={assigned_to:?}"));
        self.next(&self.assign_responses, "assign_ticket")
    }

    async fn delete_ticket(&self, id: TicketId) -> Result<()> {
        self.record(format!("delete_ticket id={id}"));
        self.next(&self.delete_responses, "delete_ticket")
    }
}
