//! Client-side ticket filtering.
//!
//! Pure functions from (collection, criteria) to a filtered collection.
//! Filtering is stable — it never reorders — and all criteria are ANDed.

use serde::{Deserialize, Serialize};

use crate::types::{Ticket, TicketPriority, TicketStatus};

/// Select-control value for the "no assignee" sentinel.
pub const UNASSIGNED_VALUE: &str = "unassigned";

/// Assignee constraint. Identity values are compared as strings because the
/// criterion typically arrives from a select control while `assigned_to` is
/// numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssigneeCriterion {
    /// Matches tickets with no assignee set.
    Unassigned,
    /// Matches tickets assigned to exactly this identity.
    Assignee(String),
}

impl AssigneeCriterion {
    pub fn user(id: impl ToString) -> Self {
        AssigneeCriterion::Assignee(id.to_string())
    }

    /// Map a raw select value into a criterion: empty string means no
    /// constraint, the sentinel means unassigned, anything else is an
    /// identity.
    pub fn from_select_value(value: &str) -> Option<Self> {
        match value {
            "" => None,
            UNASSIGNED_VALUE => Some(AssigneeCriterion::Unassigned),
            id => Some(AssigneeCriterion::Assignee(id.to_string())),
        }
    }

    fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            AssigneeCriterion::Unassigned => ticket.assigned_to.is_none(),
            AssigneeCriterion::Assignee(id) => {
                ticket.assigned_to.is_some_and(|a| a.to_string() == *id)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub assignee: Option<AssigneeCriterion>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.assignee.is_none()
    }

    pub fn clear(&mut self) {
        *self = FilterCriteria::default();
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        let status_match = self.status.is_none_or(|s| ticket.status == s);
        let priority_match = self.priority.is_none_or(|p| ticket.priority == p);
        let assignee_match = self
            .assignee
            .as_ref()
            .is_none_or(|a| a.matches(ticket));
        status_match && priority_match && assignee_match
    }
}

/// Filter a collection, preserving the original relative order.
pub fn apply(tickets: &[Ticket], criteria: &FilterCriteria) -> Vec<Ticket> {
    tickets
        .iter()
        .filter(|t| criteria.matches(t))
        .cloned()
        .collect()
}
