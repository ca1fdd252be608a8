//! Display projections: aggregate counts and row view-models.
//!
//! Everything here is a pure function of the ticket collection and the
//! current user; the output is consumed by an external view renderer.

use jiff::Timestamp;
use jiff::civil::DateTime;
use serde::Serialize;

use crate::types::{CurrentUser, Ticket, TicketStatus};

const DESCRIPTION_PREVIEW_CHARS: usize = 50;
const CREATED_AT_FORMAT: &str = "%b %d, %Y %H:%M";

/// Aggregate counts for the stat tiles.
///
/// Tickets whose status falls outside the three tracked buckets count toward
/// `total` only, so `open + in_progress + closed` may be less than `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
    pub unassigned: usize,
}

/// Single-pass classification of the collection.
pub fn stats(tickets: &[Ticket]) -> TicketStats {
    let mut stats = TicketStats::default();
    for ticket in tickets {
        stats.total += 1;
        match ticket.status {
            TicketStatus::Open => stats.open += 1,
            TicketStatus::InProgress => stats.in_progress += 1,
            TicketStatus::Closed => stats.closed += 1,
            TicketStatus::Unknown => {}
        }
        if ticket.assigned_to.is_none() {
            stats.unassigned += 1;
        }
    }
    stats
}

/// Display-ready row derived from one ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketRow {
    pub ticket: Ticket,
    /// Mirrors the edit dialog's authorization precondition.
    pub can_edit: bool,
    pub created_by_me: bool,
    pub assigned_to_me: bool,
    pub status_label: &'static str,
    /// High and urgent priorities collapse into one escalated badge; the
    /// underlying `ticket.priority` is untouched.
    pub priority_label: &'static str,
    pub assignee_label: String,
    pub created_label: String,
    pub description_preview: Option<String>,
}

/// Project filtered tickets into row view-models for the given viewer.
pub fn rows(tickets: &[Ticket], user: &CurrentUser) -> Vec<TicketRow> {
    tickets.iter().map(|t| row(t, user)).collect()
}

fn row(ticket: &Ticket, user: &CurrentUser) -> TicketRow {
    TicketRow {
        can_edit: user.can_edit(ticket),
        created_by_me: ticket.user_id == user.id,
        assigned_to_me: ticket.assigned_to == Some(user.id),
        status_label: ticket.status.label(),
        priority_label: if ticket.priority.is_urgent() {
            "URGENT"
        } else {
            ticket.priority.label()
        },
        assignee_label: ticket
            .assignee_name
            .clone()
            .unwrap_or_else(|| "Unassigned".to_string()),
        created_label: format_created_at(&ticket.created_at),
        description_preview: ticket.description.as_deref().map(preview),
        ticket: ticket.clone(),
    }
}

/// Format a server timestamp for display. The server sends ISO 8601, with or
/// without a UTC offset; anything unparseable falls back to the raw string.
pub fn format_created_at(raw: &str) -> String {
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return ts.strftime(CREATED_AT_FORMAT).to_string();
    }
    if let Ok(dt) = raw.parse::<DateTime>() {
        return dt.strftime(CREATED_AT_FORMAT).to_string();
    }
    raw.to_string()
}

fn preview(description: &str) -> String {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(DESCRIPTION_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
