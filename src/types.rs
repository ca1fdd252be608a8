use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FrontdeskError;

pub type TicketId = i64;
pub type UserId = i64;

/// Ticket workflow state. The server owns this enumeration; values we do not
/// recognize deserialize to `Unknown` rather than failing the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Closed,
    #[serde(other)]
    Unknown,
}

impl TicketStatus {
    /// Human-facing label, e.g. for a status badge.
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Closed => "Closed",
            TicketStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::Open => write!(f, "open"),
            TicketStatus::InProgress => write!(f, "in_progress"),
            TicketStatus::Closed => write!(f, "closed"),
            TicketStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = FrontdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err(FrontdeskError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_STATUSES: &[&str] = &["open", "in_progress", "closed"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TicketPriority {
    pub fn label(&self) -> &'static str {
        match self {
            TicketPriority::Low => "Low",
            TicketPriority::Medium => "Medium",
            TicketPriority::High => "High",
            TicketPriority::Urgent => "Urgent",
        }
    }

    /// High and urgent tickets share the same escalated treatment in views.
    pub fn is_urgent(&self) -> bool {
        matches!(self, TicketPriority::High | TicketPriority::Urgent)
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketPriority::Low => write!(f, "low"),
            TicketPriority::Medium => write!(f, "medium"),
            TicketPriority::High => write!(f, "high"),
            TicketPriority::Urgent => write!(f, "urgent"),
        }
    }
}

impl FromStr for TicketPriority {
    type Err = FrontdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TicketPriority::Low),
            "medium" => Ok(TicketPriority::Medium),
            "high" => Ok(TicketPriority::High),
            "urgent" => Ok(TicketPriority::Urgent),
            _ => Err(FrontdeskError::InvalidPriority(s.to_string())),
        }
    }
}

pub const VALID_PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];

/// A support ticket as the server serves it.
///
/// `assignee_name` and `user_name` are denormalized display names; the server
/// owns them and the client never edits them independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    /// Server-assigned creation timestamp (ISO 8601), immutable.
    #[serde(default)]
    pub created_at: String,
    pub user_id: UserId,
    #[serde(default)]
    pub assigned_to: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// The signed-in user, read once from the page's context payload and treated
/// as immutable for the page's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl CurrentUser {
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        name.trim().to_string()
    }

    /// Whether this user may edit the given ticket: admins always, otherwise
    /// only the ticket's creator or its assignee.
    pub fn can_edit(&self, ticket: &Ticket) -> bool {
        self.is_admin || ticket.user_id == self.id || ticket.assigned_to == Some(self.id)
    }
}

/// An admin user that tickets can be assigned to, as returned by the
/// admin-users endpoint. Older deployments send `first_name`/`last_name`
/// instead of `full_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignableUser {
    pub id: UserId,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: String,
}

impl AssignableUser {
    /// Display name with fallbacks: full name, then first+last, then username.
    pub fn display_name(&self) -> String {
        if let Some(full) = &self.full_name
            && !full.trim().is_empty()
        {
            return full.clone();
        }
        let joined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let joined = joined.trim();
        if !joined.is_empty() {
            return joined.to_string();
        }
        self.username.clone()
    }
}

/// Body of `POST /api/tickets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    /// Admin-only; omitted entirely for non-admin submissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,
}

impl Default for TicketDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: TicketPriority::default(),
            status: TicketStatus::default(),
            assigned_to: None,
        }
    }
}

/// Body of `PUT /api/tickets/{id}`.
///
/// `status` and `assigned_to` are role-gated: they are serialized only when
/// the acting user's form carries them (admins). A present-but-empty assignee
/// serializes as an explicit `null` so the server clears the assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketUpdate {
    pub title: String,
    pub description: String,
    pub priority: TicketPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Option<UserId>>,
}

/// Body of `PUT /api/tickets/admin/assign/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignRequest {
    pub assigned_to: Option<UserId>,
}
