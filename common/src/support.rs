use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::UserId;
use crate::user::User;

/// Topics a student picks when opening a ticket.
pub const SUPPORT_CATEGORIES: &[&str] = &[
    "Order problem",
    "Payment problem",
    "Defective product",
    "Suggestion",
    "Question",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Resolved,
}

/// A support ticket and, once answered, the staff response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportMessage {
    pub id: String,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_class: Option<String>,
    pub message: String,
    pub status: TicketStatus,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub responded_at: Option<DateTime<Utc>>,
}

impl SupportMessage {
    /// Open a ticket for `user`; the text is prefixed with its category.
    pub fn open(
        user: &User,
        category: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if category.trim().is_empty() {
            return Err(ValidationError::CategoryRequired);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::MessageRequired);
        }
        Ok(SupportMessage {
            id: now.timestamp_millis().to_string(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_email: user.email.clone(),
            user_class: user.class_name.clone(),
            message: format!("[{category}] {text}"),
            status: TicketStatus::Open,
            created_at: now,
            response: None,
            responded_at: None,
        })
    }
}

/// Inbox filter on the admin side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TicketFilter {
    #[default]
    All,
    Open,
    Resolved,
}

impl TicketFilter {
    pub fn matches(self, msg: &SupportMessage) -> bool {
        match self {
            TicketFilter::All => true,
            TicketFilter::Open => msg.status == TicketStatus::Open,
            TicketFilter::Resolved => msg.status == TicketStatus::Resolved,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
}

/// All tickets, stored client-side and shared by students and staff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupportThread {
    messages: Vec<SupportMessage>,
}

impl SupportThread {
    pub fn new(messages: Vec<SupportMessage>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[SupportMessage] {
        &self.messages
    }

    pub fn send(&mut self, message: SupportMessage) {
        self.messages.push(message);
    }

    /// Answer a ticket. Returns false if no ticket has that id.
    pub fn resolve(
        &mut self,
        id: &str,
        response: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ValidationError> {
        let response = response.trim();
        if response.is_empty() {
            return Err(ValidationError::ResponseRequired);
        }
        let Some(msg) = self.messages.iter_mut().find(|m| m.id == id) else {
            return Ok(false);
        };
        msg.status = TicketStatus::Resolved;
        msg.response = Some(response.to_string());
        msg.responded_at = Some(now);
        Ok(true)
    }

    /// Tickets opened by one student, oldest first.
    pub fn for_user(&self, user_id: &UserId) -> Vec<&SupportMessage> {
        self.messages.iter().filter(|m| &m.user_id == user_id).collect()
    }

    /// Inbox listing, newest first.
    pub fn inbox(&self, filter: TicketFilter) -> Vec<&SupportMessage> {
        let mut out: Vec<_> = self.messages.iter().filter(|m| filter.matches(m)).collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    pub fn stats(&self) -> TicketStats {
        let open = self
            .messages
            .iter()
            .filter(|m| m.status == TicketStatus::Open)
            .count();
        TicketStats {
            total: self.messages.len(),
            open,
            resolved: self.messages.len() - open,
        }
    }
}
