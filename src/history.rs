//! Chat history sidebar.
//!
//! A fixed list of chat summaries with a case-insensitive title search and a
//! purely decorative "selected" marker. Selecting a chat never loads its
//! messages.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{AppError, Result};

/// One row of the history sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatSummary {
    pub id: String,
    pub title: String,
    pub last_modified: NaiveDate,
    pub message_count: usize,
}

impl ChatSummary {
    fn seeded(id: &str, title: &str, (y, m, d): (i32, u32, u32), message_count: usize) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            last_modified: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            message_count,
        }
    }
}

/// The chats every visitor sees.
#[must_use]
pub fn seed_chats() -> Vec<ChatSummary> {
    vec![
        ChatSummary::seeded("1", "Rajasthan Groundwater 2023", (2025, 9, 15), 12),
        ChatSummary::seeded("2", "Maharashtra Drought Analysis", (2025, 9, 10), 8),
        ChatSummary::seeded("3", "Karnataka Water Table Trends", (2025, 9, 5), 15),
    ]
}

/// Title shown when no seeded chat is selected.
pub const NEW_CHAT_TITLE: &str = "New Chat";

/// Sidebar state: seeded summaries, search text and selection.
#[derive(Debug, Clone)]
pub struct SessionList {
    chats: Vec<ChatSummary>,
    query: String,
    selected: Option<String>,
}

impl Default for SessionList {
    fn default() -> Self {
        Self::new(seed_chats())
    }
}

impl SessionList {
    /// Build a list over `chats`, selecting the first entry.
    #[must_use]
    pub fn new(chats: Vec<ChatSummary>) -> Self {
        let selected = chats.first().map(|c| c.id.clone());
        Self {
            chats,
            query: String::new(),
            selected,
        }
    }

    /// Chats whose title contains `substring`, ignoring case, in seed order.
    #[must_use]
    pub fn filter(&self, substring: &str) -> Vec<&ChatSummary> {
        let needle = substring.to_lowercase();
        self.chats
            .iter()
            .filter(|chat| chat.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Remember the search box contents.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Chats matching the remembered search text.
    #[must_use]
    pub fn visible(&self) -> Vec<&ChatSummary> {
        self.filter(&self.query)
    }

    /// Move the active marker to `id`.
    pub fn select(&mut self, id: &str) -> Result<()> {
        if !self.chats.iter().any(|c| c.id == id) {
            return Err(AppError::NotFound(format!("chat {id}")));
        }
        tracing::debug!(chat_id = %id, "Chat selected");
        self.selected = Some(id.to_string());
        Ok(())
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Header title for the chat area.
    #[must_use]
    pub fn selected_title(&self) -> &str {
        self.selected
            .as_deref()
            .and_then(|id| self.chats.iter().find(|c| c.id == id))
            .map_or(NEW_CHAT_TITLE, |c| c.title.as_str())
    }
}
