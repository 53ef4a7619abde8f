//! Tab identifiers and records
//!
//! Tab and content ids are derived from the title alone, so two titles that
//! sanitize to the same string name the same tab.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Namespace marker in front of every tab element id
pub const TAB_ID_PREFIX: &str = "tab-";
/// Namespace marker in front of every content panel id
pub const CONTENT_ID_PREFIX: &str = "tab-content-";

/// Strip everything outside `[A-Za-z0-9]` and lowercase the rest.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub fn tab_id_for(title: &str) -> String {
    format!("{}{}", TAB_ID_PREFIX, sanitize_title(title))
}

pub fn content_id_for(title: &str) -> String {
    format!("{}{}", CONTENT_ID_PREFIX, sanitize_title(title))
}

/// Everything the store keeps for one tab besides its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabRecord {
    /// Id of the companion content panel
    pub content_id: String,
    /// Title as supplied by the host
    pub title: String,
    /// Whether the tab element carries a close button
    pub closable: bool,
    /// Whether the tab element can be dragged
    pub draggable: bool,
    /// When the tab was opened
    pub opened_at: DateTime<Utc>,
}

impl TabRecord {
    pub fn new(content_id: String, title: String, closable: bool, draggable: bool) -> Self {
        Self {
            content_id,
            title,
            closable,
            draggable,
            opened_at: Utc::now(),
        }
    }
}

/// Read-only view of a tab handed out to hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: String,
    pub content_id: String,
    pub title: String,
    pub position: usize,
    pub is_active: bool,
    pub closable: bool,
    pub draggable: bool,
    pub opened_at: DateTime<Utc>,
}

/// Parameters for opening a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTab {
    pub title: String,
    #[serde(default = "default_show_close_button")]
    pub show_close_button: bool,
    /// `None` inherits the manager's drag-and-drop default
    #[serde(default)]
    pub allow_drag_and_drop: Option<bool>,
}

fn default_show_close_button() -> bool {
    true
}

impl NewTab {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            show_close_button: true,
            allow_drag_and_drop: None,
        }
    }

    pub fn without_close_button(mut self) -> Self {
        self.show_close_button = false;
        self
    }

    pub fn draggable(mut self, allow: bool) -> Self {
        self.allow_drag_and_drop = Some(allow);
        self
    }

    pub fn tab_id(&self) -> String {
        tab_id_for(&self.title)
    }
}
