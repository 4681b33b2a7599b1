//! Calendar events (`calendario_renata`).

use crate::model::collection::Record;
use serde::{Deserialize, Serialize};

/// An event pinned to one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    /// `DD/MM/YYYY`, produced by `calendar::format_date`; the join key
    /// against grid cells.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free text ("14:00"); may be empty.
    #[serde(default)]
    pub time: String,
}

impl Record for CalendarEvent {
    type Id = str;

    fn record_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    /// `Some(..)` edits title/description/time of an existing event.
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub time: String,
}
