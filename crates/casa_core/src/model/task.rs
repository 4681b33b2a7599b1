//! Household chores (`tarefas`).

use crate::model::collection::Record;
use crate::model::person::Person;
use serde::{Deserialize, Serialize};

/// Chore categories offered by the UI. Stored as plain text, not validated.
pub const TASK_CATEGORIES: [&str; 5] = ["Limpeza", "Compras", "Cozinha", "Reparos", "Outro"];

pub const DEFAULT_TASK_CATEGORY: &str = TASK_CATEGORIES[0];

/// One shared household chore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdTask {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Open-ended; normally one of `TASK_CATEGORIES`.
    #[serde(default)]
    pub category: String,
    /// Open-ended; normally a `Person::name()`.
    #[serde(default)]
    pub responsible: String,
    /// Free text as typed by the user; may be empty.
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
}

impl HouseholdTask {
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

impl Record for HouseholdTask {
    type Id = str;

    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Form input for a new chore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub category: String,
    pub responsible: String,
    pub due_date: String,
}

impl Default for NewTask {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: DEFAULT_TASK_CATEGORY.to_string(),
            responsible: Person::Amanda.name().to_string(),
            due_date: String::new(),
        }
    }
}
