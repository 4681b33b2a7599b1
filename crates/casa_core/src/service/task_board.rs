//! Shared chores screen (`tarefas`).

use crate::model::collection::{position_of, remove_by_id, update_by_id};
use crate::model::id::IdClock;
use crate::model::task::{HouseholdTask, NewTask};
use crate::model::validation::{require_text, ValidationError};
use crate::slice::keys::SliceKey;
use crate::slice::persisted::{PersistedSlice, Persistence};

/// Completion filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

/// Combined list filter; `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring of the title.
    pub search: String,
    pub category: Option<String>,
    pub responsible: Option<String>,
    pub status: StatusFilter,
}

impl TaskFilter {
    pub fn matches(&self, task: &HouseholdTask) -> bool {
        let search = self.search.to_lowercase();
        let matches_search = task.title.to_lowercase().contains(&search);
        let matches_category = self
            .category
            .as_ref()
            .map_or(true, |category| &task.category == category);
        let matches_responsible = self
            .responsible
            .as_ref()
            .map_or(true, |person| &task.responsible == person);
        let matches_status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Pending => !task.completed,
            StatusFilter::Completed => task.completed,
        };
        matches_search && matches_category && matches_responsible && matches_status
    }
}

pub struct TaskBoard {
    slice: PersistedSlice<Vec<HouseholdTask>>,
}

impl TaskBoard {
    /// Opens and hydrates the `tarefas` slice.
    pub fn open(persistence: Persistence) -> Self {
        Self::new(PersistedSlice::open(SliceKey::Tasks.name(), persistence))
    }

    pub fn new(slice: PersistedSlice<Vec<HouseholdTask>>) -> Self {
        IdClock::global().observe_ids(slice.get().iter().map(|task| task.id.as_str()));
        Self { slice }
    }

    pub fn slice(&self) -> &PersistedSlice<Vec<HouseholdTask>> {
        &self.slice
    }

    pub fn tasks(&self) -> &[HouseholdTask] {
        self.slice.get()
    }

    pub fn get(&self, id: &str) -> Option<&HouseholdTask> {
        position_of(self.tasks(), id).map(|index| &self.tasks()[index])
    }

    /// Appends a pending task. Blank titles are rejected.
    pub fn add_task(&mut self, input: NewTask) -> Result<String, ValidationError> {
        require_text("title", &input.title)?;
        let task = HouseholdTask {
            id: IdClock::global().next_string(),
            title: input.title,
            category: input.category,
            responsible: input.responsible,
            due_date: input.due_date,
            completed: false,
        };
        let id = task.id.clone();
        self.slice.mutate(|tasks| tasks.push(task));
        Ok(id)
    }

    /// Flips completion of `id`. Returns the new state, `None` if absent.
    pub fn toggle_task(&mut self, id: &str) -> Option<bool> {
        position_of(self.tasks(), id)?;
        self.slice.mutate(|tasks| {
            let mut completed = None;
            update_by_id(tasks, id, |task| {
                task.toggle();
                completed = Some(task.completed);
            });
            completed
        })
    }

    pub fn delete_task(&mut self, id: &str) -> Option<HouseholdTask> {
        position_of(self.tasks(), id)?;
        self.slice.mutate(|tasks| remove_by_id(tasks, id))
    }

    /// Tasks passing `filter`, in stored order.
    pub fn filter(&self, filter: &TaskFilter) -> Vec<&HouseholdTask> {
        self.tasks()
            .iter()
            .filter(|task| filter.matches(task))
            .collect()
    }
}
