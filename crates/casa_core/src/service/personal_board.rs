//! Per-person dashboard: personal checklist, notes and progress.
//!
//! Personal lists live in memory unless the caller opts into persistence,
//! in which case they use the `pessoal_<slug>_*` slices.

use crate::model::collection::{position_of, remove_by_id, update_by_id};
use crate::model::id::IdClock;
use crate::model::person::{Person, PersonalNote, PersonalTask};
use crate::model::pet::NoteDraft;
use crate::slice::keys::SliceKey;
use crate::slice::persisted::{PersistedSlice, Persistence};

/// Checklist progress summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub completed: usize,
    pub pending: usize,
    /// 0.0..=100.0; 0 when there are no tasks.
    pub percentage: f64,
}

/// Encouragement tier shown above the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motivation {
    /// No tasks at all.
    Idle,
    AllDone,
    /// At least 75% done.
    AlmostThere,
    /// At least 50% done.
    Halfway,
    GettingStarted,
}

impl Motivation {
    pub fn for_progress(progress: &Progress) -> Self {
        if progress.completed + progress.pending == 0 {
            Self::Idle
        } else if progress.pending == 0 {
            Self::AllDone
        } else if progress.percentage >= 75.0 {
            Self::AlmostThere
        } else if progress.percentage >= 50.0 {
            Self::Halfway
        } else {
            Self::GettingStarted
        }
    }
}

pub struct PersonalBoard {
    person: Person,
    tasks: PersistedSlice<Vec<PersonalTask>>,
    notes: PersistedSlice<Vec<PersonalNote>>,
}

impl PersonalBoard {
    /// Opens both personal slices for `person` with the given persistence.
    pub fn open(person: Person, persistence: Persistence) -> Self {
        let tasks: PersistedSlice<Vec<PersonalTask>> = PersistedSlice::open(
            SliceKey::PersonalTasks(person).name(),
            persistence.clone(),
        );
        let notes: PersistedSlice<Vec<PersonalNote>> =
            PersistedSlice::open(SliceKey::PersonalNotes(person).name(), persistence);
        let clock = IdClock::global();
        clock.observe_ids(tasks.get().iter().map(|task| task.id.as_str()));
        clock.observe_ids(notes.get().iter().map(|note| note.id.as_str()));
        Self {
            person,
            tasks,
            notes,
        }
    }

    /// Memory-only board.
    pub fn in_memory(person: Person) -> Self {
        Self::open(person, Persistence::InMemory)
    }

    pub fn person(&self) -> Person {
        self.person
    }

    pub fn tasks(&self) -> &[PersonalTask] {
        self.tasks.get()
    }

    pub fn notes(&self) -> &[PersonalNote] {
        self.notes.get()
    }

    /// Adds a task, or renames it when `id` is set. `None` for a blank
    /// title or unknown id.
    pub fn save_task(&mut self, id: Option<String>, title: String) -> Option<String> {
        if title.trim().is_empty() {
            return None;
        }
        match id {
            Some(id) => {
                position_of(self.tasks(), id.as_str())?;
                self.tasks.mutate(|tasks| {
                    update_by_id(tasks, id.as_str(), |task| task.title = title)
                });
                Some(id)
            }
            None => {
                let task = PersonalTask {
                    id: IdClock::global().next_string(),
                    title,
                    completed: false,
                };
                let id = task.id.clone();
                self.tasks.mutate(|tasks| tasks.push(task));
                Some(id)
            }
        }
    }

    pub fn toggle_task(&mut self, id: &str) -> Option<bool> {
        position_of(self.tasks(), id)?;
        self.tasks.mutate(|tasks| {
            let mut completed = None;
            update_by_id(tasks, id, |task| {
                task.completed = !task.completed;
                completed = Some(task.completed);
            });
            completed
        })
    }

    pub fn delete_task(&mut self, id: &str) -> Option<PersonalTask> {
        position_of(self.tasks(), id)?;
        self.tasks.mutate(|tasks| remove_by_id(tasks, id))
    }

    /// Adds a note, or edits it when `draft.id` is set. `None` when both
    /// subject and date are blank or the id is unknown.
    pub fn save_note(&mut self, draft: NoteDraft) -> Option<String> {
        if draft.is_blank() {
            return None;
        }
        match draft.id {
            Some(id) => {
                position_of(self.notes(), id.as_str())?;
                self.notes.mutate(|notes| {
                    update_by_id(notes, id.as_str(), |note| {
                        note.subject = draft.subject;
                        note.date = draft.date;
                    })
                });
                Some(id)
            }
            None => {
                let note = PersonalNote {
                    id: IdClock::global().next_string(),
                    subject: draft.subject,
                    date: draft.date,
                };
                let id = note.id.clone();
                self.notes.mutate(|notes| notes.push(note));
                Some(id)
            }
        }
    }

    pub fn delete_note(&mut self, id: &str) -> Option<PersonalNote> {
        position_of(self.notes(), id)?;
        self.notes.mutate(|notes| remove_by_id(notes, id))
    }

    pub fn progress(&self) -> Progress {
        let total = self.tasks().len();
        let completed = self.tasks().iter().filter(|task| task.completed).count();
        let percentage = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        Progress {
            completed,
            pending: total - completed,
            percentage,
        }
    }

    pub fn motivation(&self) -> Motivation {
        Motivation::for_progress(&self.progress())
    }
}
