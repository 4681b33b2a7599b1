//! Pet-care notebook (`pets_notas`).

use crate::model::collection::{position_of, remove_by_id, update_by_id};
use crate::model::id::IdClock;
use crate::model::pet::{NoteDraft, Pet, PetNote, PetNotebook};
use crate::slice::keys::SliceKey;
use crate::slice::persisted::{PersistedSlice, Persistence};

pub struct PetNotes {
    slice: PersistedSlice<PetNotebook>,
}

impl PetNotes {
    pub fn open(persistence: Persistence) -> Self {
        Self::new(PersistedSlice::open(SliceKey::PetNotes.name(), persistence))
    }

    pub fn new(slice: PersistedSlice<PetNotebook>) -> Self {
        let notebook = slice.get();
        IdClock::global().observe_ids(
            Pet::ALL
                .iter()
                .flat_map(|pet| notebook.notes(*pet))
                .map(|note| note.id.as_str()),
        );
        Self { slice }
    }

    pub fn notebook(&self) -> &PetNotebook {
        self.slice.get()
    }

    pub fn notes(&self, pet: Pet) -> &[PetNote] {
        self.notebook().notes(pet)
    }

    /// Adds a note for `pet`, or edits subject/date when `draft.id` is set.
    /// Returns `None` when both fields are blank or the id is unknown.
    pub fn save_note(&mut self, pet: Pet, draft: NoteDraft) -> Option<String> {
        if draft.is_blank() {
            return None;
        }
        match draft.id {
            Some(id) => {
                position_of(self.notes(pet), id.as_str())?;
                self.slice.mutate(|book| {
                    update_by_id(book.notes_mut(pet), id.as_str(), |note| {
                        note.subject = draft.subject;
                        note.date = draft.date;
                    })
                });
                Some(id)
            }
            None => {
                let note = PetNote {
                    id: IdClock::global().next_string(),
                    subject: draft.subject,
                    date: draft.date,
                };
                let id = note.id.clone();
                self.slice.mutate(|book| book.notes_mut(pet).push(note));
                Some(id)
            }
        }
    }

    pub fn delete_note(&mut self, pet: Pet, id: &str) -> Option<PetNote> {
        position_of(self.notes(pet), id)?;
        self.slice.mutate(|book| remove_by_id(book.notes_mut(pet), id))
    }
}
