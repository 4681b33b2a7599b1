//! Pet-care notebook (`pets_notas`).

use crate::model::collection::Record;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pet {
    Arya,
    Sansa,
    Stan,
}

impl Pet {
    pub const ALL: [Pet; 3] = [Pet::Arya, Pet::Sansa, Pet::Stan];

    pub fn name(self) -> &'static str {
        match self {
            Self::Arya => "Arya",
            Self::Sansa => "Sansa",
            Self::Stan => "Stan",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetNote {
    pub id: String,
    #[serde(default)]
    pub subject: String,
    /// Free text date.
    #[serde(default)]
    pub date: String,
}

impl Record for PetNote {
    type Id = str;

    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Notes partitioned by pet, stored as `{"Arya": [..], "Sansa": [..], "Stan": [..]}`.
///
/// A stored document missing a pet key loads that pet as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetNotebook {
    #[serde(rename = "Arya", default)]
    arya: Vec<PetNote>,
    #[serde(rename = "Sansa", default)]
    sansa: Vec<PetNote>,
    #[serde(rename = "Stan", default)]
    stan: Vec<PetNote>,
}

impl PetNotebook {
    pub fn notes(&self, pet: Pet) -> &[PetNote] {
        match pet {
            Pet::Arya => &self.arya,
            Pet::Sansa => &self.sansa,
            Pet::Stan => &self.stan,
        }
    }

    pub fn notes_mut(&mut self, pet: Pet) -> &mut Vec<PetNote> {
        match pet {
            Pet::Arya => &mut self.arya,
            Pet::Sansa => &mut self.sansa,
            Pet::Stan => &mut self.stan,
        }
    }
}

/// Form input for a pet or personal note. `id = Some(..)` edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub id: Option<String>,
    pub subject: String,
    pub date: String,
}

impl NoteDraft {
    /// A note needs at least a subject or a date.
    pub fn is_blank(&self) -> bool {
        self.subject.trim().is_empty() && self.date.trim().is_empty()
    }
}
