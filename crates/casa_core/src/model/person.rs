//! Household members.

use crate::model::collection::Record;
use serde::{Deserialize, Serialize};

/// A member of the household, used as task owner and dashboard owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Person {
    Amanda,
    Guilherme,
    Renata,
    Vander,
}

impl Person {
    pub const ALL: [Person; 4] = [
        Person::Amanda,
        Person::Guilherme,
        Person::Renata,
        Person::Vander,
    ];

    /// Display name, also the value stored in `Task.responsible`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Amanda => "Amanda",
            Self::Guilherme => "Guilherme",
            Self::Renata => "Renata",
            Self::Vander => "Vander",
        }
    }

    /// Route/slice slug.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Amanda => "amanda",
            Self::Guilherme => "guilherme",
            Self::Renata => "renata",
            Self::Vander => "vander",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let wanted = slug.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|person| person.slug() == wanted)
    }
}

/// A personal checklist entry on a member dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalTask {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Record for PersonalTask {
    type Id = str;

    fn record_id(&self) -> &str {
        &self.id
    }
}

/// A personal scratch note on a member dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalNote {
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub date: String,
}

impl Record for PersonalNote {
    type Id = str;

    fn record_id(&self) -> &str {
        &self.id
    }
}
