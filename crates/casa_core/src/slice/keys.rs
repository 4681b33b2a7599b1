//! Canonical slice names.

use crate::model::person::Person;
use std::fmt::{Display, Formatter};

const PERSONAL_PREFIX: &str = "pessoal_";
const PERSONAL_TASKS_SUFFIX: &str = "_tarefas";
const PERSONAL_NOTES_SUFFIX: &str = "_notas";

/// Storage key of one slice. The string forms are stable on-device names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceKey {
    /// `tarefas`: `Vec<HouseholdTask>`.
    Tasks,
    /// `itens_mercado`: `Vec<ShoppingItem>`.
    ShoppingItems,
    /// `itens_farmacia`: `Vec<PharmacyItem>`.
    PharmacyItems,
    /// `pets_notas`: `PetNotebook`.
    PetNotes,
    /// `apostas`: `Vec<Bet>`.
    Bets,
    /// `calendario_renata`: `Vec<CalendarEvent>`.
    RenataCalendar,
    /// `pessoal_<slug>_tarefas`: `Vec<PersonalTask>`, persisted only on opt-in.
    PersonalTasks(Person),
    /// `pessoal_<slug>_notas`: `Vec<PersonalNote>`, persisted only on opt-in.
    PersonalNotes(Person),
}

impl SliceKey {
    /// Every fixed (non-personal) slice.
    pub const SHARED: [SliceKey; 6] = [
        SliceKey::Tasks,
        SliceKey::ShoppingItems,
        SliceKey::PharmacyItems,
        SliceKey::PetNotes,
        SliceKey::Bets,
        SliceKey::RenataCalendar,
    ];

    pub fn name(&self) -> String {
        match self {
            Self::Tasks => "tarefas".to_string(),
            Self::ShoppingItems => "itens_mercado".to_string(),
            Self::PharmacyItems => "itens_farmacia".to_string(),
            Self::PetNotes => "pets_notas".to_string(),
            Self::Bets => "apostas".to_string(),
            Self::RenataCalendar => "calendario_renata".to_string(),
            Self::PersonalTasks(person) => {
                format!("{PERSONAL_PREFIX}{}{PERSONAL_TASKS_SUFFIX}", person.slug())
            }
            Self::PersonalNotes(person) => {
                format!("{PERSONAL_PREFIX}{}{PERSONAL_NOTES_SUFFIX}", person.slug())
            }
        }
    }

    /// Recognises every name produced by `name()`.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Some(shared) = Self::SHARED.into_iter().find(|key| key.name() == name) {
            return Some(shared);
        }

        let rest = name.strip_prefix(PERSONAL_PREFIX)?;
        if let Some(slug) = rest.strip_suffix(PERSONAL_TASKS_SUFFIX) {
            return Person::from_slug(slug).map(Self::PersonalTasks);
        }
        if let Some(slug) = rest.strip_suffix(PERSONAL_NOTES_SUFFIX) {
            return Person::from_slug(slug).map(Self::PersonalNotes);
        }
        None
    }
}

impl Display for SliceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::SliceKey;
    use crate::model::person::Person;

    #[test]
    fn shared_names_match_device_layout() {
        let names: Vec<String> = SliceKey::SHARED.iter().map(SliceKey::name).collect();
        assert_eq!(
            names,
            vec![
                "tarefas",
                "itens_mercado",
                "itens_farmacia",
                "pets_notas",
                "apostas",
                "calendario_renata",
            ]
        );
    }

    #[test]
    fn parse_recognises_shared_and_personal_names() {
        assert_eq!(SliceKey::parse("apostas"), Some(SliceKey::Bets));
        assert_eq!(
            SliceKey::parse("pessoal_renata_tarefas"),
            Some(SliceKey::PersonalTasks(Person::Renata))
        );
        assert_eq!(
            SliceKey::parse("pessoal_vander_notas"),
            Some(SliceKey::PersonalNotes(Person::Vander))
        );
        assert_eq!(SliceKey::parse("pessoal_bob_notas"), None);
        assert_eq!(SliceKey::parse("unknown"), None);
    }
}
