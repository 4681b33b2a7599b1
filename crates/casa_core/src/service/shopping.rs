//! Grocery (`itens_mercado`) and pharmacy (`itens_farmacia`) lists.

use crate::model::collection::{position_of, remove_by_id, update_by_id};
use crate::model::id::IdClock;
use crate::model::lists::{ItemDraft, PharmacyItem, ShoppingCategory, ShoppingItem};
use crate::slice::keys::SliceKey;
use crate::slice::persisted::{PersistedSlice, Persistence};
use std::collections::BTreeSet;

/// Categories currently shown; all three by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySelection {
    selected: BTreeSet<ShoppingCategory>,
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self {
            selected: ShoppingCategory::ALL.into_iter().collect(),
        }
    }
}

impl CategorySelection {
    pub fn only(categories: impl IntoIterator<Item = ShoppingCategory>) -> Self {
        Self {
            selected: categories.into_iter().collect(),
        }
    }

    /// Adds or removes `category`.
    pub fn toggle(&mut self, category: ShoppingCategory) {
        if !self.selected.remove(&category) {
            self.selected.insert(category);
        }
    }

    pub fn contains(&self, category: ShoppingCategory) -> bool {
        self.selected.contains(&category)
    }
}

/// Result of ticking an item off in shopping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub found: bool,
    /// Every item in the selected categories is now collected.
    pub trip_complete: bool,
}

pub struct ShoppingList {
    slice: PersistedSlice<Vec<ShoppingItem>>,
}

impl ShoppingList {
    pub fn open(persistence: Persistence) -> Self {
        Self::new(PersistedSlice::open(SliceKey::ShoppingItems.name(), persistence))
    }

    pub fn new(slice: PersistedSlice<Vec<ShoppingItem>>) -> Self {
        IdClock::global().observe_ids(slice.get().iter().map(|item| item.id.as_str()));
        Self { slice }
    }

    pub fn slice(&self) -> &PersistedSlice<Vec<ShoppingItem>> {
        &self.slice
    }

    pub fn items(&self) -> &[ShoppingItem] {
        self.slice.get()
    }

    /// Inserts a new item, or edits name/quantity/category when `draft.id`
    /// is set. Returns the item id; `None` for a blank name or unknown id.
    pub fn save_item(&mut self, draft: ItemDraft) -> Option<String> {
        if draft.name.trim().is_empty() {
            return None;
        }
        match draft.id {
            Some(id) => {
                position_of(self.items(), id.as_str())?;
                self.slice.mutate(|items| {
                    update_by_id(items, id.as_str(), |item| {
                        item.name = draft.name;
                        item.quantity = draft.quantity;
                        item.category = draft.category;
                    })
                });
                Some(id)
            }
            None => {
                let item = ShoppingItem {
                    id: IdClock::global().next_string(),
                    name: draft.name,
                    quantity: draft.quantity,
                    category: draft.category,
                    collected: false,
                };
                let id = item.id.clone();
                self.slice.mutate(|items| items.push(item));
                Some(id)
            }
        }
    }

    /// Flips `collected` and reports whether the trip over `selection` is done.
    pub fn toggle_collected(&mut self, id: &str, selection: &CategorySelection) -> ToggleOutcome {
        if position_of(self.items(), id).is_none() {
            return ToggleOutcome {
                found: false,
                trip_complete: self.is_trip_complete(selection),
            };
        }
        self.slice.mutate(|items| {
            update_by_id(items, id, |item| item.collected = !item.collected);
        });
        ToggleOutcome {
            found: true,
            trip_complete: self.is_trip_complete(selection),
        }
    }

    pub fn delete_item(&mut self, id: &str) -> Option<ShoppingItem> {
        position_of(self.items(), id)?;
        self.slice.mutate(|items| remove_by_id(items, id))
    }

    pub fn visible_items<'a>(
        &'a self,
        selection: &'a CategorySelection,
    ) -> impl Iterator<Item = &'a ShoppingItem> + 'a {
        self.items()
            .iter()
            .filter(move |item| selection.contains(item.category))
    }

    pub fn items_to_shop<'a>(&'a self, selection: &'a CategorySelection) -> Vec<&'a ShoppingItem> {
        self.visible_items(selection)
            .filter(|item| !item.collected)
            .collect()
    }

    pub fn items_collected<'a>(
        &'a self,
        selection: &'a CategorySelection,
    ) -> Vec<&'a ShoppingItem> {
        self.visible_items(selection)
            .filter(|item| item.collected)
            .collect()
    }

    /// Ends a trip: un-collects every item in the selected categories.
    /// Returns how many items changed; nothing is persisted when none did.
    pub fn reset_collected(&mut self, selection: &CategorySelection) -> usize {
        let changed = self
            .visible_items(selection)
            .filter(|item| item.collected)
            .count();
        if changed == 0 {
            return 0;
        }
        self.slice.mutate(|items| {
            items
                .iter_mut()
                .filter(|item| selection.contains(item.category))
                .for_each(|item| item.collected = false);
        });
        changed
    }

    /// True when the selected categories hold at least one item and all of
    /// them are collected.
    pub fn is_trip_complete(&self, selection: &CategorySelection) -> bool {
        let mut visible = self.visible_items(selection).peekable();
        visible.peek().is_some() && visible.all(|item| item.collected)
    }
}

pub struct PharmacyList {
    slice: PersistedSlice<Vec<PharmacyItem>>,
}

impl PharmacyList {
    pub fn open(persistence: Persistence) -> Self {
        Self::new(PersistedSlice::open(SliceKey::PharmacyItems.name(), persistence))
    }

    pub fn new(slice: PersistedSlice<Vec<PharmacyItem>>) -> Self {
        IdClock::global().observe_ids(slice.get().iter().map(|item| item.id.as_str()));
        Self { slice }
    }

    pub fn items(&self) -> &[PharmacyItem] {
        self.slice.get()
    }

    /// Same contract as `ShoppingList::save_item`; `draft.category` is ignored.
    pub fn save_item(&mut self, draft: ItemDraft) -> Option<String> {
        if draft.name.trim().is_empty() {
            return None;
        }
        match draft.id {
            Some(id) => {
                position_of(self.items(), id.as_str())?;
                self.slice.mutate(|items| {
                    update_by_id(items, id.as_str(), |item| {
                        item.name = draft.name;
                        item.quantity = draft.quantity;
                    })
                });
                Some(id)
            }
            None => {
                let item = PharmacyItem {
                    id: IdClock::global().next_string(),
                    name: draft.name,
                    quantity: draft.quantity,
                };
                let id = item.id.clone();
                self.slice.mutate(|items| items.push(item));
                Some(id)
            }
        }
    }

    pub fn delete_item(&mut self, id: &str) -> Option<PharmacyItem> {
        position_of(self.items(), id)?;
        self.slice.mutate(|items| remove_by_id(items, id))
    }
}
