//! Id-targeted edits over slice collections.
//!
//! # Invariants
//! - Only the element whose id matches is touched.
//! - Relative order of untouched elements is preserved.

/// A record addressable by id inside its slice.
pub trait Record {
    type Id: PartialEq + ?Sized;

    fn record_id(&self) -> &Self::Id;
}

/// Index of the record with `id`, if present.
pub fn position_of<T: Record>(items: &[T], id: &T::Id) -> Option<usize> {
    items.iter().position(|item| item.record_id() == id)
}

/// Applies `edit` to the record with `id`. Returns `false` when absent.
pub fn update_by_id<T: Record>(items: &mut [T], id: &T::Id, edit: impl FnOnce(&mut T)) -> bool {
    match position_of(items, id) {
        Some(index) => {
            edit(&mut items[index]);
            true
        }
        None => false,
    }
}

/// Removes the record with `id`, keeping the order of the rest.
pub fn remove_by_id<T: Record>(items: &mut Vec<T>, id: &T::Id) -> Option<T> {
    position_of(items, id).map(|index| items.remove(index))
}
