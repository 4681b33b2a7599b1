//! Household use-case services.
//!
//! # Responsibility
//! - Give each screen one owner for its slice and its edit operations.
//! - Keep UI/FFI layers free of persistence details.
//!
//! # Invariants
//! - Services only change state through `PersistedSlice::mutate`, so every
//!   effective edit persists a full snapshot.
//! - Edits addressed to an unknown id change nothing and persist nothing.
//! - New records get ids from `IdClock::global()`.

pub mod bet_board;
pub mod calendar_book;
pub mod personal_board;
pub mod pet_notes;
pub mod shopping;
pub mod task_board;
