//! Household domain records.
//!
//! # Responsibility
//! - Define the plain records persisted inside each slice.
//! - Keep JSON field names identical to documents already on devices.
//!
//! # Invariants
//! - Every record carries an `id` unique within its slice, minted by
//!   `IdClock` and never reused.
//! - Cross-record references are not enforced; slices are independent.

pub mod bet;
pub mod collection;
pub mod event;
pub mod id;
pub mod lists;
pub mod person;
pub mod pet;
pub mod task;
pub mod validation;
