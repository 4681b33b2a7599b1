//! Persisted slices: one named unit of state bound to one storage key.
//!
//! # Responsibility
//! - Catalog the slice names used on devices (`keys`).
//! - Bind in-memory state to its key with hydrate-once and
//!   snapshot-on-every-mutation semantics (`persisted`).
//! - Order snapshot writes through a single writer when required (`writer`).
//!
//! # Invariants
//! - A slice is always written as a complete snapshot.
//! - Distinct slices never share a key.

pub mod keys;
pub mod persisted;
pub mod writer;
