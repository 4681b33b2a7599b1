//! Key-value persistence for slice documents.
//!
//! # Responsibility
//! - Provide the string-keyed, string-valued storage medium (`kv_store`).
//! - Encode/decode JSON at the boundary and report explicit outcomes
//!   (`adapter`).
//!
//! # Invariants
//! - Every write replaces the full value stored under a key.
//! - A key that was never written reads as absent, not as an error.

pub mod adapter;
pub mod kv_store;
