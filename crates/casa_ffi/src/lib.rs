//! Flutter bridge for the Casa core.

pub mod api;
