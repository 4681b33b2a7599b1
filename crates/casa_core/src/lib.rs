//! Core domain logic for Casa, the shared household app.
//! This crate owns persistence, slice state and calendar math; UI layers
//! only render what it returns.

pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod slice;
pub mod store;

pub use calendar::{
    build_grid, days_in_month, first_weekday_of_month, format_date, CalendarError, DateKey,
    DateKeyError, DayCell, GridCell, MonthGrid, YearMonth,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::bet::{Bet, BetDraft};
pub use model::event::{CalendarEvent, EventDraft};
pub use model::lists::{ItemDraft, PharmacyItem, ShoppingCategory, ShoppingItem};
pub use model::person::{Person, PersonalNote, PersonalTask};
pub use model::pet::{NoteDraft, Pet, PetNote, PetNotebook};
pub use model::task::{HouseholdTask, NewTask};
pub use model::validation::ValidationError;
pub use service::bet_board::BetBoard;
pub use service::calendar_book::{CalendarBook, MonthView};
pub use service::personal_board::{Motivation, PersonalBoard, Progress};
pub use service::pet_notes::PetNotes;
pub use service::shopping::{CategorySelection, PharmacyList, ShoppingList, ToggleOutcome};
pub use service::task_board::{StatusFilter, TaskBoard, TaskFilter};
pub use slice::keys::SliceKey;
pub use slice::persisted::{HydrationStatus, PersistedSlice, Persistence};
pub use slice::writer::{SliceWriter, WriterStats};
pub use store::adapter::{LoadOutcome, SaveOutcome, SliceStore};
pub use store::kv_store::{KeyValueStore, MemoryKvStore, SqliteKvStore, StoreError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
