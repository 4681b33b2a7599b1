//! Calendar month grid and the `DD/MM/YYYY` date-key contract.
//!
//! # Responsibility
//! - Turn a year/month into the ordered day cells a 7-column view renders.
//! - Own the single formatter/parser for event date keys.
//! - Select events per day and per month.
//!
//! # Invariants
//! - Weeks start on Sunday (weekday index 0).
//! - Grid length is `first_weekday + days_in_month`; no trailing padding.
//! - Every date key is produced by `format_date`; lookups are exact string
//!   matches against it.

mod date_key;
mod events;
mod grid;

pub use date_key::{format_date, DateKey, DateKeyError};
pub use events::{decorate_grid, events_in_month, events_on_date, malformed_event_dates, DayCell};
pub use grid::{
    build_grid, days_in_month, first_weekday_of_month, year_picker_range, CalendarError,
    GridCell, MonthGrid, YearMonth,
};
