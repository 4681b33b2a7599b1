use chrono::{Datelike, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

const DAYS_PER_WEEK: usize = 7;
const FIRST_PICKER_YEAR: i32 = 2016;
const PICKER_YEARS: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarError {
    InvalidMonth(u32),
    /// Year outside the range chrono can represent.
    InvalidYear(i32),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(month) => write!(f, "month must be 1-12, got {month}"),
            Self::InvalidYear(year) => write!(f, "year {year} is out of range"),
        }
    }
}

impl Error for CalendarError {}

/// A validated calendar month. `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        // Both this month's first day and the next month's must exist.
        let next_year = if month == 12 { year.checked_add(1) } else { Some(year) };
        let representable = NaiveDate::from_ymd_opt(year, month, 1).is_some()
            && next_year
                .and_then(|next| NaiveDate::from_ymd_opt(next, month % 12 + 1, 1))
                .is_some();
        if !representable {
            return Err(CalendarError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// Following month, rolling into January of the next year.
    pub fn next(self) -> Result<Self, CalendarError> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Preceding month, rolling into December of the previous year.
    pub fn previous(self) -> Result<Self, CalendarError> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn with_month(self, month: u32) -> Result<Self, CalendarError> {
        Self::new(self.year, month)
    }

    pub fn with_year(self, year: i32) -> Result<Self, CalendarError> {
        Self::new(year, self.month)
    }

    fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }
}

/// Number of days in the month: the day before the first of the next month.
pub fn days_in_month(month: YearMonth) -> u32 {
    let (year, next) = if month.month == 12 {
        (month.year + 1, 1)
    } else {
        (month.year, month.month + 1)
    };
    NaiveDate::from_ymd_opt(year, next, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Weekday of the 1st, Sunday = 0 .. Saturday = 6.
pub fn first_weekday_of_month(month: YearMonth) -> u32 {
    month.first_day().weekday().num_days_from_sunday()
}

/// One position in the month layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    /// Leading placeholder before the 1st; not interactive.
    Blank,
    Day(u32),
}

impl GridCell {
    pub fn day(self) -> Option<u32> {
        match self {
            Self::Blank => None,
            Self::Day(day) => Some(day),
        }
    }
}

/// Leading blanks followed by `1..=days_in_month`.
pub fn build_grid(month: YearMonth) -> Vec<GridCell> {
    let blanks = first_weekday_of_month(month) as usize;
    let days = days_in_month(month);
    let mut cells = Vec::with_capacity(blanks + days as usize);
    cells.extend(std::iter::repeat(GridCell::Blank).take(blanks));
    cells.extend((1..=days).map(GridCell::Day));
    cells
}

/// A built month with row access for 7-column rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn build(month: YearMonth) -> Self {
        Self {
            month,
            cells: build_grid(month),
        }
    }

    /// Rows of seven cells; the last row may be shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }
}

/// Years offered by the year picker.
pub fn year_picker_range() -> RangeInclusive<i32> {
    FIRST_PICKER_YEAR..=FIRST_PICKER_YEAR + PICKER_YEARS - 1
}
