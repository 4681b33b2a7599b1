use crate::calendar::grid::{days_in_month, YearMonth};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static DATE_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2})/(\d{1,2})/(\d{1,6})\s*$").expect("valid date key regex")
});

/// Canonical event key: `DD/MM/YYYY`, day and month zero-padded to two digits.
///
/// `month` is 1-based: the calendar screen's 0-based month index `m` is
/// passed as `m + 1`, so January is `format_date(7, 1, 2026) == "07/01/2026"`.
/// This is the only formatter for keys stored in `CalendarEvent.date` and
/// looked up from grid cells.
pub fn format_date(day: u32, month: u32, year: i32) -> String {
    format!("{day:02}/{month:02}/{year}")
}

/// Why a stored date string could not be read as a date key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    /// Not three numeric `/`-separated segments.
    Malformed(String),
    /// Numeric but not a real calendar day (e.g. `31/02/2026`).
    OutOfRange(String),
}

impl Display for DateKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(text) => write!(f, "date `{text}` is not DD/MM/YYYY"),
            Self::OutOfRange(text) => write!(f, "date `{text}` is not a calendar day"),
        }
    }
}

impl Error for DateKeyError {}

/// A parsed `DD/MM/YYYY` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateKey {
    pub fn parse(text: &str) -> Result<Self, DateKeyError> {
        let captures = DATE_KEY_RE
            .captures(text)
            .ok_or_else(|| DateKeyError::Malformed(text.to_string()))?;
        let malformed = || DateKeyError::Malformed(text.to_string());
        let key = Self {
            day: captures[1].parse().map_err(|_| malformed())?,
            month: captures[2].parse().map_err(|_| malformed())?,
            year: captures[3].parse().map_err(|_| malformed())?,
        };
        let valid = YearMonth::new(key.year, key.month)
            .map(|ym| (1..=days_in_month(ym)).contains(&key.day))
            .unwrap_or(false);
        if !valid {
            return Err(DateKeyError::OutOfRange(text.to_string()));
        }
        Ok(key)
    }

    pub fn year_month(self) -> Option<YearMonth> {
        YearMonth::new(self.year, self.month).ok()
    }

    /// Canonical string form; equals the input for well-formed keys.
    pub fn to_key(self) -> String {
        format_date(self.day, self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::{format_date, DateKey, DateKeyError};

    #[test]
    fn format_pads_day_and_month() {
        assert_eq!(format_date(7, 1, 2026), "07/01/2026");
        assert_eq!(format_date(15, 12, 2026), "15/12/2026");
    }

    #[test]
    fn parse_reads_canonical_keys() {
        let key = DateKey::parse("03/03/2026").unwrap();
        assert_eq!((key.day, key.month, key.year), (3, 3, 2026));
        assert_eq!(key.to_key(), "03/03/2026");
    }

    #[test]
    fn parse_accepts_unpadded_segments() {
        let key = DateKey::parse("3/3/2026").unwrap();
        assert_eq!(key.to_key(), "03/03/2026");
    }

    #[test]
    fn parse_rejects_malformed_and_impossible_dates() {
        assert!(matches!(
            DateKey::parse("2026-03-03"),
            Err(DateKeyError::Malformed(_))
        ));
        assert!(matches!(DateKey::parse("03/03"), Err(DateKeyError::Malformed(_))));
        assert!(matches!(
            DateKey::parse("aa/03/2026"),
            Err(DateKeyError::Malformed(_))
        ));
        assert!(matches!(
            DateKey::parse("31/02/2026"),
            Err(DateKeyError::OutOfRange(_))
        ));
        assert!(matches!(
            DateKey::parse("10/13/2026"),
            Err(DateKeyError::OutOfRange(_))
        ));
    }
}
