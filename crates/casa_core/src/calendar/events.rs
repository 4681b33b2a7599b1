use crate::calendar::date_key::{format_date, DateKey, DateKeyError};
use crate::calendar::grid::{GridCell, MonthGrid, YearMonth};
use crate::model::event::CalendarEvent;
use chrono::{Datelike, NaiveDate};
use log::warn;

/// Events whose `date` equals `date` exactly.
pub fn events_on_date<'a>(events: &'a [CalendarEvent], date: &str) -> Vec<&'a CalendarEvent> {
    events.iter().filter(|event| event.date == date).collect()
}

/// Events falling in `month`, ordered by day of month (numerically).
///
/// Events with unreadable dates are skipped and logged; use
/// `malformed_event_dates` to list them.
pub fn events_in_month(events: &[CalendarEvent], month: YearMonth) -> Vec<&CalendarEvent> {
    let mut matching: Vec<(u32, &CalendarEvent)> = events
        .iter()
        .filter_map(|event| match DateKey::parse(&event.date) {
            Ok(key) if key.year == month.year() && key.month == month.month() => {
                Some((key.day, event))
            }
            Ok(_) => None,
            Err(err) => {
                warn!(
                    "event=calendar_month_filter module=calendar status=skipped event_id={} error={err}",
                    event.id
                );
                None
            }
        })
        .collect();
    // Stable: same-day events keep insertion order.
    matching.sort_by_key(|(day, _)| *day);
    matching.into_iter().map(|(_, event)| event).collect()
}

/// Events whose stored date cannot be parsed, with the reason.
pub fn malformed_event_dates(events: &[CalendarEvent]) -> Vec<(&CalendarEvent, DateKeyError)> {
    events
        .iter()
        .filter_map(|event| DateKey::parse(&event.date).err().map(|err| (event, err)))
        .collect()
}

/// Render-ready day cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date_key: String,
    pub event_count: usize,
    pub is_today: bool,
}

/// Decorates a month grid with event counts and the today marker.
/// Blank cells stay `None`.
pub fn decorate_grid(
    grid: &MonthGrid,
    events: &[CalendarEvent],
    today: NaiveDate,
) -> Vec<Option<DayCell>> {
    let month = grid.month;
    let today_in_month = YearMonth::of(today) == month;
    grid.cells
        .iter()
        .map(|cell| match *cell {
            GridCell::Blank => None,
            GridCell::Day(day) => {
                let date_key = format_date(day, month.month(), month.year());
                Some(DayCell {
                    day,
                    event_count: events_on_date(events, &date_key).len(),
                    date_key,
                    is_today: today_in_month && today.day() == day,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{decorate_grid, events_in_month, events_on_date, malformed_event_dates};
    use crate::calendar::date_key::format_date;
    use crate::calendar::grid::{MonthGrid, YearMonth};
    use crate::model::event::CalendarEvent;
    use chrono::NaiveDate;

    fn event(id: &str, date: &str) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            date: date.to_string(),
            title: format!("evento {id}"),
            description: String::new(),
            time: String::new(),
        }
    }

    fn ids(events: &[&CalendarEvent]) -> Vec<String> {
        events.iter().map(|event| event.id.clone()).collect()
    }

    #[test]
    fn month_filter_sorts_by_day_and_excludes_other_months() {
        let events = vec![
            event("a", "15/03/2026"),
            event("b", "03/03/2026"),
            event("c", "20/04/2026"),
        ];
        let march = YearMonth::new(2026, 3).unwrap();

        assert_eq!(ids(&events_in_month(&events, march)), vec!["b", "a"]);
    }

    #[test]
    fn month_filter_compares_days_numerically() {
        let events = vec![event("late", "10/05/2026"), event("early", "9/05/2026")];
        let may = YearMonth::new(2026, 5).unwrap();

        assert_eq!(ids(&events_in_month(&events, may)), vec!["early", "late"]);
    }

    #[test]
    fn month_filter_skips_malformed_dates_and_reports_them() {
        let events = vec![event("ok", "01/06/2026"), event("bad", "junho")];
        let june = YearMonth::new(2026, 6).unwrap();

        assert_eq!(ids(&events_in_month(&events, june)), vec!["ok"]);
        let malformed = malformed_event_dates(&events);
        assert_eq!(malformed.len(), 1);
        assert_eq!(malformed[0].0.id, "bad");
    }

    #[test]
    fn formatted_day_key_finds_event_by_exact_match() {
        let key = format_date(7, 1, 2026);
        let events = vec![event("a", &key), event("b", "7/01/2026")];

        assert_eq!(ids(&events_on_date(&events, "07/01/2026")), vec!["a"]);
    }

    #[test]
    fn decorated_grid_counts_events_and_marks_today() {
        let month = YearMonth::new(2026, 1).unwrap();
        let grid = MonthGrid::build(month);
        let events = vec![event("a", "07/01/2026"), event("b", "07/01/2026")];
        let today = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();

        let cells = decorate_grid(&grid, &events, today);
        assert_eq!(cells.len(), grid.cells.len());
        assert!(cells[..4].iter().all(Option::is_none));

        let seventh = cells[4 + 6].as_ref().unwrap();
        assert_eq!(seventh.day, 7);
        assert_eq!(seventh.date_key, "07/01/2026");
        assert_eq!(seventh.event_count, 2);
        assert!(seventh.is_today);
        assert!(!cells[4].as_ref().unwrap().is_today);
    }
}
