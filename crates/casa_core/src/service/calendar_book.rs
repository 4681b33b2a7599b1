//! Personal calendar (`calendario_renata`).

use crate::calendar::{
    decorate_grid, events_in_month, events_on_date, DateKey, DayCell, MonthGrid, YearMonth,
};
use crate::model::collection::{position_of, remove_by_id, update_by_id};
use crate::model::event::{CalendarEvent, EventDraft};
use crate::model::id::IdClock;
use crate::slice::keys::SliceKey;
use crate::slice::persisted::{PersistedSlice, Persistence};
use chrono::NaiveDate;

/// Everything the month screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub month: YearMonth,
    /// `None` for leading blanks.
    pub cells: Vec<Option<DayCell>>,
    /// Events of the month ordered by day.
    pub events: Vec<CalendarEvent>,
}

pub struct CalendarBook {
    slice: PersistedSlice<Vec<CalendarEvent>>,
}

impl CalendarBook {
    pub fn open(persistence: Persistence) -> Self {
        Self::new(PersistedSlice::open(SliceKey::RenataCalendar.name(), persistence))
    }

    pub fn new(slice: PersistedSlice<Vec<CalendarEvent>>) -> Self {
        IdClock::global().observe_ids(slice.get().iter().map(|event| event.id.as_str()));
        Self { slice }
    }

    pub fn slice(&self) -> &PersistedSlice<Vec<CalendarEvent>> {
        &self.slice
    }

    pub fn events(&self) -> &[CalendarEvent] {
        self.slice.get()
    }

    /// Adds an event on `date`, or edits title/description/time when
    /// `draft.id` is set (the date of an existing event is kept).
    /// Returns `None` for a blank title or unknown id.
    pub fn save_event(&mut self, date: DateKey, draft: EventDraft) -> Option<String> {
        if draft.title.trim().is_empty() {
            return None;
        }
        match draft.id {
            Some(id) => {
                position_of(self.events(), id.as_str())?;
                self.slice.mutate(|events| {
                    update_by_id(events, id.as_str(), |event| {
                        event.title = draft.title;
                        event.description = draft.description;
                        event.time = draft.time;
                    })
                });
                Some(id)
            }
            None => {
                let event = CalendarEvent {
                    id: IdClock::global().next_string(),
                    date: date.to_key(),
                    title: draft.title,
                    description: draft.description,
                    time: draft.time,
                };
                let id = event.id.clone();
                self.slice.mutate(|events| events.push(event));
                Some(id)
            }
        }
    }

    pub fn delete_event(&mut self, id: &str) -> Option<CalendarEvent> {
        position_of(self.events(), id)?;
        self.slice.mutate(|events| remove_by_id(events, id))
    }

    pub fn events_on(&self, date: DateKey) -> Vec<&CalendarEvent> {
        events_on_date(self.events(), &date.to_key())
    }

    pub fn events_in_month(&self, month: YearMonth) -> Vec<&CalendarEvent> {
        events_in_month(self.events(), month)
    }

    pub fn month_view(&self, month: YearMonth, today: NaiveDate) -> MonthView {
        let grid = MonthGrid::build(month);
        MonthView {
            month,
            cells: decorate_grid(&grid, self.events(), today),
            events: self.events_in_month(month).into_iter().cloned().collect(),
        }
    }
}
