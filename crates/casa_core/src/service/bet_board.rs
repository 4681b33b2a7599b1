//! Home-screen predictions board (`apostas`).

use crate::calendar::format_date;
use crate::model::bet::{sanitize_goals, Bet, BetDraft};
use crate::model::collection::{position_of, remove_by_id};
use crate::model::id::IdClock;
use crate::model::validation::{require_text, ValidationError};
use crate::slice::keys::SliceKey;
use crate::slice::persisted::{PersistedSlice, Persistence};
use chrono::{Datelike, Local, NaiveDate};

pub struct BetBoard {
    slice: PersistedSlice<Vec<Bet>>,
}

impl BetBoard {
    pub fn open(persistence: Persistence) -> Self {
        Self::new(PersistedSlice::open(SliceKey::Bets.name(), persistence))
    }

    pub fn new(slice: PersistedSlice<Vec<Bet>>) -> Self {
        if let Some(newest) = slice.get().iter().map(|bet| bet.id).max() {
            IdClock::global().observe(newest);
        }
        Self { slice }
    }

    pub fn slice(&self) -> &PersistedSlice<Vec<Bet>> {
        &self.slice
    }

    /// Open bets, newest first.
    pub fn bets(&self) -> &[Bet] {
        self.slice.get()
    }

    /// Records a bet dated today (local time).
    pub fn place_bet(&mut self, draft: BetDraft) -> Result<u64, ValidationError> {
        self.place_bet_on(draft, Local::now().date_naive())
    }

    /// Records a bet at the front of the board. Every field is required;
    /// goal fields keep at most two digits.
    pub fn place_bet_on(
        &mut self,
        draft: BetDraft,
        created_on: NaiveDate,
    ) -> Result<u64, ValidationError> {
        require_text("campeonato", &draft.championship)?;
        require_text("timeCasa", &draft.home_team)?;
        require_text("timeFora", &draft.away_team)?;
        let home_goals = sanitize_goals(&draft.home_goals);
        let away_goals = sanitize_goals(&draft.away_goals);
        if home_goals.is_empty() {
            return Err(ValidationError::InvalidScore("golCasa"));
        }
        if away_goals.is_empty() {
            return Err(ValidationError::InvalidScore("golFora"));
        }

        let bet = Bet {
            id: IdClock::global().next(),
            championship: draft.championship,
            home_team: draft.home_team,
            away_team: draft.away_team,
            home_goals,
            away_goals,
            created_on: format_date(created_on.day(), created_on.month(), created_on.year()),
        };
        let id = bet.id;
        self.slice.mutate(|bets| bets.insert(0, bet));
        Ok(id)
    }

    /// Removes a bet once its match is over.
    pub fn finalize_bet(&mut self, id: u64) -> Option<Bet> {
        position_of(self.bets(), &id)?;
        self.slice.mutate(|bets| remove_by_id(bets, &id))
    }
}
