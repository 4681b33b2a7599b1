//! Home-screen match predictions (`apostas`).

use crate::model::collection::Record;
use serde::{Deserialize, Serialize};

/// Maximum digits accepted for a goal count.
pub const MAX_GOAL_DIGITS: usize = 2;

/// One prediction; kept until the match is marked finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    /// Creation timestamp in epoch milliseconds; stored as a JSON number.
    pub id: u64,
    #[serde(rename = "campeonato", default)]
    pub championship: String,
    #[serde(rename = "timeCasa", default)]
    pub home_team: String,
    #[serde(rename = "timeFora", default)]
    pub away_team: String,
    /// Digit string, as typed.
    #[serde(rename = "golCasa", default)]
    pub home_goals: String,
    #[serde(rename = "golFora", default)]
    pub away_goals: String,
    /// Creation date, `DD/MM/YYYY`.
    #[serde(rename = "data", default)]
    pub created_on: String,
}

impl Record for Bet {
    type Id = u64;

    fn record_id(&self) -> &u64 {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BetDraft {
    pub championship: String,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: String,
    pub away_goals: String,
}

/// Keeps only ASCII digits, at most `MAX_GOAL_DIGITS` of them.
pub fn sanitize_goals(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_digit)
        .take(MAX_GOAL_DIGITS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sanitize_goals;

    #[test]
    fn sanitize_goals_keeps_two_digits_only() {
        assert_eq!(sanitize_goals("2"), "2");
        assert_eq!(sanitize_goals(" 1a0 "), "10");
        assert_eq!(sanitize_goals("123"), "12");
        assert_eq!(sanitize_goals("-"), "");
    }
}
