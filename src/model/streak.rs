use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub current_streak: u32,
    pub best_streak: u32,
    pub last_played_date: Option<NaiveDate>,
}

/// Running totals over every day that counted towards the streak.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreHistory {
    pub total_games_played: u32,
    pub total_score_sum: i64,
    pub highest_score: i64,
    pub last_score: i64,
}

impl ScoreHistory {
    pub fn record(&mut self, total_score: i64) {
        self.total_games_played += 1;
        self.total_score_sum += total_score;
        if total_score > self.highest_score {
            self.highest_score = total_score;
        }
        self.last_score = total_score;
    }

    pub fn average(&self) -> f64 {
        if self.total_games_played == 0 {
            0.0
        } else {
            self.total_score_sum as f64 / self.total_games_played as f64
        }
    }
}
