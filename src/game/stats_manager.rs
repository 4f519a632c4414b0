use chrono::NaiveDate;
use log::info;
use std::io;

use super::storage::{load_record, save_record, KeyValueStore, RecordKey};
use crate::model::{ScoreHistory, StreakState};

/// Daily play streak and the score history it feeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsManager {
    streak: StreakState,
    history: ScoreHistory,
}

impl StatsManager {
    pub fn new(streak: StreakState, history: ScoreHistory) -> Self {
        Self { streak, history }
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            streak: load_record(store, RecordKey::Streak).unwrap_or_default(),
            history: load_record(store, RecordKey::ScoreHistory).unwrap_or_default(),
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> io::Result<()> {
        save_record(store, RecordKey::Streak, &self.streak)?;
        save_record(store, RecordKey::ScoreHistory, &self.history)?;
        Ok(())
    }

    pub fn streak(&self) -> &StreakState {
        &self.streak
    }

    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    pub fn played_on(&self, day: NaiveDate) -> bool {
        self.streak.last_played_date == Some(day)
    }

    /// Count today towards the streak after a scoring action.
    ///
    /// Nothing happens unless the board has progress, and only the first call
    /// on a given calendar day updates the streak and appends `total_score` to
    /// the history. Returns whether anything changed.
    pub fn record_day(&mut self, board_has_progress: bool, total_score: i64, today: NaiveDate) -> bool {
        if !board_has_progress || self.played_on(today) {
            return false;
        }

        let yesterday = today.pred_opt();
        self.streak.current_streak = match self.streak.last_played_date {
            Some(last) if Some(last) == yesterday => self.streak.current_streak + 1,
            _ => 1,
        };
        self.streak.best_streak = self.streak.best_streak.max(self.streak.current_streak);
        self.streak.last_played_date = Some(today);
        self.history.record(total_score);

        info!(
            target: "streak",
            "Played on {}: streak {} (best {}), score {}",
            today, self.streak.current_streak, self.streak.best_streak, total_score
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::storage::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn stats_last_played(last: NaiveDate, current: u32, best: u32) -> StatsManager {
        StatsManager::new(
            StreakState {
                current_streak: current,
                best_streak: best,
                last_played_date: Some(last),
            },
            ScoreHistory::default(),
        )
    }

    #[test]
    fn test_first_play_starts_streak() {
        let mut stats = StatsManager::default();
        assert!(stats.record_day(true, 7, day(19)));
        assert_eq!(stats.streak().current_streak, 1);
        assert_eq!(stats.streak().best_streak, 1);
        assert_eq!(stats.streak().last_played_date, Some(day(19)));
        assert_eq!(stats.history().total_games_played, 1);
        assert_eq!(stats.history().last_score, 7);
    }

    #[test]
    fn test_yesterday_extends_streak() {
        let mut stats = stats_last_played(day(18), 4, 4);
        stats.record_day(true, 3, day(19));
        assert_eq!(stats.streak().current_streak, 5);
        assert_eq!(stats.streak().best_streak, 5);
    }

    #[test]
    fn test_gap_resets_streak() {
        let mut stats = stats_last_played(day(16), 4, 6);
        stats.record_day(true, 3, day(19));
        assert_eq!(stats.streak().current_streak, 1);
        assert_eq!(stats.streak().best_streak, 6);
    }

    #[test]
    fn test_streak_crosses_month_boundary() {
        let mut stats = stats_last_played(NaiveDate::from_ymd_opt(2026, 9, 30).unwrap(), 2, 2);
        stats.record_day(true, 1, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        assert_eq!(stats.streak().current_streak, 3);
    }

    #[test]
    fn test_counts_once_per_day() {
        let mut stats = stats_last_played(day(18), 1, 1);
        assert!(stats.record_day(true, 3, day(19)));
        assert!(!stats.record_day(true, 12, day(19)));
        assert_eq!(stats.streak().current_streak, 2);
        assert_eq!(stats.history().total_games_played, 1);
        assert_eq!(stats.history().last_score, 3);
    }

    #[test]
    fn test_no_progress_is_ignored() {
        let mut stats = StatsManager::default();
        assert!(!stats.record_day(false, 0, day(19)));
        assert_eq!(stats, StatsManager::default());
    }

    #[test]
    fn test_persists_through_store() {
        let mut store = MemoryStore::new();
        let mut stats = stats_last_played(day(18), 2, 3);
        stats.record_day(true, 9, day(19));
        stats.save(&mut store).unwrap();

        let loaded = StatsManager::load(&store);
        assert_eq!(loaded, stats);
        assert!(store.get("streak:global").is_some());
        assert!(store.get("scoreHistory:global").is_some());
    }
}
