use super::{Difficulty, Game, GameId, PerformanceTier};
use chrono::{DateTime, Local, NaiveDate};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Raw score stored for a cell explicitly marked as failed.
pub const FAILED_SCORE: i64 = -1;

/// The mutable per-day session for one (seed, grid size) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub seed: String,
    pub grid_size: usize,
    /// Row-major: cell index = row * grid_size + col.
    pub grid: Vec<Game>,
    pub difficulty_of: HashMap<GameId, Difficulty>,
    pub score_of: HashMap<GameId, Option<i64>>,
    pub status_of: HashMap<GameId, PerformanceTier>,
    pub last_updated: DateTime<Local>,
}

impl BoardState {
    /// A fresh board with every cell unattempted.
    pub fn new(
        seed: &str,
        grid_size: usize,
        grid: Vec<Game>,
        difficulty_of: HashMap<GameId, Difficulty>,
        now: DateTime<Local>,
    ) -> Self {
        let score_of = grid.iter().map(|game| (game.id, None)).collect();
        let status_of = grid
            .iter()
            .map(|game| (game.id, PerformanceTier::Unattempted))
            .collect();
        Self {
            seed: seed.to_string(),
            grid_size,
            grid,
            difficulty_of,
            score_of,
            status_of,
            last_updated: now,
        }
    }

    pub fn contains(&self, game_id: GameId) -> bool {
        self.grid.iter().any(|game| game.id == game_id)
    }

    pub fn position_of(&self, game_id: GameId) -> Option<usize> {
        self.grid.iter().position(|game| game.id == game_id)
    }

    pub fn game(&self, game_id: GameId) -> Option<&Game> {
        self.grid.iter().find(|game| game.id == game_id)
    }

    pub fn difficulty(&self, game_id: GameId) -> Difficulty {
        self.difficulty_of
            .get(&game_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn status(&self, game_id: GameId) -> PerformanceTier {
        self.status_of.get(&game_id).copied().unwrap_or_default()
    }

    pub fn score(&self, game_id: GameId) -> Option<i64> {
        self.score_of.get(&game_id).copied().flatten()
    }

    /// A failed cell refuses numeric entry until it is reset.
    pub fn is_locked(&self, game_id: GameId) -> bool {
        self.score(game_id) == Some(FAILED_SCORE)
    }

    /// True when any cell on the board has been touched.
    pub fn has_progress(&self) -> bool {
        self.grid
            .iter()
            .any(|game| self.status(game.id) != PerformanceTier::Unattempted)
    }

    /// Statuses in grid order.
    pub fn statuses(&self) -> Vec<PerformanceTier> {
        self.grid.iter().map(|game| self.status(game.id)).collect_vec()
    }

    pub fn base_score(&self) -> i64 {
        self.grid
            .iter()
            .map(|game| self.status(game.id).score_value())
            .sum()
    }

    pub fn last_updated_day(&self) -> NaiveDate {
        self.last_updated.date_naive()
    }

    /// Whether a persisted board may be reused verbatim for this seed, size and day.
    pub fn is_current(&self, seed: &str, grid_size: usize, today: NaiveDate) -> bool {
        self.seed == seed && self.grid_size == grid_size && self.last_updated_day() == today
    }

    /// Checks the structural invariants: n*n cells, unique ids, and exactly one
    /// difficulty/score/status entry per cell.
    pub fn is_consistent(&self) -> bool {
        let ids: HashSet<GameId> = self.grid.iter().map(|game| game.id).collect();
        ids.len() == self.grid.len()
            && self.grid.len() == self.grid_size * self.grid_size
            && ids.iter().all(|id| {
                self.difficulty_of.contains_key(id)
                    && self.score_of.contains_key(id)
                    && self.status_of.contains_key(id)
            })
    }

    /// Drop map entries for games that are no longer on the grid.
    pub fn prune_stale_entries(&mut self) {
        let ids: HashSet<GameId> = self.grid.iter().map(|game| game.id).collect();
        self.difficulty_of.retain(|id, _| ids.contains(id));
        self.score_of.retain(|id, _| ids.contains(id));
        self.status_of.retain(|id, _| ids.contains(id));
    }
}
