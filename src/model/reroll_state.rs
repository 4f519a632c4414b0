use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily reroll allowance for one (seed, grid size) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RerollState {
    pub seed: String,
    pub grid_size: usize,
    pub remaining: u32,
    pub last_reset_date: NaiveDate,
}

impl RerollState {
    /// Rerolls granted per day for a grid size.
    pub fn cap_for(grid_size: usize) -> u32 {
        match grid_size {
            3 => 1,
            4 => 2,
            5 => 3,
            _ => 1,
        }
    }

    pub fn fresh(seed: &str, grid_size: usize, today: NaiveDate) -> Self {
        Self {
            seed: seed.to_string(),
            grid_size,
            remaining: Self::cap_for(grid_size),
            last_reset_date: today,
        }
    }

    pub fn matches(&self, seed: &str, grid_size: usize) -> bool {
        self.seed == seed && self.grid_size == grid_size
    }
}
