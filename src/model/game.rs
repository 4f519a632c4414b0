use super::ScoringSpec;
use serde::{Deserialize, Serialize};

pub type GameId = u32;

/// One entry of the static game catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub url: String,
    pub scoring: String,
    #[serde(default)]
    pub category: String,
}

impl Game {
    pub fn new(id: GameId, name: &str, url: &str, scoring: &str, category: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            url: url.to_string(),
            scoring: scoring.to_string(),
            category: category.to_string(),
        }
    }

    pub fn scoring_spec(&self) -> ScoringSpec {
        ScoringSpec::parse(&self.scoring)
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.name)
    }
}
