mod board_state;
mod catalog;
mod difficulty;
mod game;
mod game_engine_command;
mod game_engine_event;
mod line;
mod performance;
mod reroll_state;
mod score_summary;
mod scoring_spec;
pub mod seed;
mod streak;
mod timer_state;

pub use board_state::{BoardState, FAILED_SCORE};
pub use catalog::{default_catalog, read_catalog_from_json, validate_catalog};
pub use difficulty::Difficulty;
pub use game::{Game, GameId};
pub use game_engine_command::GameEngineCommand;
pub use game_engine_event::GameEngineEvent;
pub use line::{Diagonal, Line, LineType};
pub use performance::PerformanceTier;
pub use reroll_state::RerollState;
pub use score_summary::ScoreSummary;
pub use scoring_spec::{MetricKind, ScoringSpec};
pub use seed::{is_daily_seed, resolve_seed, DAILY_SEED};
pub use streak::{ScoreHistory, StreakState};
pub use timer_state::TimerState;
