pub mod clock;
pub mod game_engine;
pub mod grid_generator;
pub mod line_detector;
pub mod progress_tracker;
pub mod reroll_manager;
pub mod scoring_rules;
pub mod seeded_random;
pub mod settings;
pub mod stats_manager;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use game_engine::GameEngine;
pub use grid_generator::{generate, GeneratedGrid};
pub use line_detector::{bonus_points, find_completed_lines, LineTracker};
pub use scoring_rules::{evaluate, par_value};
pub use seeded_random::{string_hash, LinearCongruential, SeededRandom};
pub use settings::Settings;
pub use stats_manager::StatsManager;
pub use storage::{FileStore, KeyValueStore, MemoryStore, RecordKey};
