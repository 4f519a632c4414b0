use chrono::{DateTime, Local, NaiveDate};
use log::{debug, info, trace, warn};
use std::time::SystemTime;

use super::clock::Clock;
use super::grid_generator::generate;
use super::line_detector::{find_completed_lines, LineTracker};
use super::progress_tracker::{self, CellUpdate};
use super::reroll_manager::{self, check_and_reset};
use super::scoring_rules::par_for;
use super::settings::{validate_grid_size, Settings};
use super::stats_manager::StatsManager;
use super::storage::{load_record, remove_record, save_record, KeyValueStore, RecordKey};
use crate::error::Result;
use crate::model::seed::{is_daily_seed, resolve_seed, DAILY_SEED};
use crate::model::{
    BoardState, Game, GameEngineCommand, GameEngineEvent, GameId, RerollState, ScoreSummary,
    TimerState,
};

/// One player's session: today's board for the configured seed and size,
/// plus the rerolls, streak and timer that go with it.
pub struct GameEngine {
    catalog: Vec<Game>,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    settings: Settings,
    board: BoardState,
    rerolls: RerollState,
    stats: StatsManager,
    timer_state: TimerState,
    line_tracker: LineTracker,
    debug_mode: bool,
}

impl GameEngine {
    /// Restore today's board from `store`, or generate it.
    pub fn new(
        catalog: Vec<Game>,
        settings: Settings,
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
    ) -> Result<Self> {
        let grid_size = validate_grid_size(settings.grid_size)?;
        let now = clock.now();
        let today = now.date_naive();
        let seed = resolve_seed(&settings.seed, today, grid_size);

        let board = Self::load_or_generate(&catalog, store.as_ref(), &seed, grid_size, now)?;
        let rerolls = check_and_reset(
            load_record(store.as_ref(), RecordKey::Reroll(&seed, grid_size)),
            &seed,
            grid_size,
            today,
        );
        let timer_state = Self::load_timer(store.as_ref(), &seed, grid_size, now);
        let stats = StatsManager::load(store.as_ref());

        let mut engine = Self {
            catalog,
            store,
            clock,
            settings,
            board,
            rerolls,
            stats,
            timer_state,
            line_tracker: LineTracker::new(),
            debug_mode: Settings::is_debug_mode(),
        };
        engine.prime_line_tracker();
        engine.save_board();
        engine.save_rerolls();
        Ok(engine)
    }

    fn load_or_generate(
        catalog: &[Game],
        store: &dyn KeyValueStore,
        seed: &str,
        grid_size: usize,
        now: DateTime<Local>,
    ) -> Result<BoardState> {
        let today = now.date_naive();
        if let Some(board) = load_record::<BoardState, _>(store, RecordKey::Board(seed, grid_size)) {
            if board.is_current(seed, grid_size, today) && board.is_consistent() {
                debug!(target: "game_engine", "Restored board {}:{}", seed, grid_size);
                return Ok(board);
            }
            info!(
                target: "game_engine",
                "Discarding board {}:{} from {}", seed, grid_size, board.last_updated_day()
            );
        }

        let generated = generate(catalog, seed, grid_size)?;
        info!(target: "game_engine", "Generated {}x{} board for seed {}", grid_size, grid_size, seed);
        Ok(BoardState::new(
            seed,
            grid_size,
            generated.grid,
            generated.difficulty_of,
            now,
        ))
    }

    fn load_timer(
        store: &dyn KeyValueStore,
        seed: &str,
        grid_size: usize,
        now: DateTime<Local>,
    ) -> TimerState {
        let now_sys = SystemTime::from(now);
        load_record::<TimerState, _>(store, RecordKey::Timer(seed, grid_size))
            .filter(|timer| timer.saved_day() == now.date_naive())
            .map(|timer| timer.restored(now_sys))
            .unwrap_or_else(|| TimerState::new(now_sys))
    }

    /// Lines already complete on a restored board are not announced again.
    fn prime_line_tracker(&mut self) {
        self.line_tracker.clear();
        self.line_tracker
            .newly_completed(&self.board.grid, &self.board.status_of, self.board.grid_size);
    }

    /// Reload everything for the current settings and today.
    fn start_session(&mut self) -> Result<Vec<GameEngineEvent>> {
        let now = self.clock.now();
        let today = now.date_naive();
        let grid_size = validate_grid_size(self.settings.grid_size)?;
        let seed = resolve_seed(&self.settings.seed, today, grid_size);

        self.board =
            Self::load_or_generate(&self.catalog, self.store.as_ref(), &seed, grid_size, now)?;
        self.rerolls = check_and_reset(
            load_record(self.store.as_ref(), RecordKey::Reroll(&seed, grid_size)),
            &seed,
            grid_size,
            today,
        );
        self.timer_state = Self::load_timer(self.store.as_ref(), &seed, grid_size, now);
        self.prime_line_tracker();
        self.save_board();
        self.save_rerolls();

        Ok(vec![
            GameEngineEvent::BoardChanged(self.board.clone()),
            GameEngineEvent::RerollsChanged(self.rerolls.remaining),
            GameEngineEvent::ScoreChanged(self.summary()),
            GameEngineEvent::TimerStateChanged(self.timer_state.clone()),
            GameEngineEvent::StreakChanged(
                self.stats.streak().clone(),
                self.stats.history().clone(),
            ),
        ])
    }

    pub fn handle_command(&mut self, command: GameEngineCommand) -> Result<Vec<GameEngineEvent>> {
        trace!(target: "game_engine", "Handling command {:?}", command);
        let mut events = self.roll_over_if_stale()?;
        let mut command_events = match command {
            GameEngineCommand::SetScore(game_id, raw) => {
                if self.debug_mode {
                    self.log_par(game_id, &raw);
                }
                let update = progress_tracker::set_score(&mut self.board, game_id, &raw);
                self.after_cell_update(update)
            }
            GameEngineCommand::MarkFailed(game_id) => {
                let update = progress_tracker::mark_failed(&mut self.board, game_id);
                self.after_cell_update(update)
            }
            GameEngineCommand::ResetCell(game_id) => {
                let update = progress_tracker::reset_cell(&mut self.board, game_id);
                self.after_cell_update(update)
            }
            GameEngineCommand::Reroll(game_id) => self.reroll(game_id),
            GameEngineCommand::ChangeGridSize(grid_size) => self.change_grid_size(grid_size)?,
            GameEngineCommand::ChangeSeed(seed) => self.change_seed(&seed)?,
            GameEngineCommand::ResetProgress => self.reset_progress(),
            GameEngineCommand::StartTimer => {
                let now = self.now_sys();
                self.update_timer(self.timer_state.started(now))
            }
            GameEngineCommand::PauseTimer => {
                let now = self.now_sys();
                self.update_timer(self.timer_state.paused(now))
            }
            GameEngineCommand::ResetTimer => {
                let now = self.now_sys();
                self.update_timer(self.timer_state.reset(now))
            }
            GameEngineCommand::Refresh => vec![],
        };
        events.append(&mut command_events);
        Ok(events)
    }

    /// A board from another day, or for yesterday's daily seed, is replaced.
    fn roll_over_if_stale(&mut self) -> Result<Vec<GameEngineEvent>> {
        let today = self.today();
        let seed = self.active_seed();
        if self.board.is_current(&seed, self.settings.grid_size, today) {
            return Ok(vec![]);
        }
        info!(target: "game_engine", "Day changed; loading board for {}", seed);
        self.start_session()
    }

    fn log_par(&self, game_id: GameId, raw: &str) {
        if let Some(game) = self.board.game(game_id) {
            let spec = game.scoring_spec();
            let difficulty = self.board.difficulty(game_id);
            debug!(
                target: "scoring",
                "{} ({}): {} raw={:?}",
                game,
                difficulty,
                spec.describe(par_for(&spec, difficulty)),
                raw
            );
        }
    }

    fn after_cell_update(&mut self, update: Option<CellUpdate>) -> Vec<GameEngineEvent> {
        let Some(update) = update else {
            return vec![];
        };
        let mut events = vec![GameEngineEvent::CellUpdated {
            game_id: update.game_id,
            previous: update.previous,
            status: update.status,
            locked: self.board.is_locked(update.game_id),
        }];

        self.line_tracker.observe_change(update.previous, update.status);
        let new_lines = self.line_tracker.newly_completed(
            &self.board.grid,
            &self.board.status_of,
            self.board.grid_size,
        );
        if !new_lines.is_empty() {
            info!(target: "game_engine", "Completed {:?}", new_lines);
            events.push(GameEngineEvent::LinesCompleted(new_lines));
        }

        self.board.last_updated = self.clock.now();
        self.save_board();

        let summary = self.summary();
        let total_score = summary.total_score();
        events.push(GameEngineEvent::ScoreChanged(summary));

        let today = self.today();
        if self
            .stats
            .record_day(self.board.has_progress(), total_score, today)
        {
            log_write_failure("stats", self.stats.save(self.store.as_mut()));
            events.push(GameEngineEvent::StreakChanged(
                self.stats.streak().clone(),
                self.stats.history().clone(),
            ));
        }
        events
    }

    fn reroll(&mut self, game_id: GameId) -> Vec<GameEngineEvent> {
        let today = self.today();
        let Some((old_id, new_id)) = reroll_manager::reroll(
            &mut self.board,
            &self.catalog,
            &mut self.rerolls,
            game_id,
            today,
        ) else {
            return vec![];
        };
        self.board.last_updated = self.clock.now();
        self.save_board();
        self.save_rerolls();
        vec![
            GameEngineEvent::CellRerolled(old_id, new_id),
            GameEngineEvent::BoardChanged(self.board.clone()),
            GameEngineEvent::RerollsChanged(self.rerolls.remaining),
            GameEngineEvent::ScoreChanged(self.summary()),
        ]
    }

    fn change_grid_size(&mut self, grid_size: usize) -> Result<Vec<GameEngineEvent>> {
        let grid_size = validate_grid_size(grid_size)?;
        if grid_size == self.settings.grid_size {
            return Ok(vec![]);
        }
        // Make sure the new size can be generated before committing to it.
        let today = self.today();
        let seed = resolve_seed(&self.settings.seed, today, grid_size);
        generate(&self.catalog, &seed, grid_size)?;

        info!(target: "game_engine", "Grid size {} -> {}", self.settings.grid_size, grid_size);
        self.settings.grid_size = grid_size;
        self.save_settings();
        log_write_failure(
            "board",
            remove_record(self.store.as_mut(), RecordKey::Board(&seed, grid_size)),
        );
        self.start_session()
    }

    fn change_seed(&mut self, requested: &str) -> Result<Vec<GameEngineEvent>> {
        let requested = requested.trim();
        if requested.is_empty() {
            debug!(target: "game_engine", "Ignoring blank seed");
            return Ok(vec![]);
        }
        let today = self.today();
        let grid_size = self.settings.grid_size;
        let seed = resolve_seed(requested, today, grid_size);
        if seed == self.board.seed {
            return Ok(vec![]);
        }

        info!(target: "game_engine", "Seed {} -> {}", self.board.seed, seed);
        self.settings.seed = if is_daily_seed(requested) {
            DAILY_SEED.to_string()
        } else {
            requested.to_string()
        };
        self.save_settings();
        // Reroll records are kept so the daily allowance only goes down.
        log_write_failure(
            "board",
            remove_record(self.store.as_mut(), RecordKey::Board(&seed, grid_size)),
        );
        self.start_session()
    }

    fn reset_progress(&mut self) -> Vec<GameEngineEvent> {
        progress_tracker::reset_all(&mut self.board);
        self.line_tracker.clear();
        self.board.last_updated = self.clock.now();
        self.save_board();
        vec![
            GameEngineEvent::BoardChanged(self.board.clone()),
            GameEngineEvent::ScoreChanged(self.summary()),
        ]
    }

    fn update_timer(&mut self, timer_state: TimerState) -> Vec<GameEngineEvent> {
        self.timer_state = timer_state;
        self.save_timer();
        vec![GameEngineEvent::TimerStateChanged(self.timer_state.clone())]
    }

    fn save_board(&mut self) {
        let key = RecordKey::Board(&self.board.seed, self.board.grid_size);
        log_write_failure("board", save_record(self.store.as_mut(), key, &self.board));
    }

    fn save_rerolls(&mut self) {
        let key = RecordKey::Reroll(&self.rerolls.seed, self.rerolls.grid_size);
        log_write_failure("rerolls", save_record(self.store.as_mut(), key, &self.rerolls));
    }

    fn save_timer(&mut self) {
        let snapshot = self.timer_state.saved(self.now_sys());
        let key = RecordKey::Timer(&self.board.seed, self.board.grid_size);
        log_write_failure("timer", save_record(self.store.as_mut(), key, &snapshot));
    }

    fn save_settings(&mut self) {
        log_write_failure("settings", self.settings.save(self.store.as_mut()));
    }

    fn now_sys(&self) -> SystemTime {
        SystemTime::from(self.clock.now())
    }

    fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The seed today's board is generated from.
    pub fn active_seed(&self) -> String {
        resolve_seed(&self.settings.seed, self.today(), self.settings.grid_size)
    }

    pub fn summary(&self) -> ScoreSummary {
        let lines = find_completed_lines(
            &self.board.grid,
            &self.board.status_of,
            self.board.grid_size,
        );
        ScoreSummary::new(&self.board.statuses(), lines, self.board.grid_size)
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn catalog(&self) -> &[Game] {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn rerolls_remaining(&self) -> u32 {
        self.rerolls.remaining
    }

    pub fn stats(&self) -> &StatsManager {
        &self.stats
    }

    pub fn timer_state(&self) -> &TimerState {
        &self.timer_state
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("settings", &self.settings)
            .field("board", &self.board)
            .field("rerolls", &self.rerolls)
            .finish_non_exhaustive()
    }
}

/// Write failures leave the in-memory session untouched.
fn log_write_failure(what: &str, result: std::io::Result<()>) {
    if let Err(e) = result {
        warn!(target: "storage", "Failed to save {}: {}", what, e);
    }
}
