use chrono::{Datelike, NaiveDate};
use log::{debug, info};

use super::seeded_random::{LinearCongruential, RandomSource};
use crate::model::{BoardState, Game, GameId, PerformanceTier, RerollState};

const GAME_ID_SEED_FACTOR: u64 = 7919;

/// One-shot seed for replacing `game_id` on `today`.
pub fn reroll_seed(today: NaiveDate, game_id: GameId) -> u64 {
    today.year() as u64 * 10000
        + today.month() as u64 * 100
        + today.day() as u64
        + game_id as u64 * GAME_ID_SEED_FACTOR
}

/// Bring a persisted allowance up to date for the active (seed, size) and day.
///
/// A missing record, a record for another pair, or one stamped on another day
/// all yield a fresh allowance at the size cap.
pub fn check_and_reset(
    stored: Option<RerollState>,
    seed: &str,
    grid_size: usize,
    today: NaiveDate,
) -> RerollState {
    match stored {
        Some(state) if state.matches(seed, grid_size) && state.last_reset_date == today => state,
        Some(state) => {
            info!(
                target: "reroll",
                "Resetting rerolls for {}:{} (stored {}:{} on {})",
                seed, grid_size, state.seed, state.grid_size, state.last_reset_date
            );
            RerollState::fresh(seed, grid_size, today)
        }
        None => RerollState::fresh(seed, grid_size, today),
    }
}

/// Catalog entries not on the grid, in catalog order.
pub fn candidate_pool<'a>(board: &BoardState, catalog: &'a [Game]) -> Vec<&'a Game> {
    catalog
        .iter()
        .filter(|game| !board.contains(game.id))
        .collect()
}

/// Swap the cell holding `game_id` for a catalog game not yet on the grid.
///
/// The replacement keeps the old cell's difficulty and starts unattempted.
/// Returns the (old, new) ids, or `None` when nothing changed: no rerolls
/// left, no candidates, or the game is not on the grid.
pub fn reroll(
    board: &mut BoardState,
    catalog: &[Game],
    rerolls: &mut RerollState,
    game_id: GameId,
    today: NaiveDate,
) -> Option<(GameId, GameId)> {
    if rerolls.remaining == 0 {
        debug!(target: "reroll", "No rerolls left for {}:{}", rerolls.seed, rerolls.grid_size);
        return None;
    }
    let Some(position) = board.position_of(game_id) else {
        debug!(target: "reroll", "Game {} is not on the grid", game_id);
        return None;
    };
    let pool = candidate_pool(board, catalog);
    if pool.is_empty() {
        debug!(target: "reroll", "No candidate games outside the grid");
        return None;
    }

    let mut rng = LinearCongruential::new(reroll_seed(today, game_id));
    let replacement = pool[rng.next_index(pool.len())].clone();
    let new_id = replacement.id;
    let difficulty = board.difficulty(game_id);

    board.grid[position] = replacement;
    board.difficulty_of.remove(&game_id);
    board.score_of.remove(&game_id);
    board.status_of.remove(&game_id);
    board.difficulty_of.insert(new_id, difficulty);
    board.score_of.insert(new_id, None);
    board.status_of.insert(new_id, PerformanceTier::Unattempted);

    rerolls.remaining -= 1;
    rerolls.last_reset_date = today;
    info!(
        target: "reroll",
        "Rerolled {} -> {} ({} left)", game_id, new_id, rerolls.remaining
    );
    Some((game_id, new_id))
}
