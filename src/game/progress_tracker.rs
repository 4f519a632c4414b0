use log::{debug, trace};

use super::scoring_rules::evaluate_spec;
use crate::model::{BoardState, GameId, PerformanceTier, FAILED_SCORE};

/// Result of one cell transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub game_id: GameId,
    pub previous: PerformanceTier,
    pub status: PerformanceTier,
}

impl CellUpdate {
    pub fn is_improvement(&self) -> bool {
        self.status.is_improvement_over(self.previous)
    }
}

/// Score field text to a raw score.
///
/// Reads an optional sign and the leading run of digits, ignoring whatever
/// follows, so `"3.5"` is 3 and `"12abc"` is 12. Oversized values saturate.
/// Input without leading digits is no score.
pub fn parse_score(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits: Vec<i64> = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|b| (b - b'0') as i64)
        .collect();
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.iter().fold(0i64, |acc, &digit| {
        acc.saturating_mul(10).saturating_add(digit)
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Record a typed score and re-evaluate the cell.
///
/// Returns `None` without touching the board when the game is not on the grid
/// or the cell is locked by [`mark_failed`].
pub fn set_score(board: &mut BoardState, game_id: GameId, raw: &str) -> Option<CellUpdate> {
    let game = board.game(game_id)?.clone();
    if board.is_locked(game_id) {
        debug!(target: "progress", "Ignoring score for failed cell {}", game_id);
        return None;
    }

    let previous = board.status(game_id);
    let score = parse_score(raw);
    let status = match score {
        None => PerformanceTier::Unattempted,
        Some(_) => evaluate_spec(&game.scoring_spec(), board.difficulty(game_id), score),
    };
    trace!(target: "progress", "{}: score {:?} -> {:?}", game, score, status);

    board.score_of.insert(game_id, score);
    board.status_of.insert(game_id, status);
    Some(CellUpdate {
        game_id,
        previous,
        status,
    })
}

/// Force a cell to incomplete and lock numeric entry until [`reset_cell`].
pub fn mark_failed(board: &mut BoardState, game_id: GameId) -> Option<CellUpdate> {
    if !board.contains(game_id) {
        return None;
    }
    let previous = board.status(game_id);
    board.score_of.insert(game_id, Some(FAILED_SCORE));
    board.status_of.insert(game_id, PerformanceTier::Incomplete);
    Some(CellUpdate {
        game_id,
        previous,
        status: PerformanceTier::Incomplete,
    })
}

/// Clear a cell back to unattempted and unlock it.
pub fn reset_cell(board: &mut BoardState, game_id: GameId) -> Option<CellUpdate> {
    if !board.contains(game_id) {
        return None;
    }
    let previous = board.status(game_id);
    board.score_of.insert(game_id, None);
    board.status_of.insert(game_id, PerformanceTier::Unattempted);
    Some(CellUpdate {
        game_id,
        previous,
        status: PerformanceTier::Unattempted,
    })
}

/// Clear every cell on the board, keeping the grid and its difficulties.
pub fn reset_all(board: &mut BoardState) {
    let ids: Vec<GameId> = board.grid.iter().map(|game| game.id).collect();
    for game_id in ids {
        board.score_of.insert(game_id, None);
        board.status_of.insert(game_id, PerformanceTier::Unattempted);
    }
}
