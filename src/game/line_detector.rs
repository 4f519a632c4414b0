use std::collections::{HashMap, HashSet};

use crate::model::{Diagonal, Game, GameId, Line, PerformanceTier};

/// A line is complete when it has at least one cell and every cell present
/// has a completed status. Indices past the end of the grid are skipped.
fn is_line_complete(
    grid: &[Game],
    status_of: &HashMap<GameId, PerformanceTier>,
    indices: &[usize],
) -> bool {
    let mut present = indices.iter().filter_map(|&index| grid.get(index)).peekable();
    if present.peek().is_none() {
        return false;
    }
    present.all(|game| {
        status_of
            .get(&game.id)
            .map(|status| status.is_completed())
            .unwrap_or(false)
    })
}

/// Every completed row, column and diagonal of a `grid_size`-wide grid.
///
/// The row count is derived from the grid length, and diagonals are only
/// considered when the grid is actually square.
pub fn find_completed_lines(
    grid: &[Game],
    status_of: &HashMap<GameId, PerformanceTier>,
    grid_size: usize,
) -> Vec<Line> {
    if grid_size == 0 || grid.is_empty() {
        return vec![];
    }
    let n_rows = grid.len().div_ceil(grid_size);
    let mut lines = vec![];

    for row in 0..n_rows {
        let indices: Vec<usize> = (0..grid_size).map(|col| row * grid_size + col).collect();
        if is_line_complete(grid, status_of, &indices) {
            lines.push(Line::Row(row));
        }
    }

    for col in 0..grid_size {
        let indices: Vec<usize> = (0..n_rows).map(|row| row * grid_size + col).collect();
        if is_line_complete(grid, status_of, &indices) {
            lines.push(Line::Column(col));
        }
    }

    if n_rows == grid_size && grid.len() == grid_size * grid_size {
        for diagonal in [Diagonal::Main, Diagonal::Other] {
            let line = Line::Diagonal(diagonal);
            if is_line_complete(grid, status_of, &line.cell_indices(grid_size)) {
                lines.push(line);
            }
        }
    }

    lines
}

/// Each completed line is worth `grid_size` points.
pub fn bonus_points(completed_lines: &[Line], grid_size: usize) -> i64 {
    (completed_lines.len() * grid_size) as i64
}

/// Remembers which completed lines were already announced so that repeated
/// detection does not fire them again. Transient; never persisted.
#[derive(Debug, Default, Clone)]
pub struct LineTracker {
    announced: HashSet<String>,
}

impl LineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.announced.clear();
    }

    pub fn is_announced(&self, line: &Line) -> bool {
        self.announced.contains(&line.key())
    }

    /// Forget announcements after a rank improvement so completions can fire again.
    pub fn observe_change(&mut self, previous: PerformanceTier, status: PerformanceTier) {
        if status.is_improvement_over(previous) {
            self.clear();
        }
    }

    /// Completed lines not announced yet; they are marked as announced.
    pub fn newly_completed(
        &mut self,
        grid: &[Game],
        status_of: &HashMap<GameId, PerformanceTier>,
        grid_size: usize,
    ) -> Vec<Line> {
        let fresh: Vec<Line> = find_completed_lines(grid, status_of, grid_size)
            .into_iter()
            .filter(|line| !self.is_announced(line))
            .collect();
        for line in &fresh {
            self.announced.insert(line.key());
        }
        fresh
    }
}
