use super::{Line, PerformanceTier};
use itertools::Itertools;

/// Aggregate score display for one board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoreSummary {
    pub flawless: usize,
    pub below_par: usize,
    pub above_par: usize,
    pub incomplete: usize,
    pub base_score: i64,
    pub bonus_points: i64,
    pub completed_lines: Vec<Line>,
}

impl ScoreSummary {
    pub fn new(statuses: &[PerformanceTier], completed_lines: Vec<Line>, grid_size: usize) -> Self {
        let counts = statuses.iter().counts();
        let count = |tier: PerformanceTier| counts.get(&tier).copied().unwrap_or(0);

        Self {
            flawless: count(PerformanceTier::Flawless),
            below_par: count(PerformanceTier::BelowPar),
            above_par: count(PerformanceTier::AbovePar),
            incomplete: count(PerformanceTier::Incomplete),
            base_score: statuses.iter().map(|status| status.score_value()).sum(),
            bonus_points: (grid_size * completed_lines.len()) as i64,
            completed_lines,
        }
    }

    pub fn total_score(&self) -> i64 {
        self.base_score + self.bonus_points
    }

    pub fn completed_count(&self) -> usize {
        self.flawless + self.below_par + self.above_par
    }
}

impl std::fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Flawless: {}  Below par: {}  Above par: {}  Incomplete: {}",
            self.flawless, self.below_par, self.above_par, self.incomplete
        )?;
        if !self.completed_lines.is_empty() {
            let per_line = self.bonus_points / self.completed_lines.len() as i64;
            let lines = self
                .completed_lines
                .iter()
                .map(|line| format!("{}: +{}", line.label(), per_line))
                .join(", ");
            writeln!(f, "Bonus lines: {}", lines)?;
        }
        write!(
            f,
            "Base: {}  Bonus: {}  Total: {}",
            self.base_score,
            self.bonus_points,
            self.total_score()
        )
    }
}
