use serde::{Deserialize, Serialize};

/// How well a cell's score compares to its par.
///
/// Variants are declared in rank order, so the derived `Ord` matches the
/// improvement ranking: unattempted < incomplete < abovePar < belowPar < flawless.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[serde(rename_all = "camelCase")]
pub enum PerformanceTier {
    #[default]
    Unattempted,
    Incomplete,
    AbovePar,
    BelowPar,
    Flawless,
}

impl PerformanceTier {
    pub fn rank(&self) -> u8 {
        match self {
            PerformanceTier::Unattempted => 0,
            PerformanceTier::Incomplete => 1,
            PerformanceTier::AbovePar => 2,
            PerformanceTier::BelowPar => 3,
            PerformanceTier::Flawless => 4,
        }
    }

    /// Points contributed to the base score.
    pub fn score_value(&self) -> i64 {
        match self {
            PerformanceTier::Flawless => 3,
            PerformanceTier::BelowPar => 2,
            PerformanceTier::AbovePar => 1,
            PerformanceTier::Incomplete => -1,
            PerformanceTier::Unattempted => 0,
        }
    }

    /// A cell counts towards a line only when it was actually completed.
    pub fn is_completed(&self) -> bool {
        matches!(
            self,
            PerformanceTier::AbovePar | PerformanceTier::BelowPar | PerformanceTier::Flawless
        )
    }

    pub fn is_improvement_over(&self, previous: PerformanceTier) -> bool {
        self.rank() > previous.rank()
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceTier::Unattempted => "Unattempted",
            PerformanceTier::Incomplete => "Incomplete",
            PerformanceTier::AbovePar => "Above Par",
            PerformanceTier::BelowPar => "Below Par",
            PerformanceTier::Flawless => "Flawless",
        }
    }
}
