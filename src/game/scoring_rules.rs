use log::warn;

use crate::model::{Difficulty, MetricKind, PerformanceTier, ScoringSpec, FAILED_SCORE};

/// Fraction of the maximum that sets par, per (kind, difficulty).
fn par_fraction(kind: &MetricKind, difficulty: Difficulty) -> Option<f64> {
    let fraction = match (kind, difficulty) {
        (MetricKind::Guesses, Difficulty::Hard) => 0.5,
        (MetricKind::Guesses, Difficulty::Medium) => 0.75,
        (MetricKind::Guesses, Difficulty::Easy) => 0.9,
        (MetricKind::Points, Difficulty::Hard) => 0.75,
        (MetricKind::Points, Difficulty::Medium) => 0.5,
        (MetricKind::Points, Difficulty::Easy) => 0.25,
        (MetricKind::Mistakes, Difficulty::Hard) => 0.25,
        (MetricKind::Mistakes, Difficulty::Medium) => 0.5,
        (MetricKind::Mistakes, Difficulty::Easy) => 0.75,
        (MetricKind::Hints, Difficulty::Hard) => 0.3,
        (MetricKind::Hints, Difficulty::Medium) => 0.6,
        (MetricKind::Hints, Difficulty::Easy) => 0.9,
        (MetricKind::Other(_), _) => return None,
    };
    Some(fraction)
}

/// Par threshold for a game at a difficulty. Points round down, every other
/// kind rounds up. Unknown kinds ignore difficulty and use half the maximum.
///
/// The products are taken in `f64` on purpose: `3 * 0.3` is slightly below
/// 0.9 and must still round up to 1.
pub fn par_value(kind: &MetricKind, max: i64, difficulty: Difficulty) -> i64 {
    let max_f = max as f64;
    match par_fraction(kind, difficulty) {
        Some(fraction) if *kind == MetricKind::Points => (max_f * fraction).floor() as i64,
        Some(fraction) => (max_f * fraction).ceil() as i64,
        None => (max_f / 2.0).ceil() as i64,
    }
}

pub fn par_for(spec: &ScoringSpec, difficulty: Difficulty) -> i64 {
    par_value(&spec.kind, spec.max, difficulty)
}

/// Classify a raw score against par and maximum.
pub fn evaluate(kind: &MetricKind, max: i64, par: i64, score: Option<i64>) -> PerformanceTier {
    let score = match score {
        None => return PerformanceTier::Unattempted,
        Some(FAILED_SCORE) => return PerformanceTier::Incomplete,
        Some(score) => score,
    };

    match kind {
        // fewer is better, a single guess is perfect
        MetricKind::Guesses => {
            if score <= 1 {
                PerformanceTier::Flawless
            } else if score <= par {
                PerformanceTier::BelowPar
            } else if score <= max {
                PerformanceTier::AbovePar
            } else {
                PerformanceTier::Incomplete
            }
        }
        MetricKind::Points => {
            if score >= max {
                PerformanceTier::Flawless
            } else if score >= par {
                PerformanceTier::BelowPar
            } else if score > 0 {
                PerformanceTier::AbovePar
            } else {
                PerformanceTier::Incomplete
            }
        }
        MetricKind::Mistakes | MetricKind::Hints => {
            if score == 0 {
                PerformanceTier::Flawless
            } else if score <= par {
                PerformanceTier::BelowPar
            } else if score < max {
                PerformanceTier::AbovePar
            } else {
                PerformanceTier::Incomplete
            }
        }
        MetricKind::Other(word) => {
            warn!(target: "scoring", "Unrecognized scoring kind {:?}; treating score as incomplete", word);
            PerformanceTier::Incomplete
        }
    }
}

/// Look up par for a scoring spec at a difficulty and evaluate in one step.
pub fn evaluate_spec(spec: &ScoringSpec, difficulty: Difficulty, score: Option<i64>) -> PerformanceTier {
    evaluate(&spec.kind, spec.max, par_for(spec, difficulty), score)
}
