use crate::helpers::Capitalize;
use serde::{Deserialize, Serialize};

/// What a game's raw score counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    Guesses,
    Points,
    Mistakes,
    Hints,
    /// Anything not recognised. Kept verbatim for diagnostics.
    Other(String),
}

impl MetricKind {
    pub fn from_word(word: &str) -> MetricKind {
        match word {
            "guesses" => MetricKind::Guesses,
            "points" => MetricKind::Points,
            "mistakes" => MetricKind::Mistakes,
            "hints" => MetricKind::Hints,
            other => MetricKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MetricKind::Guesses => "guesses",
            MetricKind::Points => "points",
            MetricKind::Mistakes => "mistakes",
            MetricKind::Hints => "hints",
            MetricKind::Other(word) => word,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, MetricKind::Other(_))
    }

    /// Placeholder for the score entry field. Unknown kinds fall back to "Hints",
    /// the last entry of the recognised list.
    pub fn input_placeholder(&self) -> &'static str {
        match self {
            MetricKind::Points => "Points",
            MetricKind::Guesses => "Guesses",
            MetricKind::Mistakes => "Mistakes",
            MetricKind::Hints | MetricKind::Other(_) => "Hints",
        }
    }
}

/// A parsed scoring spec string such as `"guesses6"` or `"points75000"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoringSpec {
    pub kind: MetricKind,
    pub max: i64,
}

impl ScoringSpec {
    /// Digits are stripped to get the kind and everything else is stripped to
    /// get the maximum. A missing or unparseable maximum becomes 0.
    pub fn parse(spec: &str) -> Self {
        let word: String = spec.chars().filter(|c| !c.is_ascii_digit()).collect();
        let digits: String = spec.chars().filter(|c| c.is_ascii_digit()).collect();
        let max = digits.parse::<i64>().unwrap_or(0);

        Self {
            kind: MetricKind::from_word(&word),
            max,
        }
    }

    /// Cell caption, e.g. "Guesses (Par: 3, Max: 6)".
    pub fn describe(&self, par: i64) -> String {
        if self.kind.is_recognized() {
            format!(
                "{} (Par: {}, Max: {})",
                self.kind.as_str().capitalize(),
                par,
                self.max
            )
        } else {
            "Score".to_string()
        }
    }
}

impl std::fmt::Display for ScoringSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.as_str(), self.max)
    }
}
