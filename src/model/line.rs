use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Row,
    Column,
    Diagonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diagonal {
    /// Top-left to bottom-right, cells `i*n+i`.
    Main,
    /// Top-right to bottom-left, cells `i*n+(n-1-i)`.
    Other,
}

/// A row, column or diagonal of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    Row(usize),
    Column(usize),
    Diagonal(Diagonal),
}

impl Line {
    pub fn line_type(&self) -> LineType {
        match self {
            Line::Row(_) => LineType::Row,
            Line::Column(_) => LineType::Column,
            Line::Diagonal(_) => LineType::Diagonal,
        }
    }

    /// Stable identifier: `row-<i>`, `col-<i>`, `diag-main` or `diag-other`.
    pub fn key(&self) -> String {
        match self {
            Line::Row(row) => format!("row-{}", row),
            Line::Column(col) => format!("col-{}", col),
            Line::Diagonal(Diagonal::Main) => "diag-main".to_string(),
            Line::Diagonal(Diagonal::Other) => "diag-other".to_string(),
        }
    }

    /// Cell indices (row-major) covered by this line on an `n`-wide grid.
    pub fn cell_indices(&self, n: usize) -> Vec<usize> {
        match self {
            Line::Row(row) => (0..n).map(|col| row * n + col).collect(),
            Line::Column(col) => (0..n).map(|row| row * n + col).collect(),
            Line::Diagonal(Diagonal::Main) => (0..n).map(|i| i * n + i).collect(),
            Line::Diagonal(Diagonal::Other) => (0..n).map(|i| i * n + (n - 1 - i)).collect(),
        }
    }

    /// Human readable, one-based label used in the bonus breakdown.
    pub fn label(&self) -> String {
        match self {
            Line::Row(row) => format!("Row {}", row + 1),
            Line::Column(col) => format!("Column {}", col + 1),
            Line::Diagonal(Diagonal::Main) => "Main Diagonal".to_string(),
            Line::Diagonal(Diagonal::Other) => "Anti-Diagonal".to_string(),
        }
    }
}
