use thiserror::Error;

use crate::model::GameId;

#[derive(Debug, Error)]
pub enum BingleError {
    #[error("Catalog too small for a {grid_size}x{grid_size} grid: need {required} games, have {available}")]
    CatalogTooSmall {
        grid_size: usize,
        required: usize,
        available: usize,
    },

    #[error("Catalog lists game id {0} more than once")]
    DuplicateGameId(GameId),

    #[error("Unsupported grid size: {0} (expected 3, 4 or 5)")]
    UnsupportedGridSize(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BingleError>;

impl BingleError {
    /// Configuration problems are fatal at startup; everything else is recoverable.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            BingleError::CatalogTooSmall { .. }
                | BingleError::DuplicateGameId(_)
                | BingleError::UnsupportedGridSize(_)
        )
    }
}
