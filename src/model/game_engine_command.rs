use super::GameId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEngineCommand {
    /// Raw text from the score field; empty or non-numeric clears the cell.
    SetScore(GameId, String),
    MarkFailed(GameId),
    ResetCell(GameId),
    Reroll(GameId),
    ChangeGridSize(usize),
    ChangeSeed(String),
    ResetProgress,
    StartTimer,
    PauseTimer,
    ResetTimer,
    /// Re-check the day boundary; a stale board is regenerated.
    Refresh,
}
