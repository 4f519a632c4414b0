use super::{
    BoardState, GameId, Line, PerformanceTier, ScoreHistory, ScoreSummary, StreakState,
    TimerState,
};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEngineEvent {
    /// A new grid was generated, restored, or had a cell replaced.
    BoardChanged(BoardState),
    CellUpdated {
        game_id: GameId,
        previous: PerformanceTier,
        status: PerformanceTier,
        locked: bool,
    },
    /// Lines that became complete since they were last reported.
    LinesCompleted(Vec<Line>),
    ScoreChanged(ScoreSummary),
    RerollsChanged(u32),
    /// Replaced cell: (old game, new game).
    CellRerolled(GameId, GameId),
    StreakChanged(StreakState, ScoreHistory),
    TimerStateChanged(TimerState),
}
