use chrono::{DateTime, Local, NaiveDate};
use std::time::{Duration, SystemTime};

use serde_with::serde_as;
use serde_with::TimestampMilliSeconds;

/// Elapsed play time for one board. Time while the app is closed is not counted.
#[serde_as]
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub accumulated: Duration,
    #[serde_as(as = "Option<TimestampMilliSeconds<i64>>")]
    pub running_since: Option<SystemTime>,
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub last_saved: SystemTime,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(SystemTime::now())
    }
}

impl TimerState {
    pub fn new(now: SystemTime) -> Self {
        Self {
            accumulated: Duration::from_secs(0),
            running_since: None,
            last_saved: now,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn elapsed(&self, now: SystemTime) -> Duration {
        let running = self
            .running_since
            .map(|since| now.duration_since(since).unwrap_or(Duration::default()))
            .unwrap_or(Duration::default());
        self.accumulated.saturating_add(running)
    }

    pub fn started(&self, now: SystemTime) -> TimerState {
        let mut new_state = self.clone();
        if new_state.running_since.is_none() {
            new_state.running_since = Some(now);
        }
        new_state
    }

    pub fn paused(&self, now: SystemTime) -> TimerState {
        let mut new_state = self.clone();
        if new_state.running_since.take().is_some() {
            new_state.accumulated = self.elapsed(now);
        }
        new_state
    }

    pub fn reset(&self, now: SystemTime) -> TimerState {
        TimerState::new(now)
    }

    /// Snapshot for persistence: folds running time into `accumulated` and keeps
    /// the running flag so the timer restarts on load.
    pub fn saved(&self, now: SystemTime) -> TimerState {
        Self {
            accumulated: self.elapsed(now),
            running_since: self.running_since.map(|_| now),
            last_saved: now,
        }
    }

    /// Rebuild a timer loaded from storage. A timer saved while running resumes
    /// from its stored elapsed time.
    pub fn restored(&self, now: SystemTime) -> TimerState {
        Self {
            accumulated: self.accumulated,
            running_since: self.running_since.map(|_| now),
            last_saved: self.last_saved,
        }
    }

    pub fn saved_day(&self) -> NaiveDate {
        DateTime::<Local>::from(self.last_saved).date_naive()
    }

    /// "mm:ss", or "hh:mm:ss" past the hour.
    pub fn format_elapsed(&self, now: SystemTime) -> String {
        let total_secs = self.elapsed(now).as_secs();
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;

        if hours > 0 {
            format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{:02}:{:02}", minutes, seconds)
        }
    }
}
