use uuid::Uuid;

use crate::domain::entity::RestPreset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch and initialize a daemon process
    Init,
    /// Start a rest interval, replacing the current one
    Start(StartArguments),
    /// Pause the timer
    Pause,
    /// Resume the timer
    Resume,
    /// Drop the timer
    Cancel,
    /// Acknowledge an expired timer
    Acknowledge,
    /// Record a heart rate sample
    HeartRate { bpm: i64 },
    /// Add time to the timer, by the configured step if not given
    Add { seconds: Option<i64> },
    /// Take time from the timer, by the configured step if not given
    Subtract { seconds: Option<i64> },
    /// Set the remaining time, and optionally the total
    Set { seconds: i64, total: Option<i64> },
    /// Query the timer's status. Show all information if no flag is specified.
    Query(QueryArguments),
}

/// How the duration of a new rest interval is chosen. The first given source
/// wins: an explicit duration, a preset, a recommendation from the set just
/// finished, then the configured default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StartArguments {
    pub workout: String,
    pub workout_id: Option<Uuid>,
    pub exercise: Option<String>,
    pub next_exercise: Option<String>,
    pub exercise_index: u32,
    /// One-based number of the set just finished
    pub set: u32,
    pub duration: Option<i64>,
    pub preset: Option<RestPreset>,
    pub reps: Option<u32>,
    pub compound: bool,
}

impl StartArguments {
    /// Pick the rest duration in seconds.
    pub fn duration_seconds(&self, default_rest: i64) -> i64 {
        if let Some(duration) = self.duration {
            duration
        } else if let Some(preset) = self.preset {
            preset.seconds()
        } else if let Some(reps) = self.reps {
            RestPreset::recommended(reps, self.compound).seconds()
        } else {
            default_rest
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryArguments {
    /// Show the timer's phase
    pub phase: bool,
    /// Show the remaining time
    pub remaining: bool,
    /// Show the total time
    pub total: bool,
    /// Show the elapsed share of the interval
    pub progress: bool,
    /// Show the latest heart rate
    pub heart_rate: bool,
}

impl QueryArguments {
    fn all(&self) -> bool {
        !self.phase && !self.remaining && !self.total && !self.progress && !self.heart_rate
    }

    pub(crate) fn wants_phase(&self) -> bool {
        self.all() || self.phase
    }

    pub(crate) fn wants_remaining(&self) -> bool {
        self.all() || self.remaining
    }

    pub(crate) fn wants_total(&self) -> bool {
        self.all() || self.total
    }

    pub(crate) fn wants_progress(&self) -> bool {
        self.all() || self.progress
    }

    pub(crate) fn wants_heart_rate(&self) -> bool {
        self.all() || self.heart_rate
    }

    /// Whether the workout coordinates are shown.
    pub(crate) fn wants_context(&self) -> bool {
        self.all()
    }
}
