use std::fmt::{Display, Formatter, Result as FmtResult};

/// Common rest durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RestPreset {
    Short,
    Medium,
    Standard,
    Long,
    Extended,
}

impl RestPreset {
    /// All presets from the shortest to the longest.
    pub const ALL: [RestPreset; 5] = [
        Self::Short,
        Self::Medium,
        Self::Standard,
        Self::Long,
        Self::Extended,
    ];

    /// Duration of this preset in seconds.
    pub fn seconds(self) -> i64 {
        match self {
            Self::Short => 30,
            Self::Medium => 60,
            Self::Standard => 90,
            Self::Long => 120,
            Self::Extended => 180,
        }
    }

    /// Human readable duration, e.g. `1:30 min`.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Short => "30 sec",
            Self::Medium => "1 min",
            Self::Standard => "1:30 min",
            Self::Long => "2 min",
            Self::Extended => "3 min",
        }
    }

    /// Recommend a rest duration for a finished set.
    ///
    /// Heavy low-rep compound work gets the longest rest, high-rep endurance
    /// work the shortest.
    pub fn recommended(reps: u32, is_compound: bool) -> Self {
        match reps {
            0..=5 if is_compound => Self::Extended,
            0..=8 if is_compound => Self::Long,
            0..=12 => Self::Standard,
            _ => Self::Medium,
        }
    }
}

impl Display for RestPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.display_name())
    }
}

/// Render a number of seconds as `m:ss`. Negative values render as `0:00`.
pub fn format_clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
