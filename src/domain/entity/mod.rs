pub mod heart_rate;
pub mod notification;
pub mod preset;
pub mod state;
pub mod workout;

pub use heart_rate::HeartRate;
pub use notification::NotificationMessage;
pub use preset::{format_clock, RestPreset};
pub use state::{ParseRestPhaseError, RestPhase, RestTimerState};
pub use workout::{StartRest, WorkoutRef};
