use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use uuid::Uuid;

use crate::domain::entity::heart_rate;
use crate::domain::entity::workout::StartRest;

/// The longest rest a timer holds, one day. Longer requests are clamped.
pub const MAX_REST_SECONDS: i64 = 24 * 60 * 60;

/// Clamp a requested number of seconds into `0..=MAX_REST_SECONDS`.
pub fn clamp_rest_seconds(seconds: i64) -> i64 {
    seconds.clamp(0, MAX_REST_SECONDS)
}

/// `instant + delta`, saturating at the representable range of instants.
pub fn offset(instant: DateTime<Utc>, delta: TimeDelta) -> DateTime<Utc> {
    match instant.checked_add_signed(delta) {
        Some(instant) => instant,
        None if delta < TimeDelta::zero() => DateTime::<Utc>::MIN_UTC,
        None => DateTime::<Utc>::MAX_UTC,
    }
}

/// Lifecycle phase of a rest timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestPhase {
    /// Counting down.
    Running,
    /// Suspended by the user, the remaining time is frozen.
    Paused,
    /// The end date has passed and nobody has acknowledged it yet.
    Expired,
    /// Acknowledged, about to be cleared.
    Completed,
}

impl Display for RestPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Running => f.write_str("Running"),
            Self::Paused => f.write_str("Paused"),
            Self::Expired => f.write_str("Expired"),
            Self::Completed => f.write_str("Completed"),
        }
    }
}

impl FromStr for RestPhase {
    type Err = ParseRestPhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Running" => Ok(Self::Running),
            "Paused" => Ok(Self::Paused),
            "Expired" => Ok(Self::Expired),
            "Completed" => Ok(Self::Completed),
            _ => UnknownPhaseSnafu { phase: s }.fail(),
        }
    }
}

/// An error type of parsing a [`RestPhase`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseRestPhaseError {
    #[snafu(display("Unknown rest phase `{phase}`"))]
    UnknownPhase { phase: String },
}

/// One rest interval between two sets.
///
/// The value is replaced as a whole on every transition. `end_date` is the
/// authoritative expiry instant, it is never derived from a tick counter, so a
/// restored snapshot yields the correct remaining time no matter how long the
/// process was gone.
///
/// Indices, durations and the heart rate are signed so that a corrupted
/// snapshot can still be represented and then rejected by
/// [`RestTimerState::is_valid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestTimerState {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub workout_name: String,
    pub exercise_index: i64,
    pub set_index: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_seconds: i64,
    pub phase: RestPhase,
    pub last_update_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_exercise_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_exercise_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_heart_rate: Option<i64>,
    /// The instant the timer was paused at. Only present while paused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused_at: Option<DateTime<Utc>>,
}

impl RestTimerState {
    /// Create a running state for a new rest interval starting at `now`. The
    /// duration is clamped with [`clamp_rest_seconds`].
    pub fn create(request: &StartRest, now: DateTime<Utc>) -> Self {
        let total_seconds = clamp_rest_seconds(request.duration_seconds);
        Self {
            id: Uuid::new_v4(),
            workout_id: request.workout.id,
            workout_name: request.workout.name.clone(),
            exercise_index: i64::from(request.exercise_index),
            set_index: i64::from(request.set_index),
            start_date: now,
            end_date: offset(now, TimeDelta::seconds(total_seconds)),
            total_seconds,
            phase: RestPhase::Running,
            last_update_date: now,
            current_exercise_name: request.current_exercise_name.clone(),
            next_exercise_name: request.next_exercise_name.clone(),
            current_heart_rate: None,
            paused_at: None,
        }
    }

    /// The instant the countdown is measured against. A paused timer is frozen
    /// at the moment it was paused.
    fn reference(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match (self.phase, self.paused_at) {
            (RestPhase::Paused, Some(paused_at)) => paused_at,
            _ => now,
        }
    }

    /// Exact time left until `end_date`, never negative.
    pub fn remaining(&self, now: DateTime<Utc>) -> TimeDelta {
        (self.end_date - self.reference(now)).max(TimeDelta::zero())
    }

    /// Whole seconds left until `end_date`, never negative.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        self.remaining(now).num_seconds()
    }

    /// Fraction of the interval that has elapsed, within `0.0..=1.0`.
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        let now = self.reference(now);
        if now >= self.end_date {
            return 1.0;
        }

        let span = (self.end_date - self.start_date).num_milliseconds();
        if span <= 0 {
            return 1.0;
        }

        let elapsed = (now - self.start_date).num_milliseconds();
        (elapsed as f64 / span as f64).clamp(0.0, 1.0)
    }

    /// Returns `true` if the timer is running or paused.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, RestPhase::Running | RestPhase::Paused)
    }

    /// Returns `true` if `end_date` has passed and the timer was not
    /// acknowledged yet.
    pub fn has_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_date && self.phase != RestPhase::Completed
    }

    /// Time since the last mutation.
    pub fn age(&self, now: DateTime<Utc>) -> TimeDelta {
        now - self.last_update_date
    }

    /// Check that the state is self-consistent. A paused state must carry the
    /// instant it was paused at, and that instant lies within the interval.
    pub fn is_valid(&self) -> bool {
        let paused = match (self.phase, self.paused_at) {
            (RestPhase::Paused, Some(paused_at)) => {
                self.start_date <= paused_at && paused_at <= self.end_date
            }
            (RestPhase::Paused, None) => false,
            (_, paused_at) => paused_at.is_none(),
        };

        paused
            && (0..=MAX_REST_SECONDS).contains(&self.total_seconds)
            && self.end_date >= self.start_date
            && self.exercise_index >= 0
            && self.set_index >= 0
            && self.current_heart_rate.map_or(true, heart_rate::is_plausible)
    }

    /// A one-line summary for logs.
    pub fn summary(&self, now: DateTime<Utc>) -> String {
        format!(
            "{} '{}' exercise {} set {}: {} {}s/{}s ({:.1}%)",
            &self.id.simple().to_string()[..8],
            self.workout_name,
            self.exercise_index,
            self.set_index,
            self.phase,
            self.remaining_seconds(now),
            self.total_seconds,
            self.progress(now) * 100.0,
        )
    }
}
