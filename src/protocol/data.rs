use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A [`Protocol`] represents the underlying data type used by
/// the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Protocol {
    Request(Request),
    Response(Response),
}

/// A [`Request`] represents requests from a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum Request {
    Start {
        workout_id: Uuid,
        workout: String,
        exercise_index: u32,
        set_index: u32,
        duration: i64,
        #[serde(default)]
        exercise: Option<String>,
        #[serde(default)]
        next_exercise: Option<String>,
    },
    Pause,
    Resume,
    Cancel,
    Acknowledge,
    HeartRate {
        bpm: i64,
    },
    Adjust {
        delta: i64,
    },
    SetRemaining {
        seconds: i64,
        #[serde(default)]
        total: Option<i64>,
    },
    Query,
}

/// A [`Response`] represents a daemon's reply. A request is answered with
/// the timer as it is after the request was applied, or with a failure when
/// the daemon can no longer drive the timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum Response {
    Timer { timer: Option<TimerView> },
    Failure { reason: String },
}

/// The wire form of a rest timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    pub id: Uuid,
    pub workout: String,
    pub exercise: Option<String>,
    pub next_exercise: Option<String>,
    pub set: i64,
    pub phase: String,
    pub total: i64,
    pub remaining: i64,
    pub progress: u8,
    pub heart_rate: Option<i64>,
}
