use uuid::Uuid;

/// A snapshot of the workout a rest interval belongs to. Only the identity and
/// the display name are kept; the workout itself lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutRef {
    pub id: Uuid,
    pub name: String,
}

impl WorkoutRef {
    /// Creates a new [`WorkoutRef`].
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Everything needed to start one rest interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRest {
    pub workout: WorkoutRef,
    pub exercise_index: u32,
    pub set_index: u32,
    /// Requested duration. Negative values are treated as zero.
    pub duration_seconds: i64,
    pub current_exercise_name: Option<String>,
    pub next_exercise_name: Option<String>,
}

impl StartRest {
    /// Creates a [`StartRest`] without exercise names.
    pub fn new(workout: WorkoutRef, exercise_index: u32, set_index: u32, duration: i64) -> Self {
        Self {
            workout,
            exercise_index,
            set_index,
            duration_seconds: duration,
            current_exercise_name: None,
            next_exercise_name: None,
        }
    }

    /// Attach the names of the current and the upcoming exercise.
    pub fn with_exercises(mut self, current: Option<String>, next: Option<String>) -> Self {
        self.current_exercise_name = current;
        self.next_exercise_name = next;
        self
    }
}
