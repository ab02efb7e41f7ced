use snafu::prelude::*;

use crate::domain::entity::state::RestTimerState;

/// Template of the desktop notification shown when a rest interval expires.
///
/// Both parts may contain the placeholders `{workout}`, `{exercise}`,
/// `{next}`, `{set}` and `{total}`, which are filled from the expired state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    summary: String,
    body: Option<String>,
}

impl NotificationMessage {
    /// Try to create a [`NotificationMessage`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the summary is blank.
    pub fn try_new(
        summary: String,
        body: Option<String>,
    ) -> Result<Self, TryNewNotificationMessageError> {
        ensure!(!summary.trim().is_empty(), EmptySummarySnafu);
        Ok(Self { summary, body })
    }

    /// Returns the summary template of this [`NotificationMessage`].
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the body template of this [`NotificationMessage`].
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Fill the placeholders with values taken from `state`.
    pub fn render(&self, state: &RestTimerState) -> (String, Option<String>) {
        let fill = |template: &str| {
            template
                .replace("{workout}", &state.workout_name)
                .replace(
                    "{exercise}",
                    state.current_exercise_name.as_deref().unwrap_or("-"),
                )
                .replace("{next}", state.next_exercise_name.as_deref().unwrap_or("-"))
                .replace("{set}", &(state.set_index + 1).to_string())
                .replace("{total}", &state.total_seconds.to_string())
        };
        (fill(&self.summary), self.body.as_deref().map(fill))
    }
}

/// An error type of creating a [`NotificationMessage`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewNotificationMessageError {
    #[snafu(display("Summary of a notification must be non-empty."))]
    #[non_exhaustive]
    EmptySummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use uuid::Uuid;

    use crate::domain::entity::{StartRest, WorkoutRef};

    #[test]
    fn notification_message_try_new() {
        let msg = NotificationMessage::try_new("summary".into(), Some("body".into())).unwrap();
        assert_eq!(msg.summary(), "summary");
        assert_eq!(msg.body(), Some("body"));
        assert_eq!(
            NotificationMessage::try_new("  ".into(), Some("whatever".into())),
            Err(TryNewNotificationMessageError::EmptySummary)
        );
    }

    #[test]
    fn notification_message_render() {
        let request = StartRest::new(WorkoutRef::new(Uuid::new_v4(), "Pull Day"), 0, 2, 90)
            .with_exercises(Some("Row".to_owned()), None);
        let state = RestTimerState::create(&request, Utc::now());

        let msg = NotificationMessage::try_new(
            "{workout}: rest over".into(),
            Some("{exercise} set {set} after {total}s, next {next}".into()),
        )
        .unwrap();

        let (summary, body) = msg.render(&state);
        assert_eq!(summary, "Pull Day: rest over");
        assert_eq!(body.as_deref(), Some("Row set 3 after 90s, next -"));
    }
}
