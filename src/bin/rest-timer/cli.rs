use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rest_timer::client::app::{Command as ClientCommand, QueryArguments, StartArguments};
use rest_timer::domain::entity::RestPreset;
use tracing::Level;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// Path to a custom configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch and initialize a daemon process
    Init {
        /// Path to the daemon executable
        #[arg(short, long)]
        executable: Option<PathBuf>,
        /// Maximum logging level the daemon should use
        #[arg(short, long, default_value_t = Level::INFO)]
        verbosity: Level,
    },
    /// Start a rest interval, replacing the current one
    Start(Start),
    /// Pause the timer
    Pause,
    /// Resume the timer
    Resume,
    /// Drop the timer
    Cancel,
    /// Acknowledge an expired timer
    #[command(alias = "acknowledge")]
    Ack,
    /// Record a heart rate sample in beats per minute
    HeartRate { bpm: i64 },
    /// Add time to the timer
    Add {
        /// Seconds to add, the configured step by default
        seconds: Option<i64>,
    },
    /// Take time from the timer
    Subtract {
        /// Seconds to take, the configured step by default
        seconds: Option<i64>,
    },
    /// Set the remaining time of the timer
    Set {
        /// Remaining seconds
        seconds: i64,
        /// New total seconds
        #[arg(short, long)]
        total: Option<i64>,
    },
    /// Query the timer's status. Show all information if no flag is specified.
    Query {
        /// Show the timer's phase
        #[arg(short, long)]
        phase: bool,
        /// Show the remaining time
        #[arg(short, long)]
        remaining: bool,
        /// Show the total time
        #[arg(short, long)]
        total: bool,
        /// Show the elapsed share of the interval
        #[arg(short = 'P', long)]
        progress: bool,
        /// Show the latest heart rate
        #[arg(short = 'b', long)]
        heart_rate: bool,
    },
}

#[derive(Debug, Args)]
pub struct Start {
    /// Name of the workout
    pub workout: String,
    /// Identifier of the workout, a random one by default
    #[arg(long)]
    pub workout_id: Option<Uuid>,
    /// Name of the exercise just finished
    #[arg(short, long)]
    pub exercise: Option<String>,
    /// Name of the upcoming exercise
    #[arg(short, long)]
    pub next: Option<String>,
    /// Position of the exercise in the workout, from zero
    #[arg(long, default_value_t = 0)]
    pub exercise_index: u32,
    /// Number of the set just finished, from one
    #[arg(short, long, default_value_t = 1)]
    pub set: u32,
    /// Rest duration in seconds
    #[arg(short, long, conflicts_with = "preset")]
    pub duration: Option<i64>,
    /// Rest duration preset
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,
    /// Repetitions of the set just finished, used to recommend a duration
    #[arg(short, long)]
    pub reps: Option<u32>,
    /// Whether the exercise is a compound lift
    #[arg(long)]
    pub compound: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Short,
    Medium,
    Standard,
    Long,
    Extended,
}

impl From<Preset> for RestPreset {
    fn from(value: Preset) -> Self {
        match value {
            Preset::Short => Self::Short,
            Preset::Medium => Self::Medium,
            Preset::Standard => Self::Standard,
            Preset::Long => Self::Long,
            Preset::Extended => Self::Extended,
        }
    }
}

impl From<Command> for ClientCommand {
    fn from(value: Command) -> Self {
        match value {
            Command::Init { .. } => Self::Init,
            Command::Start(start) => Self::Start(StartArguments {
                workout: start.workout,
                workout_id: start.workout_id,
                exercise: start.exercise,
                next_exercise: start.next,
                exercise_index: start.exercise_index,
                set: start.set,
                duration: start.duration,
                preset: start.preset.map(Into::into),
                reps: start.reps,
                compound: start.compound,
            }),
            Command::Pause => Self::Pause,
            Command::Resume => Self::Resume,
            Command::Cancel => Self::Cancel,
            Command::Ack => Self::Acknowledge,
            Command::HeartRate { bpm } => Self::HeartRate { bpm },
            Command::Add { seconds } => Self::Add { seconds },
            Command::Subtract { seconds } => Self::Subtract { seconds },
            Command::Set { seconds, total } => Self::Set { seconds, total },
            Command::Query {
                phase,
                remaining,
                total,
                progress,
                heart_rate,
            } => Self::Query(QueryArguments {
                phase,
                remaining,
                total,
                progress,
                heart_rate,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn arguments_parse() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn arguments_parse_start() {
        let args = Arguments::parse_from([
            "rest-timer",
            "start",
            "Push Day",
            "--exercise",
            "Bench Press",
            "--set",
            "3",
            "--preset",
            "long",
        ]);
        let ClientCommand::Start(start) = ClientCommand::from(args.command) else {
            panic!("expected a start command");
        };
        assert_eq!(start.workout, "Push Day");
        assert_eq!(start.exercise.as_deref(), Some("Bench Press"));
        assert_eq!(start.set, 3);
        assert_eq!(start.preset, Some(RestPreset::Long));
        assert_eq!(start.duration, None);
    }

    #[test]
    fn arguments_parse_subtract() {
        let args = Arguments::parse_from(["rest-timer", "subtract"]);
        assert_eq!(
            ClientCommand::from(args.command),
            ClientCommand::Subtract { seconds: None }
        );
    }
}
