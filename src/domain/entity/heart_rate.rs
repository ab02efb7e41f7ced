use snafu::prelude::*;

/// Lowest heart rate accepted from a sampler, in BPM.
pub const MIN_BPM: i64 = 30;

/// Highest heart rate accepted from a sampler, in BPM.
pub const MAX_BPM: i64 = 250;

/// A heart rate sample in beats per minute, guaranteed to be within
/// [`MIN_BPM`]..=[`MAX_BPM`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HeartRate(i64);

impl HeartRate {
    /// Try to create a [`HeartRate`] from a raw BPM value.
    ///
    /// # Errors
    ///
    /// This function will return an error if the value is out of range.
    pub fn try_new(bpm: i64) -> Result<Self, TryNewHeartRateError> {
        ensure!(is_plausible(bpm), OutOfRangeSnafu { bpm });
        Ok(Self(bpm))
    }

    /// Returns the inner BPM value of this [`HeartRate`].
    pub fn bpm(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for HeartRate {
    type Error = TryNewHeartRateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

/// Returns `true` if `bpm` is a heart rate a human could plausibly have.
pub fn is_plausible(bpm: i64) -> bool {
    (MIN_BPM..=MAX_BPM).contains(&bpm)
}

/// An error type of creating a [`HeartRate`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewHeartRateError {
    #[snafu(display("Heart rate {bpm} BPM is outside {MIN_BPM}..={MAX_BPM}"))]
    #[non_exhaustive]
    OutOfRange { bpm: i64 },
}
