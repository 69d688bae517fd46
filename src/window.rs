use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::error::WindowError;

/// Time units accepted in the read path.
///
/// Each scale maps to a fixed number of seconds; there is deliberately no
/// calendar arithmetic (a "month" or "week" is an unknown scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeScale {
    Hours,
    Mins,
    Secs,
}

impl TimeScale {
    /// Number of seconds in one unit of this scale.
    pub fn seconds_per_unit(&self) -> i64 {
        match self {
            TimeScale::Hours => 3600,
            TimeScale::Mins => 60,
            TimeScale::Secs => 1,
        }
    }

    /// The path-segment spelling of this scale.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeScale::Hours => "hours",
            TimeScale::Mins => "mins",
            TimeScale::Secs => "secs",
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeScale {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hours" => Ok(TimeScale::Hours),
            "mins" => Ok(TimeScale::Mins),
            "secs" => Ok(TimeScale::Secs),
            other => Err(WindowError::UnknownScale(other.to_string())),
        }
    }
}

/// A relative lookback window ("the last 2 hours") that can be anchored to a
/// point in time to produce an absolute cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    value: i64,
    scale: TimeScale,
}

impl TimeWindow {
    /// Create a window of `value` units of `scale`.
    ///
    /// `value` must be strictly positive; zero and negative windows are
    /// rejected here rather than producing an empty or future-facing query.
    pub fn new(value: i64, scale: TimeScale) -> Result<Self, WindowError> {
        if value <= 0 {
            return Err(WindowError::InvalidValue(value.to_string()));
        }
        Ok(Self { value, scale })
    }

    /// Parse a window from raw path segments.
    ///
    /// The value is validated before the scale, so a request that gets both
    /// wrong is reported as an invalid value.
    pub fn from_parts(value: &str, scale: &str) -> Result<Self, WindowError> {
        let value: i64 = value
            .parse()
            .map_err(|_| WindowError::InvalidValue(value.to_string()))?;
        if value <= 0 {
            return Err(WindowError::InvalidValue(value.to_string()));
        }
        let scale = scale.parse()?;
        Self::new(value, scale)
    }

    /// Window length in seconds.
    pub fn seconds(&self) -> Result<i64, WindowError> {
        self.value
            .checked_mul(self.scale.seconds_per_unit())
            .ok_or(WindowError::OutOfRange {
                value: self.value,
                scale: self.scale.as_str(),
            })
    }

    /// Cutoff timestamp for the current server time.
    pub fn cutoff(&self) -> Result<DateTime<Utc>, WindowError> {
        self.cutoff_from(Utc::now())
    }

    /// Cutoff timestamp anchored at `now` (deterministic variant for tests).
    pub fn cutoff_from(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, WindowError> {
        let out_of_range = WindowError::OutOfRange {
            value: self.value,
            scale: self.scale.as_str(),
        };
        let span = Duration::try_seconds(self.seconds()?).ok_or(out_of_range.clone())?;
        now.checked_sub_signed(span).ok_or(out_of_range)
    }
}
