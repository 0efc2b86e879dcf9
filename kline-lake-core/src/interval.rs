//! Candle interval labels and their nominal spacing.

use std::fmt;
use std::str::FromStr;

/// K-line bucket widths with a known spacing.
///
/// Interval directories carry the raw Binance label (`1m`, `4h`, ...). Labels
/// outside this table are still converted; continuity checks treat them as `1h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    OneHour,
    FourHours,
    OneDay,
}

impl Interval {
    pub const ALL: [Interval; 6] = [
        Interval::OneMinute,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::OneHour,
        Interval::FourHours,
        Interval::OneDay,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.label() == label)
    }

    /// Binance label, e.g. `"15m"`.
    pub fn label(self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::OneHour => "1h",
            Interval::FourHours => "4h",
            Interval::OneDay => "1d",
        }
    }

    /// Milliseconds between consecutive candle open times.
    pub fn expected_millis(self) -> i64 {
        match self {
            Interval::OneMinute => 60_000,
            Interval::FiveMinutes => 300_000,
            Interval::FifteenMinutes => 900_000,
            Interval::OneHour => 3_600_000,
            Interval::FourHours => 14_400_000,
            Interval::OneDay => 86_400_000,
        }
    }

    /// Spacing for a directory label; unknown labels fall back to one hour.
    pub fn expected_millis_for_label(label: &str) -> i64 {
        match label.parse::<Interval>() {
            Ok(interval) => interval.expected_millis(),
            Err(e) => {
                tracing::debug!("{e}, checking continuity at {} spacing", Interval::OneHour);
                Interval::OneHour.expected_millis()
            }
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized interval label '{0}'")]
pub struct UnknownInterval(pub String);

impl FromStr for Interval {
    type Err = UnknownInterval;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownInterval(s.to_string()))
    }
}
