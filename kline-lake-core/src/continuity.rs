//! Continuity diagnostics for a day of candles.

use chrono::{DateTime, NaiveDate};

use crate::interval::Interval;

/// A spacing must exceed the nominal interval by this factor to count as a gap.
pub const GAP_TOLERANCE: f64 = 1.1;

/// Gaps observed in one record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuityReport {
    /// UTC calendar date of the first candle (`None` for an empty set).
    pub date: Option<NaiveDate>,
    /// Number of consecutive open-time differences above tolerance.
    pub gaps: usize,
}

impl ContinuityReport {
    pub fn is_continuous(&self) -> bool {
        self.gaps == 0
    }
}

/// Count spacings between consecutive open times that exceed
/// `expected_ms * GAP_TOLERANCE`.
///
/// Open times are taken in read order; out-of-order rows produce negative
/// differences and are never counted. Fewer than two rows yield zero gaps.
pub fn count_gaps(open_times_ms: &[i64], expected_ms: i64) -> usize {
    let threshold = expected_ms as f64 * GAP_TOLERANCE;
    open_times_ms
        .windows(2)
        .filter(|pair| pair[1].saturating_sub(pair[0]) as f64 > threshold)
        .count()
}

/// Check a record set against the spacing of its interval directory label.
///
/// Purely informational: logs when gaps are found and returns the report,
/// but never rejects data.
pub fn check_continuity(open_times_ms: &[i64], interval_label: &str) -> ContinuityReport {
    let expected = Interval::expected_millis_for_label(interval_label);
    let report = ContinuityReport {
        date: open_times_ms
            .first()
            .and_then(|ms| DateTime::from_timestamp_millis(*ms))
            .map(|dt| dt.date_naive()),
        gaps: count_gaps(open_times_ms, expected),
    };

    if !report.is_continuous() {
        match report.date {
            Some(date) => tracing::info!("found {} gap(s) on {date}", report.gaps),
            None => tracing::info!("found {} gap(s)", report.gaps),
        }
    }

    report
}
