//! Elapsed-time formatting for build reports.

use std::time::Instant;

const DEFAULT_PRECISION: usize = 2;

/// Milliseconds elapsed since `start`, rounded to `precision` decimal places
/// (2 when `None`).
///
/// # Example
///
/// ```
/// use std::time::Instant;
/// use esrun_runner::time_diff;
///
/// let start = Instant::now();
/// let elapsed: f64 = time_diff(start, Some(3)).parse().unwrap();
/// assert!(elapsed >= 0.0);
/// ```
pub fn time_diff(start: Instant, precision: Option<usize>) -> String {
    time_diff_between(start, Instant::now(), precision)
}

/// Like [`time_diff`], measured against an explicit `now`.
///
/// A `now` earlier than `start` yields zero.
pub fn time_diff_between(start: Instant, now: Instant, precision: Option<usize>) -> String {
    let elapsed_ms = now.saturating_duration_since(start).as_secs_f64() * 1000.0;
    format!(
        "{:.*}",
        precision.unwrap_or(DEFAULT_PRECISION),
        elapsed_ms
    )
}
