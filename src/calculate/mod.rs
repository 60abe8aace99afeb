//! Watch-time aggregation.
//!
//! Computes derived metrics from decoded durations:
//! - Playlist total and its clock/breakdown forms
//! - Average, longest and shortest video (zero-length entries ignored)
//! - Playback-speed adjusted totals
//! - Speed comparison and days-to-finish planning

use crate::models::duration::{breakdown, format_clock};
use crate::models::{DurationRecord, DurationSummary, Insights};

/// Slowest playback speed accepted from users.
pub const MIN_SPEED: f64 = 0.25;

/// Fastest playback speed accepted from users.
pub const MAX_SPEED: f64 = 4.0;

/// Sum of all decoded durations.
pub fn total_seconds(records: &[DurationRecord]) -> u64 {
    records
        .iter()
        .fold(0u64, |sum, r| sum.saturating_add(r.duration_seconds))
}

/// Average/longest/shortest over entries with a positive duration.
///
/// The average divides by the number of positive entries, floored at one,
/// so an empty or all-zero input yields all-zero insights.
pub fn insights(records: &[DurationRecord]) -> Insights {
    let mut sum = 0u64;
    let mut counted = 0u64;
    let mut longest = 0u64;
    let mut shortest: Option<u64> = None;

    for d in records.iter().map(|r| r.duration_seconds) {
        if d == 0 {
            continue;
        }
        sum = sum.saturating_add(d);
        counted += 1;
        longest = longest.max(d);
        shortest = Some(shortest.map_or(d, |s| s.min(d)));
    }

    Insights {
        average_seconds: (sum as f64 / counted.max(1) as f64).round() as u64,
        longest_seconds: longest,
        shortest_seconds: shortest.unwrap_or(0),
    }
}

/// Watch time at the given playback speed, rounded to the nearest second.
///
/// Callers clamp the speed first; see [`clamp_speed`].
pub fn adjust_for_speed(total: u64, speed: f64) -> u64 {
    (total as f64 / speed).round() as u64
}

/// Restrict a requested playback speed to the supported range.
pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        return 1.0;
    }
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

/// Speeds shown side by side in reports.
pub const COMPARISON_SPEEDS: [f64; 4] = [1.0, 1.25, 1.5, 2.0];

/// Playback speed from a command-line argument.
///
/// Missing, unparseable or zero values mean normal speed; anything else is
/// clamped to the supported range.
pub fn speed_from_arg(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|s| *s != 0.0 && !s.is_nan())
        .map(clamp_speed)
        .unwrap_or(1.0)
}

/// Watch time of `total` at each of [`COMPARISON_SPEEDS`].
pub fn speed_comparison(total: u64) -> Vec<(f64, u64)> {
    COMPARISON_SPEEDS
        .iter()
        .map(|&speed| (speed, adjust_for_speed(total, speed)))
        .collect()
}

/// Whole days needed to watch `seconds` at `hours_per_day`, rounded up.
///
/// `None` when `hours_per_day` is not a positive number.
pub fn days_to_finish(seconds: u64, hours_per_day: f64) -> Option<u64> {
    if !hours_per_day.is_finite() || hours_per_day <= 0.0 {
        return None;
    }
    let seconds_per_day = hours_per_day * 3600.0;
    Some((seconds as f64 / seconds_per_day).ceil() as u64)
}

/// Total, clock string and breakdown, with no speed adjustment applied.
pub fn summarize(records: &[DurationRecord]) -> DurationSummary {
    let total = total_seconds(records);
    DurationSummary {
        total_seconds: total,
        formatted: format_clock(total),
        detailed: breakdown(total),
        adjusted_seconds: None,
        adjusted_formatted: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records(durations: &[u64]) -> Vec<DurationRecord> {
        durations
            .iter()
            .enumerate()
            .map(|(i, &d)| DurationRecord::new(format!("video{}", i), d))
            .collect()
    }

    #[test]
    fn test_total_seconds() {
        assert_eq!(total_seconds(&records(&[600, 1800])), 2400);
        assert_eq!(total_seconds(&records(&[10, 0, 30])), 40);
        assert_eq!(total_seconds(&[]), 0);
    }

    #[test]
    fn test_total_seconds_saturates() {
        assert_eq!(total_seconds(&records(&[u64::MAX, 5])), u64::MAX);
    }

    #[test]
    fn test_insights_empty() {
        assert_eq!(
            insights(&[]),
            Insights {
                average_seconds: 0,
                longest_seconds: 0,
                shortest_seconds: 0,
            }
        );
    }

    #[test]
    fn test_insights_ignores_zero_entries() {
        assert_eq!(
            insights(&records(&[10, 0, 30])),
            Insights {
                average_seconds: 20,
                longest_seconds: 30,
                shortest_seconds: 10,
            }
        );
    }

    #[test]
    fn test_insights_all_zero() {
        assert_eq!(insights(&records(&[0, 0, 0])), Insights::default());
    }

    #[test]
    fn test_insights_average_rounds() {
        // 10 + 11 = 21 / 2 = 10.5 rounds up
        assert_eq!(insights(&records(&[10, 11])).average_seconds, 11);
        // 10 + 10 + 11 = 31 / 3 = 10.33 rounds down
        assert_eq!(insights(&records(&[10, 10, 11])).average_seconds, 10);
    }

    #[test]
    fn test_insights_single_entry() {
        let i = insights(&records(&[42]));
        assert_eq!(i.average_seconds, 42);
        assert_eq!(i.longest_seconds, 42);
        assert_eq!(i.shortest_seconds, 42);
    }

    #[test]
    fn test_adjust_for_speed() {
        assert_eq!(adjust_for_speed(2400, 2.0), 1200);
        assert_eq!(adjust_for_speed(2400, 1.5), 1600);
        assert_eq!(adjust_for_speed(100, 0.25), 400);
        // 1000 / 3 = 333.33
        assert_eq!(adjust_for_speed(1000, 3.0), 333);
        // 5 / 2 = 2.5 rounds up
        assert_eq!(adjust_for_speed(5, 2.0), 3);
    }

    #[test]
    fn test_adjust_for_speed_does_not_validate_range() {
        assert_eq!(adjust_for_speed(100, 10.0), 10);
    }

    #[test]
    fn test_clamp_speed() {
        assert_eq!(clamp_speed(1.5), 1.5);
        assert_eq!(clamp_speed(0.1), MIN_SPEED);
        assert_eq!(clamp_speed(10.0), MAX_SPEED);
        assert_eq!(clamp_speed(-3.0), MIN_SPEED);
        assert_eq!(clamp_speed(f64::NAN), 1.0);
        assert_eq!(clamp_speed(f64::INFINITY), MAX_SPEED);
    }

    #[test]
    fn test_speed_from_arg() {
        assert_eq!(speed_from_arg(None), 1.0);
        assert_eq!(speed_from_arg(Some("1.5")), 1.5);
        assert_eq!(speed_from_arg(Some("abc")), 1.0);
        // Zero means "no speed given", not the slowest speed
        assert_eq!(speed_from_arg(Some("0")), 1.0);
        assert_eq!(speed_from_arg(Some("0.0")), 1.0);
        assert_eq!(speed_from_arg(Some("8")), MAX_SPEED);
        assert_eq!(speed_from_arg(Some("0.1")), MIN_SPEED);
    }

    #[test]
    fn test_speed_comparison() {
        assert_eq!(
            speed_comparison(3600),
            vec![(1.0, 3600), (1.25, 2880), (1.5, 2400), (2.0, 1800)]
        );
    }

    #[test]
    fn test_days_to_finish() {
        // 10 hours at 2h/day
        assert_eq!(days_to_finish(36_000, 2.0), Some(5));
        // 10h 1s needs a sixth day
        assert_eq!(days_to_finish(36_001, 2.0), Some(6));
        assert_eq!(days_to_finish(1_800, 1.0), Some(1));
        assert_eq!(days_to_finish(0, 1.0), Some(0));
        assert_eq!(days_to_finish(36_000, 1.5), Some(7));
    }

    #[test]
    fn test_days_to_finish_rejects_non_positive_hours() {
        assert_eq!(days_to_finish(3600, 0.0), None);
        assert_eq!(days_to_finish(3600, -2.0), None);
        assert_eq!(days_to_finish(3600, f64::NAN), None);
        assert_eq!(days_to_finish(3600, f64::INFINITY), None);
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&records(&[600, 1800]));
        assert_eq!(summary.total_seconds, 2400);
        assert_eq!(summary.formatted, "00:40:00");
        assert_eq!(summary.detailed.minutes, 40);
        assert_eq!(summary.adjusted_seconds, None);
        assert_eq!(summary.adjusted_formatted, None);
    }
}
