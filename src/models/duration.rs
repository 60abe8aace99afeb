//! ISO-8601 duration decoding and watch-time formatting.
//!
//! The upstream detail endpoint reports durations as `PnDTnHnMnS`. Anything
//! outside that grammar decodes to zero rather than failing the run.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

static DURATION_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("duration pattern is valid")
});

/// Decode an ISO-8601 duration (e.g. `PT1H3M45S`) into whole seconds.
///
/// Malformed input, unsupported designators (weeks, fractional seconds) and
/// counts too large to represent all contribute zero.
pub fn decode(encoded: &str) -> u64 {
    let Some(caps) = DURATION_RE.captures(encoded) else {
        return 0;
    };

    let field = |idx: usize| -> u64 {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    field(1)
        .saturating_mul(SECONDS_PER_DAY)
        .saturating_add(field(2).saturating_mul(SECONDS_PER_HOUR))
        .saturating_add(field(3).saturating_mul(SECONDS_PER_MINUTE))
        .saturating_add(field(4))
}

/// Format seconds as `HH:MM:SS`. Hours keep counting past 24.
pub fn format_clock(total_seconds: u64) -> String {
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Compact form such as `"3h 20m"`, omitting zero units.
///
/// Minutes are rounded to the nearest whole minute; an all-zero result
/// renders as `"0m"`.
pub fn format_human(total_seconds: u64) -> String {
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = ((total_seconds % SECONDS_PER_HOUR) + SECONDS_PER_MINUTE / 2) / SECONDS_PER_MINUTE;

    let mut parts = Vec::with_capacity(2);
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }

    if parts.is_empty() {
        "0m".to_string()
    } else {
        parts.join(" ")
    }
}

/// Day/hour/minute/second decomposition of a total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// Exact total divided by 3600, not rounded.
    pub total_hours: f64,
}

pub fn breakdown(total_seconds: u64) -> DurationBreakdown {
    DurationBreakdown {
        days: total_seconds / SECONDS_PER_DAY,
        hours: (total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
        minutes: (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        seconds: total_seconds % SECONDS_PER_MINUTE,
        total_hours: total_seconds as f64 / SECONDS_PER_HOUR as f64,
    }
}
