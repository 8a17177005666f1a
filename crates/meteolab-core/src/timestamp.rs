//! Calendar helpers for reading labels and snapshot metadata.
//!
//! All dates are UTC. No leap second handling.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Seconds in one calendar day.
pub const SECS_PER_DAY: u64 = 86_400;

/// Whole days elapsed since the Unix epoch.
pub fn epoch_day(since_epoch: Duration) -> u64 {
    since_epoch.as_secs() / SECS_PER_DAY
}

/// Duration since the Unix epoch, clamped to zero for pre-epoch clocks.
pub fn since_epoch(t: SystemTime) -> Duration {
    t.duration_since(UNIX_EPOCH).unwrap_or_default()
}

/// Short Slovak date label for a day ordinal, e.g. `19. 10. 2026`.
pub fn day_label(day: u64) -> String {
    let (year, month, dom) = civil_from_days(day);
    format!("{dom}. {month}. {year}")
}

/// Full ISO-8601 timestamp.
/// Example: `2026-10-19T07:30:00Z`
pub fn format_iso8601(since_epoch: Duration) -> String {
    let secs = since_epoch.as_secs();
    let (year, month, day) = civil_from_days(secs / SECS_PER_DAY);
    let (hour, min, sec) = ((secs / 3600) % 24, (secs / 60) % 60, secs % 60);
    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{min:02}:{sec:02}Z")
}

/// Compact ISO-8601 timestamp safe for file names.
/// Example: `2026-10-19T073000Z`
pub fn format_iso8601_compact(since_epoch: Duration) -> String {
    format_iso8601(since_epoch).replace(':', "")
}

/// Convert a day ordinal to (year, month, day).
fn civil_from_days(mut days: u64) -> (u64, u64, u64) {
    let mut year = 1970u64;
    loop {
        let days_in_year = if is_leap(year) { 366 } else { 365 };
        if days < days_in_year {
            break;
        }
        days -= days_in_year;
        year += 1;
    }

    let months_days: [u64; 12] = if is_leap(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 12u64;
    for (i, &md) in months_days.iter().enumerate() {
        if days < md {
            month = i as u64 + 1;
            break;
        }
        days -= md;
    }

    (year, month, days + 1)
}

fn is_leap(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
