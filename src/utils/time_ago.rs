//! Relative publish-age labels ("5 minutes ago", "Jan 5, 2025").

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// Items at most this many days old count as new.
const NEW_WITHIN_DAYS: i64 = 3;
/// Beyond this many days the absolute date is shown.
const RELATIVE_UNTIL_DAYS: i64 = 7;

/// Text shown for timestamps that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Human-readable age plus a recency flag used for styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeAgo {
    pub text: String,
    pub is_new: bool,
}

impl TimeAgo {
    /// CSS class for the recency flag.
    pub const fn class(&self) -> &'static str {
        if self.is_new { "new" } else { "old" }
    }
}

/// Parse a publish timestamp.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM[:SS[.fff]]` (read as UTC),
/// or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Describe how long ago `publish_date` was, relative to `now`.
///
/// First matching rule wins:
/// - under an hour: minutes, new
/// - under a day: hours, new
/// - up to 7 days: days, new when at most 3 days
/// - otherwise: `Mon D, YYYY`, old
///
/// Future timestamps yield negative minute counts.
pub fn time_ago(publish_date: &str, now: DateTime<Utc>) -> TimeAgo {
    let Some(published) = parse_timestamp(publish_date) else {
        return TimeAgo {
            text: INVALID_DATE.into(),
            is_new: false,
        };
    };

    let elapsed_ms = (now - published).num_milliseconds();
    let minutes = elapsed_ms.div_euclid(MS_PER_MINUTE);
    let hours = elapsed_ms.div_euclid(MS_PER_HOUR);
    let days = elapsed_ms.div_euclid(MS_PER_DAY);

    if minutes < 60 {
        TimeAgo {
            text: ago(minutes, "minute"),
            is_new: true,
        }
    } else if hours < 24 {
        TimeAgo {
            text: ago(hours, "hour"),
            is_new: true,
        }
    } else if days <= RELATIVE_UNTIL_DAYS {
        TimeAgo {
            text: ago(days, "day"),
            is_new: days <= NEW_WITHIN_DAYS,
        }
    } else {
        TimeAgo {
            text: published.format("%b %-d, %Y").to_string(),
            is_new: false,
        }
    }
}

/// "1 hour ago" / "3 hours ago". Singular only for exactly one.
#[inline]
fn ago(count: i64, unit: &str) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}
