use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};

pub const EXPIRED_MARKER: &str = "EXPIRED";
pub const INVALID_MARKER: &str = "INVALID DATE";
pub const FORM_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Naive formats are read as local wall-clock time. The first one is what the
/// backend serializes, the last one is what the create-alarm form accepts.
const LOCAL_FORMATS: [&str; 4] = [
    "%b %d, %Y %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    FORM_DATE_FORMAT,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    Counting(String),
    Expired,
}

pub fn parse_target(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }

    LOCAL_FORMATS.iter().find_map(|format| {
        let naive = NaiveDateTime::parse_from_str(raw, format).ok()?;
        resolve_local(&Local, naive)
    })
}

/// Ambiguous times take the earlier instant. Times skipped by a clock change
/// are moved forward past the gap.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
        .map(|date| date.with_timezone(&Utc))
}

pub fn tick_at(target: DateTime<Utc>, now: DateTime<Utc>) -> Tick {
    let remaining_ms = (target - now).num_milliseconds();
    if remaining_ms < 0 {
        Tick::Expired
    } else {
        Tick::Counting(format_remaining(remaining_ms / 1000))
    }
}

pub fn format_remaining(total_seconds: i64) -> String {
    let days = total_seconds / 86_400;
    let hours = total_seconds % 86_400 / 3_600;
    let minutes = total_seconds % 3_600 / 60;
    let seconds = total_seconds % 60;
    format!("{days}d {hours}h {minutes}m {seconds}s")
}
