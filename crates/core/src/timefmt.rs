//! Timestamp parsing and presentation for report cards.
//!
//! The backend emits naive ISO timestamps (`datetime.isoformat()` style);
//! RFC 3339 with an offset is also accepted. Ages are rendered relative to
//! an injected `now` so the formatting stays testable.

#![forbid(unsafe_code)]

use chrono::{DateTime, Local, NaiveDateTime};

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// dd/mm/yyyy hh:mm, used as hover text and as the fallback for old records.
pub fn format_absolute(ts: NaiveDateTime) -> String {
    ts.format("%d/%m/%Y %H:%M").to_string()
}

/// Relative age: "Agora mesmo", minutes, hours, days, then the absolute date.
pub fn relative_age(ts: NaiveDateTime, now: NaiveDateTime) -> String {
    let secs = (now - ts).num_seconds().max(0);
    if secs < 60 {
        return "Agora mesmo".to_string();
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{} min atrás", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h atrás", hours);
    }
    let days = hours / 24;
    if days < 30 {
        return format!("{} dia{} atrás", days, if days > 1 { "s" } else { "" });
    }
    format_absolute(ts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn parses_naive_isoformat_with_fraction() {
        assert!(parse_timestamp("2025-03-04T08:30:00.123456").is_some());
        assert!(parse_timestamp("2025-03-04T08:30:00").is_some());
    }

    #[test]
    fn parses_rfc3339() {
        assert!(parse_timestamp("2025-03-04T08:30:00+00:00").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("ontem").is_none());
    }

    #[test]
    fn relative_age_buckets() {
        let now = ts("2025-03-04T12:00:00");
        assert_eq!(relative_age(ts("2025-03-04T11:59:30"), now), "Agora mesmo");
        assert_eq!(relative_age(ts("2025-03-04T11:45:00"), now), "15 min atrás");
        assert_eq!(relative_age(ts("2025-03-04T07:00:00"), now), "5h atrás");
        assert_eq!(relative_age(ts("2025-03-03T11:00:00"), now), "1 dia atrás");
        assert_eq!(relative_age(ts("2025-02-25T12:00:00"), now), "7 dias atrás");
    }

    #[test]
    fn old_records_fall_back_to_the_absolute_date() {
        let now = ts("2025-03-04T12:00:00");
        assert_eq!(relative_age(ts("2024-12-01T09:15:00"), now), "01/12/2024 09:15");
    }

    #[test]
    fn future_timestamps_clamp_to_now() {
        let now = ts("2025-03-04T12:00:00");
        assert_eq!(relative_age(ts("2025-03-04T12:00:05"), now), "Agora mesmo");
    }
}
