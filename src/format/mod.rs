//! Display formatting for amounts, counts, timestamps and names.
//!
//! Every function here is pure apart from [`format_relative_time`], which reads
//! the wall clock. Output follows a fixed en-US convention: `$` amounts with
//! comma grouping, "Feb 1, 2026" dates.

use crate::error::{DashboardError, Result};
use chrono::{DateTime, Utc};
use num_format::{Locale, ToFormattedString};

const COMPACT_UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Parse an RFC 3339 / ISO-8601 timestamp into UTC
pub fn parse_timestamp(iso: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DashboardError::InvalidTimestamp(format!("{}: {}", iso, e)))
}

/// Format an amount in dollars. Whole amounts drop the cents.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_formatted_string(&Locale::en);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    match cents % 100 {
        0 => format!("{}${}", sign, dollars),
        rest => format!("{}${}.{:02}", sign, dollars, rest),
    }
}

/// Format an ISO timestamp as a calendar date, e.g. "Feb 1, 2026"
pub fn format_date(iso: &str) -> Result<String> {
    Ok(format_day(&parse_timestamp(iso)?))
}

pub fn format_day(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

/// Format an ISO timestamp relative to the current instant
pub fn format_relative_time(iso: &str) -> Result<String> {
    Ok(relative_time(&parse_timestamp(iso)?, &Utc::now()))
}

/// Elapsed time between `then` and `now` as "N units ago".
///
/// Buckets: under a minute in seconds, under an hour in minutes, under a day
/// in hours, otherwise days. Timestamps at or after `now` read "just now".
pub fn relative_time(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*then);
    let seconds = elapsed.num_seconds();

    if seconds <= 0 {
        "just now".to_string()
    } else if seconds < 60 {
        ago(seconds, "second")
    } else if elapsed.num_minutes() < 60 {
        ago(elapsed.num_minutes(), "minute")
    } else if elapsed.num_hours() < 24 {
        ago(elapsed.num_hours(), "hour")
    } else {
        ago(elapsed.num_days(), "day")
    }
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Integer with thousands separators, e.g. "52,400"
pub fn format_number(n: i64) -> String {
    n.to_formatted_string(&Locale::en)
}

/// Grouped number with at most three fraction digits, trailing zeros removed
pub fn format_decimal(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');
    let whole = whole
        .parse::<u64>()
        .map(|w| w.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| whole.to_string());
    let sign = if value < 0.0 && (whole != "0" || !fraction.is_empty()) { "-" } else { "" };

    if fraction.is_empty() {
        format!("{}{}", sign, whole)
    } else {
        format!("{}{}.{}", sign, whole, fraction)
    }
}

/// Abbreviate large values for stat cards: 32450 -> "32.5K", 1200000 -> "1.2M"
pub fn format_compact(value: f64) -> String {
    let magnitude = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    for (index, (scale, suffix)) in COMPACT_UNITS.iter().enumerate() {
        if magnitude < *scale {
            continue;
        }
        let scaled = (magnitude / scale * 10.0).round() / 10.0;
        // 999_950 rounds to 1000.0K; promote to the next unit instead
        if scaled >= 1000.0 && index > 0 {
            let (bigger, bigger_suffix) = COMPACT_UNITS[index - 1];
            return format!("{}{}{}", sign, trim_tenths(magnitude / bigger), bigger_suffix);
        }
        return format!("{}{}{}", sign, trim_tenths(scaled), suffix);
    }

    format_decimal(value)
}

fn trim_tenths(value: f64) -> String {
    let text = format!("{:.1}", value);
    text.strip_suffix(".0").map(str::to_string).unwrap_or(text)
}

/// First letter of the first and last words, uppercased. One word gives one letter.
pub fn get_initials(full_name: &str) -> String {
    let mut words = full_name.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };

    let mut initials: String = first.chars().take(1).flat_map(char::to_uppercase).collect();
    if let Some(last) = words.last() {
        initials.extend(last.chars().take(1).flat_map(char::to_uppercase));
    }
    initials
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(iso: &str) -> DateTime<Utc> {
        parse_timestamp(iso).unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(79.0), "$79");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(70.6), "$70.60");
        assert_eq!(format_currency(0.05), "$0.05");
        assert_eq!(format_currency(52400.0), "$52,400");
        assert_eq!(format_currency(628800.0), "$628,800");
        assert_eq!(format_currency(-12.5), "-$12.50");
        assert_eq!(format_currency(1_234_567.5), "$1,234,567.50");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-02-01T00:00:00Z").unwrap(), "Feb 1, 2026");
        assert_eq!(format_date("2025-12-15T23:59:00Z").unwrap(), "Dec 15, 2025");
        assert!(matches!(
            format_date("yesterday"),
            Err(DashboardError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = at("2026-02-22T12:00:00Z");

        assert_eq!(relative_time(&now, &now), "just now");
        assert_eq!(relative_time(&(now - Duration::seconds(1)), &now), "1 second ago");
        assert_eq!(relative_time(&(now - Duration::seconds(59)), &now), "59 seconds ago");
        assert_eq!(relative_time(&(now - Duration::seconds(60)), &now), "1 minute ago");
        assert_eq!(relative_time(&(now - Duration::minutes(59)), &now), "59 minutes ago");
        assert_eq!(relative_time(&(now - Duration::minutes(60)), &now), "1 hour ago");
        assert_eq!(relative_time(&(now - Duration::hours(23)), &now), "23 hours ago");
        assert_eq!(relative_time(&(now - Duration::hours(24)), &now), "1 day ago");
        assert_eq!(relative_time(&at("2026-02-01T00:00:00Z"), &now), "21 days ago");
    }

    #[test]
    fn test_format_relative_time_from_iso() {
        let three_hours = (Utc::now() - Duration::hours(3)).to_rfc3339();
        assert_eq!(format_relative_time(&three_hours).unwrap(), "3 hours ago");

        let future = (Utc::now() + Duration::minutes(5)).to_rfc3339();
        assert_eq!(format_relative_time(&future).unwrap(), "just now");

        assert!(matches!(
            format_relative_time("nope"),
            Err(DashboardError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_relative_time_is_monotonic() {
        let now = at("2026-02-22T12:00:00Z");
        let rank = |s: &str| {
            ["second", "minute", "hour", "day"]
                .iter()
                .position(|unit| s.contains(unit))
                .unwrap()
        };

        let mut previous = 0;
        for secs in (1..200_000).step_by(997) {
            let current = rank(&relative_time(&(now - Duration::seconds(secs)), &now));
            assert!(current >= previous, "bucket went backwards at {}s", secs);
            previous = current;
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(742), "742");
        assert_eq!(format_number(32450), "32,450");
        assert_eq!(format_number(999999), "999,999");
        assert_eq!(format_number(-1234567), "-1,234,567");
        assert_eq!(format_number(i64::MAX), "9,223,372,036,854,775,807");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(67.3), "67.3");
        assert_eq!(format_decimal(32450.0), "32,450");
        assert_eq!(format_decimal(0.125), "0.125");
        assert_eq!(format_decimal(1000.5), "1,000.5");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(742.0), "742");
        assert_eq!(format_compact(1500.0), "1.5K");
        assert_eq!(format_compact(52400.0), "52.4K");
        assert_eq!(format_compact(1_200_000.0), "1.2M");
        assert_eq!(format_compact(999_950.0), "1M");
        assert_eq!(format_compact(3_000_000_000.0), "3B");
    }

    #[test]
    fn test_get_initials() {
        assert_eq!(get_initials("Alex Johnson"), "AJ");
        assert_eq!(get_initials("liam o'brien"), "LO");
        assert_eq!(get_initials("Mary Ann Smith"), "MS");
        assert_eq!(get_initials("  Nina   Yamamoto "), "NY");
        assert_eq!(get_initials("Cher"), "C");
        assert_eq!(get_initials(""), "");
        assert_eq!(get_initials("   "), "");
    }
}
