//! French display formatting shared by every client.
//!
//! All helpers are pure and return owned `String`s ready for templates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::{Money, Phone};

/// Shown wherever a date cannot be parsed.
pub const INVALID_DATE: &str = "Date invalide";

/// Insert a space every three digits from the right.
///
/// The input must be a plain digit string (no sign, no decimal point).
#[must_use]
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Format an integer with French thousand separators (`1 234 567`).
#[must_use]
pub fn format_number(value: i64) -> String {
    let grouped = group_thousands(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format an XOF amount (`1 500 000 FCFA`).
#[must_use]
pub fn format_currency(amount: Money) -> String {
    amount.to_string()
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 (`2024-12-15T08:00:00Z`), naive ISO date-times as
/// emitted for UTC values without an offset (`2024-12-15T08:00:00.123456`),
/// and plain dates (`2024-12-15`, interpreted as midnight UTC).
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a timestamp as `dd/MM/yyyy`.
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a timestamp as `dd/MM/yyyy HH:mm`.
#[must_use]
pub fn format_date_time(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y %H:%M").to_string()
}

/// Parse and format a raw date string, or return [`INVALID_DATE`].
#[must_use]
pub fn format_date_str(value: &str) -> String {
    parse_timestamp(value).map_or_else(|| INVALID_DATE.to_string(), |d| format_date(&d))
}

/// Relative French description of `then` as seen from `now`.
///
/// Under a minute is "À l'instant", then minutes, hours and days; from a
/// week on the absolute date is shown.
#[must_use]
pub fn relative_time(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let minutes = (*now - *then).num_minutes();
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "À l'instant".to_string()
    } else if minutes < 60 {
        format!("Il y a {minutes} minute{}", plural(minutes))
    } else if hours < 24 {
        format!("Il y a {hours} heure{}", plural(hours))
    } else if days < 7 {
        format!("Il y a {days} jour{}", plural(days))
    } else {
        format_date(then)
    }
}

const fn plural(n: i64) -> &'static str {
    if n > 1 { "s" } else { "" }
}

/// `value / total` as a percentage rounded to 2 decimal places; 0 when
/// `total` is 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(value: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((value as f64 / total as f64) * 100.0 * 100.0).round() / 100.0
}

/// Up to two uppercase initials from a display name.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Truncate to `max_chars` characters, appending `...` when cut.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// Display a phone number as `+226 XX XX XX XX` when it parses, otherwise
/// return it unchanged.
#[must_use]
pub fn format_phone(raw: &str) -> String {
    Phone::parse(raw).map_or_else(|_| raw.to_string(), |p| p.to_string())
}

/// Format an ISO-8601 video duration (`PT1H2M10S`).
///
/// With hours the result is `1h02min`, otherwise `M:SS`. Values that are
/// not ISO durations (`LIVE`, `30:45`) are returned unchanged.
#[must_use]
pub fn format_duration(iso: &str) -> String {
    let Some(rest) = iso.strip_prefix("PT") else {
        return iso.to_string();
    };

    let (mut hours, mut minutes, mut seconds) = (0_u64, 0_u64, 0_u64);
    let mut number = String::new();
    for c in rest.chars() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }
        let Ok(n) = number.parse::<u64>() else {
            return iso.to_string();
        };
        match c {
            'H' => hours = n,
            'M' => minutes = n,
            'S' => seconds = n,
            _ => return iso.to_string(),
        }
        number.clear();
    }
    if !number.is_empty() {
        return iso.to_string();
    }

    if hours > 0 {
        format!("{hours}h{minutes:02}min")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Compact view count: `1.2K`, `3.4M`, or the plain number.
///
/// Unparseable input yields `0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_view_count(raw: &str) -> String {
    let count = parse_count(raw);
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Parse a count the backend sends as a string; junk counts as 0.
#[must_use]
pub fn parse_count(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}
