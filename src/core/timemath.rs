//! Time-string validation, normalization and timezone conversion.
//!
//! All functions here are pure. Malformed input never raises: it yields
//! `false`/`None` and the caller decides what to display.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;

/// Result of a timezone conversion: the rendered wall-clock time in the
/// target zone plus the absolute instant, so callers can also derive the
/// converted calendar date (a conversion may cross a day boundary).
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    /// `HH:mm` in the target zone.
    pub time: String,
    pub instant: DateTime<Utc>,
    pub zone: Tz,
}

impl Converted {
    /// Calendar date of the instant as seen in the target zone.
    pub fn date_in_zone(&self) -> NaiveDate {
        self.instant.with_timezone(&self.zone).date_naive()
    }
}

fn time_pattern() -> Regex {
    Regex::new(r"^(\d{1,2}):(\d{2})$").unwrap()
}

/// Strict check for `H:mm` / `HH:mm` with hour 00-23 and minute 00-59.
/// Raw digit strings ("930") are rejected here; only [`normalize`] accepts
/// them.
pub fn is_valid_time(text: &str) -> bool {
    let trimmed = text.trim();
    match time_pattern().captures(trimmed) {
        Some(caps) => {
            let hours: i32 = caps[1].parse().unwrap_or(-1);
            let minutes: i32 = caps[2].parse().unwrap_or(-1);
            (0..=23).contains(&hours) && (0..=59).contains(&minutes)
        }
        None => false,
    }
}

/// Normalize user input to canonical zero-padded `HH:mm`.
///
/// Tries the `H:mm` / `HH:mm` pattern first, then the raw-digit path:
/// exactly 3 digits read as `H` + `MM`, exactly 4 as `HH` + `MM`. Both
/// paths require hour 00-23 and minute 00-59. This is the single source of
/// truth for turning ambiguous input into canonical form.
pub fn normalize(text: &str) -> Option<String> {
    let trimmed = text.trim();

    if let Some(caps) = time_pattern().captures(trimmed) {
        let hours: u32 = caps[1].parse().ok()?;
        let minutes: u32 = caps[2].parse().ok()?;
        if hours <= 23 && minutes <= 59 {
            return Some(format!("{:02}:{:02}", hours, minutes));
        }
        return None;
    }

    format_raw_digits(trimmed)
}

/// `"930"` -> `"09:30"`, `"1230"` -> `"12:30"`. Anything but 3 or 4 ASCII
/// digits fails; the 3-digit split is always 1+2.
fn format_raw_digits(digits: &str) -> Option<String> {
    if !(digits.len() == 3 || digits.len() == 4) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let split = digits.len() - 2;
    let hours: u32 = digits[..split].parse().ok()?;
    let minutes: u32 = digits[split..].parse().ok()?;

    if hours <= 23 && minutes <= 59 {
        Some(format!("{:02}:{:02}", hours, minutes))
    } else {
        None
    }
}

/// Resolve an IANA zone identifier. Unknown identifiers yield `None`; the
/// dataset loader drops such records silently.
pub fn resolve_zone(identifier: &str) -> Option<Tz> {
    identifier.parse::<Tz>().ok()
}

/// Convert a time string from one zone to another on a given calendar date.
///
/// The wall-clock datetime `reference + HH:mm:00` is interpreted with the
/// source zone's rules for that specific date, which is what makes the
/// conversion DST-correct. Ambiguous wall-clock times (the repeated hour of
/// a fall-back transition) resolve to the earlier instant; nonexistent ones
/// (the skipped hour of a spring-forward transition) yield `None`, like any
/// other failure.
pub fn convert(text: &str, from: Tz, to: Tz, reference: NaiveDate) -> Option<Converted> {
    let normalized = normalize(text)?;
    let (hours, minutes) = split_normalized(&normalized)?;

    let wall = reference.and_hms_opt(hours, minutes, 0)?;
    let source = from.from_local_datetime(&wall).earliest()?;

    let instant = source.with_timezone(&Utc);
    let target = instant.with_timezone(&to);

    Some(Converted {
        time: target.format("%H:%M").to_string(),
        instant,
        zone: to,
    })
}

fn split_normalized(normalized: &str) -> Option<(u32, u32)> {
    let (h, m) = normalized.split_once(':')?;
    Some((h.parse().ok()?, m.parse().ok()?))
}
