// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Date normalization — turns decoded date-times, spreadsheet day serials, and
// locale-ambiguous date strings into `DD/MM/YYYY`.
//
// No source locale is known, so ambiguous `a/b/y` strings are resolved by a
// fixed policy:
//
//   b > 12, a <= 12   month-first input, swap         (05/13/2024 -> 13/05/2024)
//   a > 12, b <= 12   day-first input, keep            (13/05/2024 -> 13/05/2024)
//   a, b <= 12        ambiguous, day-first default     (05/06/2024 -> 05/06/2024)
//   a, b > 12         not a date, leave untouched

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use fichas_core::RawCell;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::cell::display_number;

const MS_PER_DAY: f64 = 86_400_000.0;

/// `YYYY-M-D` or `YYYY/M/D`.
static YEAR_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})[/-]([0-9]{1,2})[/-]([0-9]{1,2})$").expect("year-first pattern")
});

/// `D-M-YY`, `M/D/YYYY` and friends.
static YEAR_LAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})[/-]([0-9]{1,2})[/-]([0-9]{2}|[0-9]{4})$").expect("year-last pattern")
});

/// Normalize a cell from a date-like column.
///
/// Never fails: anything that is not recognisably a date comes back as the
/// original text.
pub fn normalize(value: &RawCell) -> String {
    match value {
        RawCell::Empty => String::new(),
        RawCell::Date { date } => format_dmy(date.date_naive()),
        RawCell::Number(n) => match serial_to_date(*n) {
            Some(date) => format_dmy(date),
            None => normalize_text(&display_number(*n)),
        },
        RawCell::Bool(b) => normalize_text(&b.to_string()),
        RawCell::Text(s) => normalize_text(s),
    }
}

/// Convert a spreadsheet day serial (days since 1899-12-30) to a UTC date.
///
/// Returns `None` for non-finite values and for serials outside the calendar
/// range chrono can represent.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    // Round half up.
    let millis = (serial * MS_PER_DAY + 0.5).floor();
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_milliseconds(millis as i64)?;
    spreadsheet_epoch()?
        .checked_add_signed(delta)
        .map(|dt| dt.date())
}

fn spreadsheet_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)
}

/// `DD/MM/YYYY`, zero-padded day and month, year as-is.
pub fn format_dmy(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{}", date.day(), date.month(), date.year())
}

/// Normalize a textual date. Unrecognised text is returned unchanged.
pub fn normalize_text(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    // Drop a trailing time component: "2024-05-06 10:00", "2024-05-06T10:00Z".
    let date_part = trimmed.split([' ', 'T']).next().unwrap_or(trimmed);

    if let Some(caps) = YEAR_FIRST.captures(date_part) {
        return format!(
            "{:0>2}/{:0>2}/{}",
            &caps[3], &caps[2], &caps[1]
        );
    }

    if let Some(caps) = YEAR_LAST.captures(date_part) {
        return resolve_year_last(&caps).unwrap_or_else(|| text.to_string());
    }

    text.to_string()
}

/// Apply the day/month disambiguation policy to an `a/b/y` match.
fn resolve_year_last(caps: &Captures<'_>) -> Option<String> {
    let a: u32 = caps[1].parse().ok()?;
    let b: u32 = caps[2].parse().ok()?;
    let year = expand_year(&caps[3])?;

    let (day, month) = if b > 12 && a <= 12 {
        (b, a)
    } else if a > 12 && b <= 12 {
        (a, b)
    } else if a <= 12 && b <= 12 {
        (a, b)
    } else {
        return None;
    };

    Some(format!("{day:02}/{month:02}/{year}"))
}

/// Two-digit years pivot at 50: `49` is 2049, `50` is 1950.
fn expand_year(raw: &str) -> Option<u32> {
    let year: u32 = raw.parse().ok()?;
    if raw.len() == 2 {
        Some(if year >= 50 { 1900 + year } else { 2000 + year })
    } else {
        Some(year)
    }
}
