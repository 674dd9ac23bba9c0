// Date utility functions
// Month abbreviations, month lengths and grid-relative weekday names

use chrono::{Datelike, NaiveDate, Weekday};

/// Locale-invariant month abbreviations used for directory names and the CSV
/// dialogue column. Parsing must go through the same table to round-trip.
pub const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Weekday names indexed by ordinal, Sunday = 0.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Three-letter abbreviation for a 1-based month number.
pub fn month_abbrev(month: u32) -> Option<&'static str> {
    if (1..=12).contains(&month) {
        Some(MONTH_ABBREVS[(month - 1) as usize])
    } else {
        None
    }
}

/// Parse a month given either as a number (1-12) or an abbreviation.
///
/// Abbreviations are matched case-insensitively, so folder names like `MAR`
/// resolve to 3.
pub fn parse_month(text: &str) -> Option<u32> {
    let text = text.trim();
    if let Ok(number) = text.parse::<u32>() {
        return (1..=12).contains(&number).then_some(number);
    }

    MONTH_ABBREVS
        .iter()
        .position(|abbrev| abbrev.eq_ignore_ascii_case(text))
        .map(|idx| idx as u32 + 1)
}

/// Number of days in the given month, leap-year aware.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Weekday name for `day` when the month's grid starts on `first_weekday`.
///
/// This follows the grid column, not the real calendar date: with a Sunday
/// start, day 1 is always "Sunday".
pub fn weekday_label(first_weekday: Weekday, day: u32) -> &'static str {
    let start = first_weekday.num_days_from_sunday();
    let offset = day.saturating_sub(1);
    WEEKDAY_NAMES[((start + offset % 7) % 7) as usize]
}

/// Weekday from its ordinal where Sunday = 0.
pub fn weekday_from_ordinal(ordinal: u8) -> Option<Weekday> {
    match ordinal {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Parse a weekday from a name ("monday", "Mon") or an ordinal ("1").
pub fn parse_weekday(text: &str) -> Option<Weekday> {
    let text = text.trim();
    if let Ok(ordinal) = text.parse::<u8>() {
        return weekday_from_ordinal(ordinal);
    }
    text.parse::<Weekday>().ok()
}

/// The current year, used when no explicit year is configured.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
