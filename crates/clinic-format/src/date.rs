//! Date parsing, age calculation, and short date formatting.
//!
//! These helpers never fail. Bad input degrades to sentinels:
//! - [`calculate_age`] returns `0` (callers treat it as "unknown")
//! - [`format_date`] returns [`NOT_AVAILABLE`] or [`INVALID_DATE`]

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

/// Rendered for absent dates.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rendered for dates that do not parse.
pub const INVALID_DATE: &str = "Invalid date";

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a calendar date from the formats found in practice exports.
///
/// Accepts ISO dates (`2023-06-10`), slash dates (`2023/06/10`,
/// `10/06/2023`), written dates (`10 Jun 2023`, `Jun 10, 2023`) and ISO
/// datetimes with or without an offset. Returns `None` otherwise.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
    {
        return Some(date);
    }

    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(datetime.date());
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|datetime| datetime.date_naive())
}

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Age in whole years as of today. Absent or unparsable input yields `0`.
pub fn calculate_age(birth_date: Option<&str>) -> u32 {
    calculate_age_on(birth_date, today())
}

/// Age in whole years as of `today`.
///
/// Subtracts the birth year from the current year, then takes one off when
/// this year's birthday has not been reached yet. Birth dates after `today`
/// yield `0`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use clinic_format::calculate_age_on;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
/// assert_eq!(calculate_age_on(Some("1990-06-15"), today), 33);
/// assert_eq!(calculate_age_on(None, today), 0);
/// ```
pub fn calculate_age_on(birth_date: Option<&str>, today: NaiveDate) -> u32 {
    let Some(birth) = birth_date.and_then(parse_date) else {
        return 0;
    };
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).unwrap_or(0)
}

/// Short display form, e.g. `Jun 10, 2023`.
pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Formats an optional date string for display.
///
/// Returns [`NOT_AVAILABLE`] for absent or empty input and [`INVALID_DATE`]
/// when the text is not a recognizable date.
pub fn format_date(date: Option<&str>) -> String {
    match date.map(str::trim) {
        None | Some("") => NOT_AVAILABLE.to_string(),
        Some(value) => match parse_date(value) {
            Some(parsed) => format_naive_date(parsed),
            None => {
                tracing::trace!(len = value.len(), "unparsable date");
                INVALID_DATE.to_string()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Some(ymd(2023, 6, 10));
        for value in [
            "2023-06-10",
            "2023/06/10",
            "10/06/2023",
            "10 Jun 2023",
            "10 June 2023",
            "Jun 10, 2023",
            "June 10, 2023",
            "2023-06-10T08:30:00",
            "2023-06-10T08:30",
            "2023-06-10 08:30:00",
            "2023-06-10T08:30:00+02:00",
            " 2023-06-10 ",
        ] {
            assert_eq!(parse_date(value), expected, "{value}");
        }
    }

    #[test]
    fn test_parse_date_invalid() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2023-13-01"), None);
        assert_eq!(parse_date("2023-02-30"), None);
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        assert_eq!(calculate_age_on(Some("1990-06-15"), ymd(2024, 6, 14)), 33);
        assert_eq!(calculate_age_on(Some("1990-06-15"), ymd(2024, 6, 15)), 34);
        assert_eq!(calculate_age_on(Some("1990-06-15"), ymd(2024, 12, 31)), 34);
    }

    #[test]
    fn test_age_unknown_is_zero() {
        assert_eq!(calculate_age_on(None, ymd(2024, 1, 1)), 0);
        assert_eq!(calculate_age_on(Some("not-a-date"), ymd(2024, 1, 1)), 0);
        assert_eq!(calculate_age_on(Some("2030-01-01"), ymd(2024, 1, 1)), 0);
        assert_eq!(calculate_age(None), 0);
    }

    #[test]
    fn test_age_leap_day_birthday() {
        assert_eq!(calculate_age_on(Some("2000-02-29"), ymd(2023, 2, 28)), 22);
        assert_eq!(calculate_age_on(Some("2000-02-29"), ymd(2023, 3, 1)), 23);
    }

    #[test]
    fn test_format_date_sentinels() {
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date(Some("")), "N/A");
        assert_eq!(format_date(Some("garbage")), "Invalid date");
    }

    #[test]
    fn test_format_date_short_form() {
        assert_eq!(format_date(Some("2023-06-10")), "Jun 10, 2023");
        assert_eq!(format_date(Some("2024-01-02")), "Jan 2, 2024");
    }

    proptest! {
        #[test]
        fn age_is_stable_and_bounded(
            year in 1900i32..2020,
            month in 1u32..=12,
            day in 1u32..=28,
            offset in 0i64..40_000,
        ) {
            let birth = ymd(year, month, day);
            let today = birth + chrono::Duration::days(offset);
            let text = birth.format("%Y-%m-%d").to_string();
            let age = calculate_age_on(Some(&text), today);
            prop_assert_eq!(age, calculate_age_on(Some(&text), today));
            prop_assert!(i64::from(age) * 365 <= offset);
            prop_assert!(i64::from(age + 1) * 366 > offset);
        }
    }
}
