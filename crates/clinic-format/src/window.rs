//! Trailing date windows for period comparisons.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::date::parse_date;

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The last `days` days up to and including `today`.
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// The window of the same length ending the day before this one starts.
    pub fn previous(&self) -> Self {
        let span = (self.end - self.start).num_days().unsigned_abs();
        let end = self.start.pred_opt().unwrap_or(NaiveDate::MIN);
        let start = end.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Parses `value` and checks it lies in the window; unparsable dates never do.
    pub fn contains_str(&self, value: &str) -> bool {
        parse_date(value).is_some_and(|date| self.contains(date))
    }
}

/// Keeps items whose date falls in the last `days` days up to `today`.
///
/// Items without a date, or with one that does not parse, are dropped.
pub fn filter_by_date_range<'a, T, F>(
    items: &'a [T],
    date_of: F,
    days: u32,
    today: NaiveDate,
) -> Vec<&'a T>
where
    F: Fn(&T) -> Option<&str>,
{
    filter_in_window(items, date_of, DateWindow::trailing(today, days))
}

/// Keeps items whose date falls inside `window`, preserving order.
pub fn filter_in_window<'a, T, F>(items: &'a [T], date_of: F, window: DateWindow) -> Vec<&'a T>
where
    F: Fn(&T) -> Option<&str>,
{
    items
        .iter()
        .filter(|item| date_of(*item).is_some_and(|value| window.contains_str(value)))
        .collect()
}
