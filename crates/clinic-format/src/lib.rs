//! Display derivations for the patient history.
//!
//! Pure helpers used by the history view and the CLI. None of them return
//! errors; bad input renders as a sentinel instead.

pub mod currency;
pub mod date;
pub mod trend;
pub mod window;

pub use currency::{CurrencyFormat, ZAR, format_currency};
pub use date::{
    INVALID_DATE, NOT_AVAILABLE, calculate_age, calculate_age_on, format_date, format_naive_date,
    parse_date, today,
};
pub use trend::{Trend, TrendDirection, UNDEFINED_CHANGE, calculate_trend};
pub use window::{DateWindow, filter_by_date_range, filter_in_window};
