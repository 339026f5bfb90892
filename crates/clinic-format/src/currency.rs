//! Currency formatting with a fixed locale convention.

/// Separators and symbol used to render an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    /// Placed between the symbol and the digits.
    pub symbol_separator: char,
    pub group_separator: char,
    pub decimal_separator: char,
}

/// South African rand as rendered in the `en-ZA` locale: `R 1 234,56`,
/// with non-breaking spaces.
pub const ZAR: CurrencyFormat = CurrencyFormat {
    symbol: "R",
    symbol_separator: '\u{a0}',
    group_separator: '\u{a0}',
    decimal_separator: ',',
};

impl CurrencyFormat {
    /// Formats `amount` with two decimals, grouped thousands, and the symbol
    /// in front. Negative amounts get a leading `-`.
    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return format!("{}{}{}", self.symbol, self.symbol_separator, amount);
        }

        let fixed = format!("{:.2}", amount.abs());
        let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let is_zero = whole.bytes().all(|b| b == b'0') && cents.bytes().all(|b| b == b'0');

        let mut out = String::with_capacity(fixed.len() + 8);
        if amount.is_sign_negative() && !is_zero {
            out.push('-');
        }
        out.push_str(self.symbol);
        out.push(self.symbol_separator);
        out.push_str(&group_digits(whole, self.group_separator));
        out.push(self.decimal_separator);
        out.push_str(cents);
        out
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len_utf8());
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats an amount in rand (`R 1 234,56`).
pub fn format_currency(amount: f64) -> String {
    ZAR.format(amount)
}
