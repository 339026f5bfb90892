//! Scalar type inference for raw field text.

use clinic_model::{CellValue, ColumnPolicy};

/// Largest magnitude converted to a number; larger digit strings stay text.
const MAX_SAFE_MAGNITUDE: f64 = 9_007_199_254_740_992.0;

/// Returns true for decimal literals: optional `-`, digits with an optional
/// fraction (or a bare `.5` fraction), optional exponent.
pub fn is_numeric_literal(value: &str) -> bool {
    let trimmed = value.trim();
    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(idx) => (&unsigned[..idx], Some(&unsigned[idx + 1..])),
        None => (unsigned, None),
    };

    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => {
            !(int.is_empty() && frac.is_empty()) && all_digits(int) && all_digits(frac)
        }
        None => !mantissa.is_empty() && all_digits(mantissa),
    };
    let exponent_ok = match exponent {
        Some(exp) => {
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !digits.is_empty() && all_digits(digits)
        }
        None => true,
    };
    mantissa_ok && exponent_ok
}

fn all_digits(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a numeric literal within the safe integer range.
pub fn parse_number(value: &str) -> Option<f64> {
    if !is_numeric_literal(value) {
        return None;
    }
    let number = value.trim().parse::<f64>().ok()?;
    (number.is_finite() && number.abs() < MAX_SAFE_MAGNITUDE).then_some(number)
}

/// Empty → `Missing`, numeric literal → `Number`, anything else → `Text`.
pub fn infer_scalar(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Missing;
    }
    match parse_number(trimmed) {
        Some(number) => CellValue::Number(number),
        None => CellValue::Text(trimmed.to_string()),
    }
}

/// Applies a column policy to one raw field.
///
/// Returns the offending text when a `Number` column holds a non-numeric value.
pub fn convert_field(raw: &str, policy: ColumnPolicy) -> Result<CellValue, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(CellValue::Missing);
    }
    match policy {
        ColumnPolicy::Inferred => Ok(infer_scalar(trimmed)),
        ColumnPolicy::Text => Ok(CellValue::Text(trimmed.to_string())),
        ColumnPolicy::Number => trimmed
            .parse::<f64>()
            .ok()
            .filter(|_| is_numeric_literal(trimmed))
            .map(CellValue::Number)
            .ok_or_else(|| trimmed.to_string()),
    }
}
