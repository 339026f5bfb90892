//! Scalar cell values produced by the tabular loader.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One field of a parsed row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    /// Empty field.
    #[default]
    Missing,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Renders the value as text; numbers use their shortest decimal form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Missing => None,
            CellValue::Number(value) => Some(format_numeric(*value)),
            CellValue::Text(value) => Some(value.clone()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Number(value) => f.write_str(&format_numeric(*value)),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_without_trailing_zeros() {
        assert_eq!(format_numeric(250.0), "250");
        assert_eq!(format_numeric(85.5), "85.5");
        assert_eq!(format_numeric(-0.25), "-0.25");
    }

    #[test]
    fn missing_has_no_text() {
        assert_eq!(CellValue::Missing.to_text(), None);
        assert_eq!(CellValue::Missing.to_string(), "");
        assert_eq!(
            CellValue::Number(45.0).to_text(),
            Some("45".to_string())
        );
    }
}
