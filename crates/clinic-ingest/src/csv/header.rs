//! CSV header normalization and validation.

use std::collections::BTreeSet;

use crate::error::{IngestError, Result};

/// Normalizes a header value by trimming whitespace and a stray BOM.
///
/// Inner spaces and slashes are kept: `Medical Aid Scheme/Plan` stays as-is.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Builds the column list from a header row, rejecting empty and duplicate names.
pub fn parse_header_row<'a, I>(name: &str, fields: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = BTreeSet::new();
    let mut columns = Vec::new();
    for (position, field) in fields.into_iter().enumerate() {
        let column = normalize_header(field);
        if column.is_empty() {
            return Err(IngestError::EmptyColumnName {
                name: name.to_string(),
                position: position + 1,
            });
        }
        if !seen.insert(column.clone()) {
            return Err(IngestError::DuplicateColumn {
                name: name.to_string(),
                column,
            });
        }
        columns.push(column);
    }
    Ok(columns)
}
