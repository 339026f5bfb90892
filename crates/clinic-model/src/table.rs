#![deny(unsafe_code)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::value::CellValue;

static MISSING: CellValue = CellValue::Missing;

/// One row keyed by the verbatim header names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub cells: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    /// Returns the cell for `column`, or `Missing` when the column is absent.
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&MISSING)
    }

    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).to_text()
    }

    /// Identifier columns: present and non-empty.
    pub fn identifier(&self, column: &str) -> Result<String> {
        match self.text(column) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ModelError::EmptyIdentifier {
                column: column.to_string(),
            }),
        }
    }

    pub fn number(&self, column: &str) -> Result<Option<f64>> {
        match self.get(column) {
            CellValue::Missing => Ok(None),
            CellValue::Number(value) => Ok(Some(*value)),
            CellValue::Text(value) => Err(ModelError::NotNumeric {
                column: column.to_string(),
                value: value.clone(),
            }),
        }
    }
}

/// A parsed tabular resource: header row plus records in source order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            records: Vec::new(),
        }
    }

    pub fn push_record(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_columns_read_as_missing() {
        let record = Record::new();
        assert!(record.get("Patient ID").is_missing());
        assert_eq!(record.number("Billed Amount"), Ok(None));
    }

    #[test]
    fn text_in_numeric_column_is_rejected() {
        let mut record = Record::new();
        record.insert("Billed Amount", CellValue::Text("n/a".into()));
        assert_eq!(
            record.number("Billed Amount"),
            Err(ModelError::NotNumeric {
                column: "Billed Amount".into(),
                value: "n/a".into()
            })
        );
    }

    #[test]
    fn identifiers_must_be_non_empty() {
        let mut record = Record::new();
        record.insert("Patient ID", CellValue::Text("P001".into()));
        assert_eq!(record.identifier("Patient ID"), Ok("P001".to_string()));
        assert!(record.identifier("Location ID").is_err());
    }
}
