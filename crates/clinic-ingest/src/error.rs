//! Error types for tabular data loading.

use std::path::PathBuf;

use clinic_model::ModelError;
use thiserror::Error;

/// Errors that can occur while retrieving or parsing a tabular resource.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Retrieval Errors ===
    /// Resource does not exist under the data directory.
    #[error("resource not found: {name} ({path})")]
    NotFound { name: String, path: PathBuf },

    /// Resource exists but could not be read.
    #[error("failed to read resource {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Resource exceeds the configured size limit.
    #[error("resource {name} is {size} bytes, exceeds limit of {max_size} bytes")]
    TooLarge {
        name: String,
        size: u64,
        max_size: u64,
    },

    /// Resource is not UTF-8 text.
    #[error("resource {name} uses unsupported encoding: {encoding}")]
    UnsupportedEncoding {
        name: String,
        encoding: &'static str,
    },

    /// Resource name is empty or escapes the data directory.
    #[error("invalid resource name '{name}'")]
    InvalidName { name: String },

    // === Parse Errors ===
    /// The tokenizer rejected the text.
    #[error("failed to parse {name} at line {line}: {message}")]
    Parse {
        name: String,
        line: u64,
        message: String,
    },

    /// A data row has more fields than the header row.
    #[error("{name} line {line} has {found} fields, header has {expected}")]
    TooManyFields {
        name: String,
        line: u64,
        found: usize,
        expected: usize,
    },

    /// A header cell is empty.
    #[error("{name} has an empty column name at position {position}")]
    EmptyColumnName { name: String, position: usize },

    /// The same column name appears twice in the header row.
    #[error("{name} has duplicate column '{column}'")]
    DuplicateColumn { name: String, column: String },

    /// A numeric column holds a non-numeric value.
    #[error("{name} line {line}: column '{column}' expects a number, found '{value}'")]
    NotNumeric {
        name: String,
        line: u64,
        column: String,
        value: String,
    },

    /// Required schema columns are absent from the header row.
    #[error("{name} is missing required columns: {}", .columns.join(", "))]
    MissingColumns { name: String, columns: Vec<String> },

    /// A parsed row could not be converted into its typed record.
    #[error("{name} row {row}: {source}")]
    Record {
        name: String,
        row: usize,
        #[source]
        source: ModelError,
    },
}

impl IngestError {
    /// True for failures to obtain the resource text.
    pub fn is_retrieval(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Read { .. }
                | Self::TooLarge { .. }
                | Self::UnsupportedEncoding { .. }
                | Self::InvalidName { .. }
        )
    }

    /// True for malformed tabular text.
    pub fn is_parse(&self) -> bool {
        !self.is_retrieval()
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::NotFound {
            name: "patients.csv".to_string(),
            path: PathBuf::from("/data/patients.csv"),
        };
        assert_eq!(
            err.to_string(),
            "resource not found: patients.csv (/data/patients.csv)"
        );
    }

    #[test]
    fn test_missing_columns_display() {
        let err = IngestError::MissingColumns {
            name: "billing.csv".to_string(),
            columns: vec!["Invoice / Claim ID".to_string(), "Billed Amount".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "billing.csv is missing required columns: Invoice / Claim ID, Billed Amount"
        );
        assert!(err.is_parse());
    }

    #[test]
    fn test_error_classification() {
        let err = IngestError::InvalidName {
            name: "../secrets".to_string(),
        };
        assert!(err.is_retrieval());
        assert!(!err.is_parse());
    }
}
