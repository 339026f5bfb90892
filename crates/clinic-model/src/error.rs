use thiserror::Error;

/// Errors raised while converting a parsed row into a typed record.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// A column declared as numeric held a non-numeric value.
    #[error("column '{column}' expects a number, found '{value}'")]
    NotNumeric { column: String, value: String },

    /// A required identifier column was empty.
    #[error("column '{column}' is required but empty")]
    EmptyIdentifier { column: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
