//! Tabular data loading for the clinic patient history.
//!
//! This crate fetches named resources (`patients.csv`, `procedures.csv`,
//! `billing.csv`, ...) and parses them into records.
//!
//! # Features
//!
//! - **Retrieval**: [`ResourceSource`] with directory and in-memory sources
//! - **Parsing**: header row plus comma-delimited rows with optional quoting,
//!   blank lines skipped
//! - **Type inference**: numeric literals become numbers, empty fields missing
//! - **Typed loading**: per-dataset schemas validate headers and column policies
//!
//! # Example
//!
//! ```ignore
//! use clinic_ingest::{DirectorySource, load_dataset, load_table};
//! use clinic_model::PatientRecord;
//!
//! let source = DirectorySource::new("data");
//! let patients = load_dataset::<PatientRecord, _>(&source)?;
//! let billing = load_table(&source, "billing.csv")?;
//! ```

mod csv;
mod error;
mod infer;
mod loader;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Parsing ===
pub use self::csv::{normalize_header, parse_table, parse_table_with_schema};

// === Type Inference ===
pub use infer::{convert_field, infer_scalar, is_numeric_literal, parse_number};

// === Loading ===
pub use loader::{load_dataset, load_dataset_from, load_table};

// === Retrieval ===
pub use source::{
    DEFAULT_DATA_DIR, DirectorySource, LoadOptions, MAX_RESOURCE_SIZE, MemorySource,
    ResourceSource, check_file_size_with_limit,
};
