//! CSV reading utilities.

mod header;
mod reader;

pub use header::normalize_header;
pub use reader::{parse_table, parse_table_with_schema};
