//! Delimited text parsing into [`Table`]s.

use ::csv::{ReaderBuilder, StringRecord};
use clinic_model::{Record, Schema, Table};

use crate::error::{IngestError, Result};
use crate::infer::convert_field;

use super::header::parse_header_row;

/// Parses comma-delimited text with a header row, inferring every column.
pub fn parse_table(name: &str, text: &str) -> Result<Table> {
    parse_table_inner(name, text, None)
}

/// Parses comma-delimited text, validating the header row against `schema`
/// and converting fields through the schema's column policies.
pub fn parse_table_with_schema(name: &str, text: &str, schema: &Schema) -> Result<Table> {
    parse_table_inner(name, text, Some(schema))
}

fn parse_table_inner(name: &str, text: &str, schema: Option<&Schema>) -> Result<Table> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut table: Option<Table> = None;
    let mut skipped = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(name, &e))?;
        if is_blank(&record) {
            skipped += 1;
            continue;
        }
        match table.as_mut() {
            None => {
                let headers = parse_header_row(name, record.iter())?;
                if let Some(schema) = schema {
                    let missing = schema.missing_columns(&headers);
                    if !missing.is_empty() {
                        return Err(IngestError::MissingColumns {
                            name: name.to_string(),
                            columns: missing,
                        });
                    }
                }
                table = Some(Table::new(name, headers));
            }
            Some(table) => {
                let row = convert_row(name, &table.headers, &record, schema)?;
                table.push_record(row);
            }
        }
    }

    if skipped > 0 {
        tracing::debug!(resource = name, skipped, "skipped blank lines");
    }

    match table {
        Some(table) => Ok(table),
        None => match schema {
            Some(schema) => Err(IngestError::MissingColumns {
                name: name.to_string(),
                columns: schema.missing_columns::<&str>(&[]),
            }),
            None => Ok(Table::new(name, Vec::new())),
        },
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn convert_row(
    name: &str,
    headers: &[String],
    record: &StringRecord,
    schema: Option<&Schema>,
) -> Result<Record> {
    let line = line_of(record);
    if record.len() > headers.len() {
        return Err(IngestError::TooManyFields {
            name: name.to_string(),
            line,
            found: record.len(),
            expected: headers.len(),
        });
    }

    let mut row = Record::new();
    for (idx, column) in headers.iter().enumerate() {
        let raw = record.get(idx).unwrap_or("");
        let policy = schema
            .map(|schema| schema.policy_for(column))
            .unwrap_or_default();
        let value = convert_field(raw, policy).map_err(|value| IngestError::NotNumeric {
            name: name.to_string(),
            line,
            column: column.clone(),
            value,
        })?;
        row.insert(column.clone(), value);
    }
    Ok(row)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, ::csv::Position::line)
}

fn csv_error(name: &str, error: &::csv::Error) -> IngestError {
    IngestError::Parse {
        name: name.to_string(),
        line: error.position().map_or(0, ::csv::Position::line),
        message: error.to_string(),
    }
}
