//! Fetch-and-parse entry points.
//!
//! Every call performs one retrieval and one parse; nothing is cached.

use std::time::Instant;

use clinic_model::{Dataset, Table, TabularRecord};
use tracing::info;

use crate::csv::{parse_table, parse_table_with_schema};
use crate::error::{IngestError, Result};
use crate::source::ResourceSource;

/// Loads a resource as a dynamically typed [`Table`].
pub fn load_table<S>(source: &S, name: &str) -> Result<Table>
where
    S: ResourceSource + ?Sized,
{
    let start = Instant::now();
    let text = source.fetch(name)?;
    let table = parse_table(name, &text)?;
    info!(
        resource = name,
        rows = table.len(),
        columns = table.headers.len(),
        duration_ms = start.elapsed().as_millis(),
        "loaded table"
    );
    Ok(table)
}

/// Loads `T`'s conventional resource into a typed dataset.
pub fn load_dataset<T, S>(source: &S) -> Result<Dataset<T>>
where
    T: TabularRecord,
    S: ResourceSource + ?Sized,
{
    load_dataset_from(source, T::RESOURCE)
}

/// Loads a named resource into a typed dataset, validated against `T`'s schema.
pub fn load_dataset_from<T, S>(source: &S, name: &str) -> Result<Dataset<T>>
where
    T: TabularRecord,
    S: ResourceSource + ?Sized,
{
    let start = Instant::now();
    let text = source.fetch(name)?;
    let table = parse_table_with_schema(name, &text, T::schema())?;
    let records = table
        .records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            T::from_record(record).map_err(|source| IngestError::Record {
                name: name.to_string(),
                row: idx + 1,
                source,
            })
        })
        .collect::<Result<Vec<T>>>()?;
    info!(
        resource = name,
        schema = T::schema().name,
        rows = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "loaded dataset"
    );
    Ok(Dataset::new(name, records))
}
