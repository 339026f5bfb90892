//! Command implementations. Each loads what it needs from the data directory
//! and returns a value for `main` to print.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clinic_format::{Trend, calculate_trend};
use clinic_history::{BillingOverview, PatientHistory, PracticeData};
use clinic_ingest::{DirectorySource, IngestError, load_table};
use clinic_model::{
    BillingRecord, DoctorRecord, HospitalRecord, PatientRecord, ProcedureRecord, TabularRecord,
};
use tracing::{debug, info, info_span};

use crate::logging::redact_value;

/// Practice data plus the datasets that failed to load.
pub struct LoadedPractice {
    pub data: PracticeData,
    pub failures: Vec<IngestError>,
}

/// What `datasets` reports for one resource.
#[derive(Debug)]
pub struct DatasetInfo {
    pub resource: &'static str,
    pub required: bool,
    pub outcome: DatasetOutcome,
}

#[derive(Debug)]
pub enum DatasetOutcome {
    Loaded { records: usize, columns: Vec<String> },
    Missing,
    Failed(String),
}

pub fn load_practice(data_dir: &Path) -> Result<LoadedPractice> {
    if !data_dir.is_dir() {
        bail!("data directory not found: {}", data_dir.display());
    }
    let start = Instant::now();
    let (data, failures) = PracticeData::load_with_failures(&DirectorySource::new(data_dir));
    debug!(
        data_dir = %data_dir.display(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "practice data ready"
    );
    Ok(LoadedPractice { data, failures })
}

/// Derives the history of the first patient matching `query`.
pub fn run_history(
    data_dir: &Path,
    query: &str,
    today: NaiveDate,
) -> Result<(Option<PatientHistory>, Vec<IngestError>)> {
    let span = info_span!("history", query = %redact_value(query));
    let _guard = span.enter();

    let loaded = load_practice(data_dir).context("load practice data")?;
    let history = PatientHistory::derive(&loaded.data, query, today);
    match &history {
        Some(found) => info!(
            patient_id = %redact_value(&found.patient.patient_id),
            procedures = found.procedures.len(),
            "patient found"
        ),
        None => info!("no patient matched"),
    }
    Ok((history, loaded.failures))
}

pub fn run_billing(
    data_dir: &Path,
    days: u32,
    today: NaiveDate,
) -> Result<(BillingOverview, Vec<IngestError>)> {
    let span = info_span!("billing", days);
    let _guard = span.enter();

    let loaded = load_practice(data_dir).context("load practice data")?;
    Ok((
        BillingOverview::compute(&loaded.data, days, today),
        loaded.failures,
    ))
}

/// Loads every resource as an untyped table and reports what was found.
pub fn run_datasets(data_dir: &Path) -> Result<Vec<DatasetInfo>> {
    if !data_dir.is_dir() {
        bail!("data directory not found: {}", data_dir.display());
    }
    let source = DirectorySource::new(data_dir);
    let resources = [
        (PatientRecord::RESOURCE, true),
        (ProcedureRecord::RESOURCE, true),
        (BillingRecord::RESOURCE, true),
        (HospitalRecord::RESOURCE, false),
        (DoctorRecord::RESOURCE, false),
    ];

    Ok(resources
        .into_iter()
        .map(|(resource, required)| {
            let outcome = match load_table(&source, resource) {
                Ok(table) => DatasetOutcome::Loaded {
                    records: table.len(),
                    columns: table.headers,
                },
                Err(IngestError::NotFound { .. }) => DatasetOutcome::Missing,
                Err(err) => DatasetOutcome::Failed(err.to_string()),
            };
            DatasetInfo {
                resource,
                required,
                outcome,
            }
        })
        .collect())
}

pub fn run_trend(current: f64, previous: f64) -> Trend {
    calculate_trend(current, previous)
}
