//! The loaded practice datasets.

use clinic_ingest::{IngestError, ResourceSource, load_dataset};
use clinic_model::{
    BillingRecord, Dataset, DoctorRecord, HospitalRecord, PatientRecord, ProcedureRecord,
    TabularRecord,
};
use tracing::{debug, error, info, info_span};

/// Every dataset the history view reads from.
///
/// Built once per load and never mutated; reloading builds a new value.
#[derive(Debug, Clone, Default)]
pub struct PracticeData {
    pub patients: Dataset<PatientRecord>,
    pub procedures: Dataset<ProcedureRecord>,
    pub billing: Dataset<BillingRecord>,
    pub hospitals: Dataset<HospitalRecord>,
    pub doctors: Dataset<DoctorRecord>,
}

impl PracticeData {
    /// Loads all datasets. A dataset that fails to load is logged and left
    /// empty so the rest of the view still renders.
    pub fn load<S>(source: &S) -> Self
    where
        S: ResourceSource + ?Sized,
    {
        Self::load_with_failures(source).0
    }

    /// Like [`PracticeData::load`], also returning the errors that emptied
    /// datasets. A missing optional dataset (hospitals, doctors) is not a failure.
    pub fn load_with_failures<S>(source: &S) -> (Self, Vec<IngestError>)
    where
        S: ResourceSource + ?Sized,
    {
        let span = info_span!("load_practice_data");
        let _guard = span.enter();

        let mut failures = Vec::new();
        let data = Self {
            patients: required(source, &mut failures),
            procedures: required(source, &mut failures),
            billing: required(source, &mut failures),
            hospitals: optional(source, &mut failures),
            doctors: optional(source, &mut failures),
        };
        info!(
            patients = data.patients.len(),
            procedures = data.procedures.len(),
            billing = data.billing.len(),
            hospitals = data.hospitals.len(),
            doctors = data.doctors.len(),
            failures = failures.len(),
            "practice data loaded"
        );
        (data, failures)
    }

    /// Record counts per resource, in load order.
    pub fn counts(&self) -> Vec<(&str, usize)> {
        vec![
            (self.patients.resource.as_str(), self.patients.len()),
            (self.procedures.resource.as_str(), self.procedures.len()),
            (self.billing.resource.as_str(), self.billing.len()),
            (self.hospitals.resource.as_str(), self.hospitals.len()),
            (self.doctors.resource.as_str(), self.doctors.len()),
        ]
    }
}

fn required<T, S>(source: &S, failures: &mut Vec<IngestError>) -> Dataset<T>
where
    T: TabularRecord,
    S: ResourceSource + ?Sized,
{
    match load_dataset::<T, S>(source) {
        Ok(dataset) => dataset,
        Err(err) => {
            error!(resource = T::RESOURCE, error = %err, "failed to load dataset");
            failures.push(err);
            Dataset::empty()
        }
    }
}

fn optional<T, S>(source: &S, failures: &mut Vec<IngestError>) -> Dataset<T>
where
    T: TabularRecord,
    S: ResourceSource + ?Sized,
{
    match load_dataset::<T, S>(source) {
        Ok(dataset) => dataset,
        Err(IngestError::NotFound { .. }) => {
            debug!(resource = T::RESOURCE, "optional dataset not present");
            Dataset::empty()
        }
        Err(err) => {
            error!(resource = T::RESOURCE, error = %err, "failed to load dataset");
            failures.push(err);
            Dataset::empty()
        }
    }
}
