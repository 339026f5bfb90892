//! Patient history derived from the loaded practice datasets.
//!
//! [`PracticeData`] holds the loaded datasets. Everything else is a pure
//! function of it: [`find_patient`] selects a patient, [`PatientHistory::derive`]
//! builds the view, and [`BillingOverview::compute`] compares billing periods.

mod billing;
mod data;
mod search;
mod summary;
#[cfg(test)]
mod test_support;
mod view;

pub use billing::{BillingOverview, PeriodTotals};
pub use data::PracticeData;
pub use search::{
    PaymentStatus, billing_for_procedure, doctor_for_provider, find_patient,
    hospital_for_location, procedures_for_patient,
};
pub use summary::generate_patient_summary;
pub use view::{NO_DATE, NOT_BILLED, PatientHistory, ProcedureLine};
