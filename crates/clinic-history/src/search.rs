//! Patient lookup and identifier-keyed relationship scans.

use std::fmt;

use clinic_model::{BillingRecord, DoctorRecord, HospitalRecord, PatientRecord, ProcedureRecord};
use serde::Serialize;

/// First patient whose "First Last" name contains `query`, ignoring case.
///
/// An empty or whitespace-only query selects nobody.
pub fn find_patient<'a>(patients: &'a [PatientRecord], query: &str) -> Option<&'a PatientRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    patients
        .iter()
        .find(|patient| patient.full_name().to_lowercase().contains(&needle))
}

/// Procedures whose `Patient ID` equals `patient_id`, in source order.
pub fn procedures_for_patient<'a>(
    procedures: &'a [ProcedureRecord],
    patient_id: &str,
) -> Vec<&'a ProcedureRecord> {
    procedures
        .iter()
        .filter(|procedure| procedure.patient_id == patient_id)
        .collect()
}

/// The billing record for a procedure, if one was issued.
pub fn billing_for_procedure<'a>(
    billing: &'a [BillingRecord],
    procedure_id: &str,
) -> Option<&'a BillingRecord> {
    billing
        .iter()
        .find(|record| record.procedure_id == procedure_id)
}

pub fn hospital_for_location<'a>(
    hospitals: &'a [HospitalRecord],
    location_id: &str,
) -> Option<&'a HospitalRecord> {
    hospitals
        .iter()
        .find(|hospital| hospital.location_id == location_id)
}

pub fn doctor_for_provider<'a>(
    doctors: &'a [DoctorRecord],
    provider_id: &str,
) -> Option<&'a DoctorRecord> {
    doctors
        .iter()
        .find(|doctor| doctor.provider_id == provider_id)
}

/// Settlement state of a procedure's bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentStatus {
    Paid,
    Outstanding,
    /// No billing record yet.
    Pending,
}

impl PaymentStatus {
    pub fn from_billing(billing: Option<&BillingRecord>) -> Self {
        match billing {
            None => PaymentStatus::Pending,
            Some(record) if record.outstanding_amount.unwrap_or(0.0) > 0.0 => {
                PaymentStatus::Outstanding
            }
            Some(_) => PaymentStatus::Paid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Outstanding => "Outstanding",
            PaymentStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
