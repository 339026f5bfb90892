//! The derived patient history view.

use chrono::NaiveDate;
use clinic_format::{calculate_age_on, format_currency, format_date};
use clinic_model::{PatientRecord, ProcedureRecord, format_numeric};
use serde::Serialize;
use tracing::debug;

use crate::data::PracticeData;
use crate::search::{
    PaymentStatus, billing_for_procedure, doctor_for_provider, find_patient,
    hospital_for_location, procedures_for_patient,
};
use crate::summary::generate_patient_summary;

/// Shown for a procedure without a date of service.
pub const NO_DATE: &str = "No date";

/// Shown where billing has not supplied a value yet.
pub const NOT_BILLED: &str = "Not Available";

/// Everything displayed for one selected patient.
///
/// Derived from [`PracticeData`] on demand and never cached, so it always
/// reflects the loaded datasets.
#[derive(Debug, Clone, Serialize)]
pub struct PatientHistory {
    pub patient: PatientRecord,
    pub full_name: String,
    pub age: u32,
    pub date_of_birth: String,
    pub gender: String,
    /// "Name - Plan".
    pub medical_aid: String,
    pub medical_aid_number: String,
    pub dependant_code: String,
    pub summary: String,
    pub procedures: Vec<ProcedureLine>,
}

/// One row of the procedure history table.
#[derive(Debug, Clone, Serialize)]
pub struct ProcedureLine {
    pub procedure_id: String,
    pub date: String,
    pub description: String,
    pub diagnosis: String,
    pub location: String,
    pub provider: String,
    pub duration: String,
    pub cost: String,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
}

impl PatientHistory {
    /// Selects the first patient matching `query` and derives their history.
    ///
    /// Returns `None` when the query is blank or nobody matches.
    pub fn derive(data: &PracticeData, query: &str, today: NaiveDate) -> Option<Self> {
        let patient = find_patient(&data.patients.records, query)?;
        let procedures = procedures_for_patient(&data.procedures.records, &patient.patient_id);
        debug!(procedures = procedures.len(), "patient selected");

        let lines = procedures
            .iter()
            .map(|procedure| ProcedureLine::derive(data, procedure))
            .collect();

        Some(Self {
            full_name: patient.full_name(),
            age: calculate_age_on(patient.date_of_birth.as_deref(), today),
            date_of_birth: format_date(patient.date_of_birth.as_deref()),
            gender: text(patient.gender.as_deref()),
            medical_aid: format!(
                "{} - {}",
                text(patient.medical_aid_name.as_deref()),
                text(patient.medical_aid_plan.as_deref())
            ),
            medical_aid_number: text(patient.medical_aid_number.as_deref()),
            dependant_code: text(patient.dependant_code.as_deref()),
            summary: generate_patient_summary(patient, &procedures, today),
            procedures: lines,
            patient: patient.clone(),
        })
    }
}

impl ProcedureLine {
    fn derive(data: &PracticeData, procedure: &ProcedureRecord) -> Self {
        let billing = billing_for_procedure(&data.billing.records, &procedure.procedure_id);

        let date = match procedure.date_of_service.as_deref() {
            None | Some("") => NO_DATE.to_string(),
            Some(value) => format_date(Some(value)),
        };

        let location_id = procedure.location_id.as_deref().unwrap_or_default();
        let location = hospital_for_location(&data.hospitals.records, location_id)
            .and_then(|hospital| hospital.location_name.clone())
            .unwrap_or_else(|| location_id.to_string());

        let provider_id = procedure.provider_id.as_deref().unwrap_or_default();
        let provider = doctor_for_provider(&data.doctors.records, provider_id)
            .and_then(|doctor| doctor.provider_name.clone())
            .unwrap_or_else(|| provider_id.to_string());

        let duration = procedure
            .duration_minutes
            .map(|minutes| format!("{} min", format_numeric(minutes)))
            .unwrap_or_default();

        Self {
            procedure_id: procedure.procedure_id.clone(),
            date,
            description: text(procedure.procedure_description.as_deref()),
            diagnosis: text(procedure.diagnosis_description.as_deref()),
            location,
            provider,
            duration,
            cost: billing
                .and_then(|record| record.billed_amount)
                .map_or_else(|| NOT_BILLED.to_string(), format_currency),
            payment_status: PaymentStatus::from_billing(billing),
            payment_method: billing
                .and_then(|record| record.payment_method.clone())
                .unwrap_or_else(|| NOT_BILLED.to_string()),
        }
    }
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{billing, patient, procedure};
    use clinic_model::{Dataset, HospitalRecord};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn practice() -> PracticeData {
        let mut unbilled = procedure("PR002", "P001", "", "Blood Test");
        unbilled.date_of_service = None;
        unbilled.location_id = Some("L404".to_string());

        let mut outstanding = billing("INV2", "PR003", "2024-01-22", 1234.5);
        outstanding.outstanding_amount = Some(200.0);
        outstanding.payment_method = None;

        PracticeData {
            patients: Dataset::new(
                "patients.csv",
                vec![
                    patient("P001", "John", "Smith"),
                    patient("P002", "Sarah", "Johnson"),
                ],
            ),
            procedures: Dataset::new(
                "procedures.csv",
                vec![
                    procedure("PR001", "P001", "2023-06-10", "Checkup"),
                    unbilled,
                    procedure("PR003", "P001", "2024-01-22", "Chest X-Ray"),
                    procedure("PR004", "P002", "2023-11-05", "Dental Cleaning"),
                ],
            ),
            billing: Dataset::new(
                "billing.csv",
                vec![billing("INV1", "PR001", "2023-06-10", 850.0), outstanding],
            ),
            hospitals: Dataset::new(
                "hospitals.csv",
                vec![HospitalRecord {
                    location_id: "L001".to_string(),
                    location_name: Some("Mediclinic Sandton".to_string()),
                }],
            ),
            doctors: Dataset::empty(),
        }
    }

    #[test]
    fn derive_selects_patient_and_procedures() {
        let history = PatientHistory::derive(&practice(), "smith", today()).unwrap();
        assert_eq!(history.patient.patient_id, "P001");
        assert_eq!(history.full_name, "John Smith");
        assert_eq!(history.age, 43);
        assert_eq!(history.date_of_birth, "May 15, 1980");
        assert_eq!(history.medical_aid, "Health Guardian - Premium Plan");
        let ids: Vec<&str> = history
            .procedures
            .iter()
            .map(|line| line.procedure_id.as_str())
            .collect();
        assert_eq!(ids, vec!["PR001", "PR002", "PR003"]);
        assert!(history.summary.starts_with("John Smith is a 43-year-old"));
    }

    #[test]
    fn procedure_lines_join_billing_and_locations() {
        let history = PatientHistory::derive(&practice(), "john", today()).unwrap();
        let [paid, unbilled, outstanding] = history.procedures.as_slice() else {
            panic!("expected three procedure lines");
        };

        assert_eq!(paid.date, "Jun 10, 2023");
        assert_eq!(paid.location, "Mediclinic Sandton");
        assert_eq!(paid.provider, "D01");
        assert_eq!(paid.duration, "30 min");
        assert_eq!(paid.cost, "R\u{a0}850,00");
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert_eq!(paid.payment_method, "Medical Aid");

        assert_eq!(unbilled.date, NO_DATE);
        assert_eq!(unbilled.location, "L404");
        assert_eq!(unbilled.cost, "Not Available");
        assert_ne!(unbilled.cost, clinic_format::NOT_AVAILABLE);
        assert_eq!(unbilled.payment_status, PaymentStatus::Pending);

        assert_eq!(outstanding.cost, "R\u{a0}1\u{a0}234,50");
        assert_eq!(outstanding.payment_status, PaymentStatus::Outstanding);
        assert_eq!(outstanding.payment_method, NOT_BILLED);
    }

    #[test]
    fn derive_without_match_is_none() {
        assert!(PatientHistory::derive(&practice(), "nobody", today()).is_none());
        assert!(PatientHistory::derive(&practice(), "  ", today()).is_none());
    }

    #[test]
    fn patient_without_procedures_has_empty_summary() {
        let mut data = practice();
        data.procedures = Dataset::empty();
        let history = PatientHistory::derive(&data, "sarah", today()).unwrap();
        assert!(history.procedures.is_empty());
        assert_eq!(history.summary, "");
    }
}
