//! Typed records for each practice dataset.
//!
//! Field names follow the source CSV headers. Identifier-like columns
//! (patient IDs, medical aid numbers, practice numbers) are declared as text
//! so that leading zeros and long digit strings survive loading.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{ColumnSpec, Schema};
use crate::table::Record;

/// A record type loadable from one conventional tabular resource.
pub trait TabularRecord: Sized {
    /// Resource name the dataset is published under, e.g. `patients.csv`.
    const RESOURCE: &'static str;

    fn schema() -> &'static Schema;

    fn from_record(record: &Record) -> Result<Self>;
}

pub mod columns {
    pub const PATIENT_ID: &str = "Patient ID";
    pub const PATIENT_FIRST_NAME: &str = "Patient First Name";
    pub const PATIENT_LAST_NAME: &str = "Patient Last Name";
    pub const PATIENT_DATE_OF_BIRTH: &str = "Patient Date of Birth";
    pub const PATIENT_GENDER: &str = "Patient Gender";
    pub const MEDICAL_AID_NAME: &str = "Medical Aid Name";
    pub const MEDICAL_AID_PLAN: &str = "Medical Aid Scheme/Plan";
    pub const MEDICAL_AID_NUMBER: &str = "Medical Aid Number";
    pub const DEPENDANT_CODE: &str = "Dependant Code";

    pub const PROCEDURE_RECORD_ID: &str = "Procedure Record ID";
    pub const PROVIDER_ID: &str = "Provider ID";
    pub const LOCATION_ID: &str = "Location ID";
    pub const DATE_OF_SERVICE: &str = "Date of Service";
    pub const PROCEDURE_CODE: &str = "Procedure Code";
    pub const PROCEDURE_DESCRIPTION: &str = "Procedure Description";
    pub const DIAGNOSIS_CODE: &str = "Diagnosis Code";
    pub const DIAGNOSIS_DESCRIPTION: &str = "Diagnosis Description";
    pub const DURATION_MINUTES: &str = "Duration (Minutes)";
    pub const TIME_UNITS: &str = "Time Units";
    pub const MODIFIERS: &str = "Modifiers";
    pub const ASA_CLASS: &str = "ASA Physical Status Class";
    pub const REFERRING_DOCTOR: &str = "Referring Doctor Name/Number";

    pub const INVOICE_ID: &str = "Invoice / Claim ID";
    pub const DATE_BILLED: &str = "Date Billed / Claim Submit Date";
    pub const BILLED_AMOUNT: &str = "Billed Amount";
    pub const MEDICAL_AID_TARIFF: &str = "Medical Aid Tariff";
    pub const MBT_PERCENTAGE: &str = "MBT Percentage";
    pub const PAID_MEDICAL_AID: &str = "Amount Paid - Medical Aid";
    pub const DATE_PAID_MEDICAL_AID: &str = "Date Paid - Medical Aid";
    pub const PATIENT_PORTION: &str = "Patient Portion";
    pub const PAID_PATIENT: &str = "Amount Paid - Patient";
    pub const DATE_PAID_PATIENT: &str = "Date Paid - Patient";
    pub const OUTSTANDING_AMOUNT: &str = "Outstanding Amount";
    pub const REJECTION_REASON: &str = "Rejection Code / Reason";
    pub const WRITE_OFF_AMOUNT: &str = "Write-off Amount";
    pub const WRITE_OFF_REASON: &str = "Write-off Reason";
    pub const PAYMENT_METHOD: &str = "Payment Method";

    pub const LOCATION_NAME: &str = "Location Name";

    pub const PROVIDER_NAME: &str = "Provider Name";
    pub const PROVIDER_PRACTICE_NUMBER: &str = "Provider Practice Number";
    pub const SPECIALTY: &str = "Specialty";
}

use columns as col;

pub static PATIENT_SCHEMA: Schema = Schema {
    name: "patients",
    columns: &[
        ColumnSpec::text(col::PATIENT_ID),
        ColumnSpec::text(col::PATIENT_FIRST_NAME),
        ColumnSpec::text(col::PATIENT_LAST_NAME),
        ColumnSpec::text(col::PATIENT_DATE_OF_BIRTH).optional(),
        ColumnSpec::text(col::PATIENT_GENDER).optional(),
        ColumnSpec::text(col::MEDICAL_AID_NAME).optional(),
        ColumnSpec::text(col::MEDICAL_AID_PLAN).optional(),
        ColumnSpec::text(col::MEDICAL_AID_NUMBER).optional(),
        ColumnSpec::text(col::DEPENDANT_CODE).optional(),
    ],
};

pub static PROCEDURE_SCHEMA: Schema = Schema {
    name: "procedures",
    columns: &[
        ColumnSpec::text(col::PROCEDURE_RECORD_ID),
        ColumnSpec::text(col::PROVIDER_ID).optional(),
        ColumnSpec::text(col::PATIENT_ID),
        ColumnSpec::text(col::LOCATION_ID).optional(),
        ColumnSpec::text(col::DATE_OF_SERVICE),
        ColumnSpec::text(col::PROCEDURE_CODE).optional(),
        ColumnSpec::text(col::PROCEDURE_DESCRIPTION),
        ColumnSpec::text(col::DIAGNOSIS_CODE).optional(),
        ColumnSpec::text(col::DIAGNOSIS_DESCRIPTION).optional(),
        ColumnSpec::number(col::DURATION_MINUTES).optional(),
        ColumnSpec::number(col::TIME_UNITS).optional(),
        ColumnSpec::text(col::MODIFIERS).optional(),
        ColumnSpec::text(col::ASA_CLASS).optional(),
        ColumnSpec::text(col::REFERRING_DOCTOR).optional(),
    ],
};

pub static BILLING_SCHEMA: Schema = Schema {
    name: "billing",
    columns: &[
        ColumnSpec::text(col::INVOICE_ID),
        ColumnSpec::text(col::PROCEDURE_RECORD_ID),
        ColumnSpec::text(col::DATE_BILLED).optional(),
        ColumnSpec::number(col::BILLED_AMOUNT),
        ColumnSpec::number(col::MEDICAL_AID_TARIFF).optional(),
        ColumnSpec::number(col::MBT_PERCENTAGE).optional(),
        ColumnSpec::number(col::PAID_MEDICAL_AID).optional(),
        ColumnSpec::text(col::DATE_PAID_MEDICAL_AID).optional(),
        ColumnSpec::number(col::PATIENT_PORTION).optional(),
        ColumnSpec::number(col::PAID_PATIENT).optional(),
        ColumnSpec::text(col::DATE_PAID_PATIENT).optional(),
        ColumnSpec::number(col::OUTSTANDING_AMOUNT).optional(),
        ColumnSpec::text(col::REJECTION_REASON).optional(),
        ColumnSpec::number(col::WRITE_OFF_AMOUNT).optional(),
        ColumnSpec::text(col::WRITE_OFF_REASON).optional(),
        ColumnSpec::text(col::PAYMENT_METHOD).optional(),
    ],
};

pub static HOSPITAL_SCHEMA: Schema = Schema {
    name: "hospitals",
    columns: &[
        ColumnSpec::text(col::LOCATION_ID),
        ColumnSpec::text(col::LOCATION_NAME),
    ],
};

pub static DOCTOR_SCHEMA: Schema = Schema {
    name: "doctors",
    columns: &[
        ColumnSpec::text(col::PROVIDER_ID),
        ColumnSpec::text(col::PROVIDER_NAME),
        ColumnSpec::text(col::PROVIDER_PRACTICE_NUMBER).optional(),
        ColumnSpec::text(col::SPECIALTY).optional(),
    ],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub medical_aid_name: Option<String>,
    pub medical_aid_plan: Option<String>,
    pub medical_aid_number: Option<String>,
    pub dependant_code: Option<String>,
}

impl PatientRecord {
    /// "First Last", with missing parts left empty.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }
}

impl TabularRecord for PatientRecord {
    const RESOURCE: &'static str = "patients.csv";

    fn schema() -> &'static Schema {
        &PATIENT_SCHEMA
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            patient_id: record.identifier(col::PATIENT_ID)?,
            first_name: record.text(col::PATIENT_FIRST_NAME),
            last_name: record.text(col::PATIENT_LAST_NAME),
            date_of_birth: record.text(col::PATIENT_DATE_OF_BIRTH),
            gender: record.text(col::PATIENT_GENDER),
            medical_aid_name: record.text(col::MEDICAL_AID_NAME),
            medical_aid_plan: record.text(col::MEDICAL_AID_PLAN),
            medical_aid_number: record.text(col::MEDICAL_AID_NUMBER),
            dependant_code: record.text(col::DEPENDANT_CODE),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureRecord {
    pub procedure_id: String,
    pub provider_id: Option<String>,
    pub patient_id: String,
    pub location_id: Option<String>,
    pub date_of_service: Option<String>,
    pub procedure_code: Option<String>,
    pub procedure_description: Option<String>,
    pub diagnosis_code: Option<String>,
    pub diagnosis_description: Option<String>,
    pub duration_minutes: Option<f64>,
    pub time_units: Option<f64>,
    pub modifiers: Option<String>,
    pub asa_class: Option<String>,
    pub referring_doctor: Option<String>,
}

impl TabularRecord for ProcedureRecord {
    const RESOURCE: &'static str = "procedures.csv";

    fn schema() -> &'static Schema {
        &PROCEDURE_SCHEMA
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            procedure_id: record.identifier(col::PROCEDURE_RECORD_ID)?,
            provider_id: record.text(col::PROVIDER_ID),
            patient_id: record.identifier(col::PATIENT_ID)?,
            location_id: record.text(col::LOCATION_ID),
            date_of_service: record.text(col::DATE_OF_SERVICE),
            procedure_code: record.text(col::PROCEDURE_CODE),
            procedure_description: record.text(col::PROCEDURE_DESCRIPTION),
            diagnosis_code: record.text(col::DIAGNOSIS_CODE),
            diagnosis_description: record.text(col::DIAGNOSIS_DESCRIPTION),
            duration_minutes: record.number(col::DURATION_MINUTES)?,
            time_units: record.number(col::TIME_UNITS)?,
            modifiers: record.text(col::MODIFIERS),
            asa_class: record.text(col::ASA_CLASS),
            referring_doctor: record.text(col::REFERRING_DOCTOR),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    pub invoice_id: String,
    pub procedure_id: String,
    pub date_billed: Option<String>,
    pub billed_amount: Option<f64>,
    pub medical_aid_tariff: Option<f64>,
    pub mbt_percentage: Option<f64>,
    pub paid_medical_aid: Option<f64>,
    pub date_paid_medical_aid: Option<String>,
    pub patient_portion: Option<f64>,
    pub paid_patient: Option<f64>,
    pub date_paid_patient: Option<String>,
    pub outstanding_amount: Option<f64>,
    pub rejection_reason: Option<String>,
    pub write_off_amount: Option<f64>,
    pub write_off_reason: Option<String>,
    pub payment_method: Option<String>,
}

impl BillingRecord {
    /// Medical aid and patient payments combined.
    pub fn total_paid(&self) -> f64 {
        self.paid_medical_aid.unwrap_or(0.0) + self.paid_patient.unwrap_or(0.0)
    }
}

impl TabularRecord for BillingRecord {
    const RESOURCE: &'static str = "billing.csv";

    fn schema() -> &'static Schema {
        &BILLING_SCHEMA
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            invoice_id: record.identifier(col::INVOICE_ID)?,
            procedure_id: record.identifier(col::PROCEDURE_RECORD_ID)?,
            date_billed: record.text(col::DATE_BILLED),
            billed_amount: record.number(col::BILLED_AMOUNT)?,
            medical_aid_tariff: record.number(col::MEDICAL_AID_TARIFF)?,
            mbt_percentage: record.number(col::MBT_PERCENTAGE)?,
            paid_medical_aid: record.number(col::PAID_MEDICAL_AID)?,
            date_paid_medical_aid: record.text(col::DATE_PAID_MEDICAL_AID),
            patient_portion: record.number(col::PATIENT_PORTION)?,
            paid_patient: record.number(col::PAID_PATIENT)?,
            date_paid_patient: record.text(col::DATE_PAID_PATIENT),
            outstanding_amount: record.number(col::OUTSTANDING_AMOUNT)?,
            rejection_reason: record.text(col::REJECTION_REASON),
            write_off_amount: record.number(col::WRITE_OFF_AMOUNT)?,
            write_off_reason: record.text(col::WRITE_OFF_REASON),
            payment_method: record.text(col::PAYMENT_METHOD),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalRecord {
    pub location_id: String,
    pub location_name: Option<String>,
}

impl TabularRecord for HospitalRecord {
    const RESOURCE: &'static str = "hospitals.csv";

    fn schema() -> &'static Schema {
        &HOSPITAL_SCHEMA
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            location_id: record.identifier(col::LOCATION_ID)?,
            location_name: record.text(col::LOCATION_NAME),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub provider_id: String,
    pub provider_name: Option<String>,
    pub practice_number: Option<String>,
    pub specialty: Option<String>,
}

impl TabularRecord for DoctorRecord {
    const RESOURCE: &'static str = "doctors.csv";

    fn schema() -> &'static Schema {
        &DOCTOR_SCHEMA
    }

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            provider_id: record.identifier(col::PROVIDER_ID)?,
            provider_name: record.text(col::PROVIDER_NAME),
            practice_number: record.text(col::PROVIDER_PRACTICE_NUMBER),
            specialty: record.text(col::SPECIALTY),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    fn record(cells: &[(&str, CellValue)]) -> Record {
        let mut record = Record::new();
        for (column, value) in cells {
            record.insert(*column, value.clone());
        }
        record
    }

    #[test]
    fn patient_from_record_keeps_text_identifiers() {
        let source = record(&[
            (col::PATIENT_ID, CellValue::Text("P001".into())),
            (col::PATIENT_FIRST_NAME, CellValue::Text("John".into())),
            (col::PATIENT_LAST_NAME, CellValue::Text("Smith".into())),
            (col::MEDICAL_AID_NUMBER, CellValue::Text("0123456789".into())),
        ]);
        let patient = PatientRecord::from_record(&source).expect("patient");
        assert_eq!(patient.patient_id, "P001");
        assert_eq!(patient.full_name(), "John Smith");
        assert_eq!(patient.medical_aid_number.as_deref(), Some("0123456789"));
        assert_eq!(patient.gender, None);
    }

    #[test]
    fn procedure_requires_patient_link() {
        let source = record(&[(col::PROCEDURE_RECORD_ID, CellValue::Text("PR001".into()))]);
        assert!(ProcedureRecord::from_record(&source).is_err());
    }

    #[test]
    fn billing_total_paid_sums_both_payers() {
        let source = record(&[
            (col::INVOICE_ID, CellValue::Text("INV1".into())),
            (col::PROCEDURE_RECORD_ID, CellValue::Text("PR001".into())),
            (col::BILLED_AMOUNT, CellValue::Number(250.0)),
            (col::PAID_MEDICAL_AID, CellValue::Number(200.0)),
            (col::PAID_PATIENT, CellValue::Number(25.5)),
        ]);
        let billing = BillingRecord::from_record(&source).expect("billing");
        assert_eq!(billing.billed_amount, Some(250.0));
        assert!((billing.total_paid() - 225.5).abs() < 1e-9);
    }

    #[test]
    fn schemas_declare_every_dataset_identifier() {
        assert_eq!(PatientRecord::schema().column(col::PATIENT_ID).map(|c| c.required), Some(true));
        assert!(BillingRecord::schema().column(col::PROCEDURE_RECORD_ID).is_some());
        assert_eq!(HospitalRecord::RESOURCE, "hospitals.csv");
    }
}
