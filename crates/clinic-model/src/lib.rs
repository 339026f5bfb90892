//! Data model for clinic patient history datasets.
//!
//! - [`CellValue`] / [`Record`] / [`Table`]: dynamically typed rows as produced
//!   by the tabular loader.
//! - [`Schema`] / [`ColumnSpec`] / [`ColumnPolicy`]: static column layouts
//!   declared per dataset.
//! - [`PatientRecord`], [`ProcedureRecord`], [`BillingRecord`],
//!   [`HospitalRecord`], [`DoctorRecord`]: typed records related by
//!   identifier value.

pub mod dataset;
pub mod error;
pub mod records;
pub mod schema;
pub mod table;
pub mod value;

pub use dataset::Dataset;
pub use error::{ModelError, Result};
pub use records::{
    BILLING_SCHEMA, BillingRecord, DOCTOR_SCHEMA, DoctorRecord, HOSPITAL_SCHEMA, HospitalRecord,
    PATIENT_SCHEMA, PROCEDURE_SCHEMA, PatientRecord, ProcedureRecord, TabularRecord, columns,
};
pub use schema::{ColumnPolicy, ColumnSpec, Schema};
pub use table::{Record, Table};
pub use value::{CellValue, format_numeric};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_serializes() {
        let mut table = Table::new("patients.csv", vec!["Patient ID".to_string()]);
        let mut record = Record::new();
        record.insert("Patient ID", CellValue::Text("P001".to_string()));
        table.push_record(record);
        let json = serde_json::to_string(&table).expect("serialize table");
        let round: Table = serde_json::from_str(&json).expect("deserialize table");
        assert_eq!(round.name, "patients.csv");
        assert_eq!(round.records[0].get("Patient ID").as_str(), Some("P001"));
    }
}
