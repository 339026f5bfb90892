//! Integration tests for loading practice datasets from a data directory.

use std::fs;

use clinic_ingest::{DirectorySource, IngestError, MemorySource, load_dataset, load_table};
use clinic_model::{BillingRecord, CellValue, PatientRecord, ProcedureRecord};
use tempfile::TempDir;

const PATIENTS: &str = "\
Patient ID,Patient First Name,Patient Last Name,Patient Date of Birth,Patient Gender,Medical Aid Name,Medical Aid Scheme/Plan,Medical Aid Number,Dependant Code
P001,John,Smith,1980-05-15,Male,Health Guardian,Premium Plan,0123456789,0
P002,Sarah,Johnson,1992-09-21,Female,MediCare Plus,Standard Cover,987654321,1

P003,Michael,Williams,1975-03-10,Male,National Health,Comprehensive,456789123,0
";

const PROCEDURES: &str = "\
Procedure Record ID,Provider ID,Patient ID,Location ID,Date of Service,Procedure Code,Procedure Description,Diagnosis Code,Diagnosis Description,Duration (Minutes),Time Units,Modifiers,ASA Physical Status Class,Referring Doctor Name/Number
PR001,D01,P001,L001,2023-06-10,A1234,Comprehensive General Checkup,Z00.00,General adult medical examination,45,3,,,
PR002,D01,P001,L001,2023-08-15,B2345,Blood Test - Complete Blood Count,Z01.89,Encounter for other specified special examinations,15,1,,,
PR004,D02,P002,L003,2023-11-05,D4567,Dental Cleaning,Z01.20,Encounter for dental examination and cleaning,60,4,,,
PR003,D03,P001,L002,2024-01-22,C3456,Chest X-Ray,R05,Cough,30,2,,\"II\",\"Dr Adams, 1234\"
";

fn data_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("write resource");
    }
    dir
}

#[test]
fn loads_typed_patients_in_row_order() {
    let dir = data_dir(&[("patients.csv", PATIENTS)]);
    let source = DirectorySource::new(dir.path());

    let patients = load_dataset::<PatientRecord, _>(&source).expect("load patients");

    assert_eq!(patients.resource, "patients.csv");
    let ids: Vec<&str> = patients.iter().map(|p| p.patient_id.as_str()).collect();
    assert_eq!(ids, vec!["P001", "P002", "P003"]);
    assert_eq!(
        patients.records[0].medical_aid_number.as_deref(),
        Some("0123456789")
    );
    assert_eq!(patients.records[1].dependant_code.as_deref(), Some("1"));
}

#[test]
fn filters_procedures_for_one_patient() {
    let dir = data_dir(&[("patients.csv", PATIENTS), ("procedures.csv", PROCEDURES)]);
    let source = DirectorySource::new(dir.path());

    let patients = load_dataset::<PatientRecord, _>(&source).expect("load patients");
    let procedures = load_dataset::<ProcedureRecord, _>(&source).expect("load procedures");
    assert_eq!(patients.len(), 3);
    assert_eq!(procedures.len(), 4);

    let john = &patients.records[0];
    let ids: Vec<&str> = procedures
        .iter()
        .filter(|proc| proc.patient_id == john.patient_id)
        .map(|proc| proc.procedure_id.as_str())
        .collect();
    assert_eq!(ids, vec!["PR001", "PR002", "PR003"]);

    let xray = &procedures.records[3];
    assert_eq!(xray.duration_minutes, Some(30.0));
    assert_eq!(xray.asa_class.as_deref(), Some("II"));
    assert_eq!(xray.referring_doctor.as_deref(), Some("Dr Adams, 1234"));
    assert_eq!(xray.modifiers, None);
}

#[test]
fn dynamic_table_keeps_verbatim_headers() {
    let source = MemorySource::new().with("patients.csv", PATIENTS);

    let table = load_table(&source, "patients.csv").expect("load table");

    assert_eq!(table.headers[6], "Medical Aid Scheme/Plan");
    assert_eq!(table.len(), 3);
    let first = &table.records[0];
    assert_eq!(first.get("Patient ID"), &CellValue::Text("P001".into()));
    assert_eq!(first.get("Medical Aid Number"), &CellValue::Number(123456789.0));
    assert_eq!(first.get("Dependant Code"), &CellValue::Number(0.0));
}

#[test]
fn reports_missing_resource_as_retrieval_error() {
    let dir = data_dir(&[]);
    let source = DirectorySource::new(dir.path());

    let err = load_dataset::<BillingRecord, _>(&source).unwrap_err();

    assert!(err.is_retrieval());
    assert!(matches!(err, IngestError::NotFound { .. }));
}

#[test]
fn reports_schema_mismatch_as_parse_error() {
    let source = MemorySource::new().with("billing.csv", "Invoice / Claim ID,Billed Amount\nI1,10\n");

    let err = load_dataset::<BillingRecord, _>(&source).unwrap_err();

    assert!(err.is_parse());
    match err {
        IngestError::MissingColumns { columns, .. } => {
            assert_eq!(columns, vec!["Procedure Record ID"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn reports_empty_identifier_with_row_number() {
    let source = MemorySource::new().with(
        "patients.csv",
        "Patient ID,Patient First Name,Patient Last Name\nP001,Ann,Lee\n,Bob,Ray\n",
    );

    let err = load_dataset::<PatientRecord, _>(&source).unwrap_err();

    assert!(matches!(err, IngestError::Record { row: 2, .. }));
}

#[test]
fn repeated_loads_reread_the_resource() {
    let dir = data_dir(&[("patients.csv", PATIENTS)]);
    let source = DirectorySource::new(dir.path());
    let first = load_dataset::<PatientRecord, _>(&source).expect("first load");

    fs::write(
        dir.path().join("patients.csv"),
        "Patient ID,Patient First Name,Patient Last Name\nP009,Zoe,Ng\n",
    )
    .expect("rewrite");
    let second = load_dataset::<PatientRecord, _>(&source).expect("second load");

    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 1);
    assert_eq!(second.records[0].patient_id, "P009");
}
