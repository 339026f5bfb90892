//! Record builders shared by the unit tests.

use clinic_model::{BillingRecord, PatientRecord, ProcedureRecord};

pub fn patient(id: &str, first: &str, last: &str) -> PatientRecord {
    PatientRecord {
        patient_id: id.to_string(),
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        date_of_birth: Some("1980-05-15".to_string()),
        gender: Some("Male".to_string()),
        medical_aid_name: Some("Health Guardian".to_string()),
        medical_aid_plan: Some("Premium Plan".to_string()),
        medical_aid_number: Some("123456789".to_string()),
        dependant_code: Some("0".to_string()),
    }
}

pub fn procedure(id: &str, patient_id: &str, date: &str, description: &str) -> ProcedureRecord {
    ProcedureRecord {
        procedure_id: id.to_string(),
        provider_id: Some("D01".to_string()),
        patient_id: patient_id.to_string(),
        location_id: Some("L001".to_string()),
        date_of_service: Some(date.to_string()),
        procedure_code: None,
        procedure_description: Some(description.to_string()),
        diagnosis_code: None,
        diagnosis_description: None,
        duration_minutes: Some(30.0),
        time_units: None,
        modifiers: None,
        asa_class: None,
        referring_doctor: None,
    }
}

pub fn billing(invoice: &str, procedure_id: &str, date: &str, amount: f64) -> BillingRecord {
    BillingRecord {
        invoice_id: invoice.to_string(),
        procedure_id: procedure_id.to_string(),
        date_billed: Some(date.to_string()),
        billed_amount: Some(amount),
        medical_aid_tariff: None,
        mbt_percentage: None,
        paid_medical_aid: Some(amount),
        date_paid_medical_aid: None,
        patient_portion: None,
        paid_patient: None,
        date_paid_patient: None,
        outstanding_amount: Some(0.0),
        rejection_reason: None,
        write_off_amount: None,
        write_off_reason: None,
        payment_method: Some("Medical Aid".to_string()),
    }
}
