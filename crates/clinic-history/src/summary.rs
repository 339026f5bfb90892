//! Natural-language summary of a patient's visits.

use std::borrow::Borrow;

use chrono::NaiveDate;
use clinic_format::{calculate_age_on, format_date, parse_date};
use clinic_model::{PatientRecord, ProcedureRecord};

const UNKNOWN: &str = "unknown";

/// Builds the paragraph shown above a patient's procedure history.
///
/// Returns an empty string when the patient has no procedures. Missing
/// fields render as empty text.
pub fn generate_patient_summary<P>(
    patient: &PatientRecord,
    procedures: &[P],
    today: NaiveDate,
) -> String
where
    P: Borrow<ProcedureRecord>,
{
    let Some(latest) = most_recent(procedures) else {
        return String::new();
    };

    let mut sentences = Vec::with_capacity(4);
    sentences.push(format!(
        "{} {} is a {}-year-old {} patient who has visited our practice {} times.",
        patient.first_name.as_deref().unwrap_or_default(),
        patient.last_name.as_deref().unwrap_or_default(),
        calculate_age_on(patient.date_of_birth.as_deref(), today),
        lowercase(patient.gender.as_deref()),
        procedures.len(),
    ));
    sentences.push(format!(
        "Their most recent visit was on {} for a {}.",
        format_date(latest.date_of_service.as_deref()),
        lowercase(latest.procedure_description.as_deref()),
    ));
    if let Some((description, count)) = most_common(procedures) {
        sentences.push(format!(
            "The most common procedure they've undergone is {} ({count} times).",
            description.to_lowercase(),
        ));
    }
    sentences.push(format!(
        "Patient is covered by {} under the {} plan.",
        patient.medical_aid_name.as_deref().unwrap_or(UNKNOWN),
        patient.medical_aid_plan.as_deref().unwrap_or(UNKNOWN),
    ));

    sentences.join(" ")
}

fn lowercase(value: Option<&str>) -> String {
    value.unwrap_or_default().to_lowercase()
}

/// Latest procedure by date of service. Parsable dates beat unparsable ones;
/// ties keep the earlier row.
fn most_recent<P>(procedures: &[P]) -> Option<&ProcedureRecord>
where
    P: Borrow<ProcedureRecord>,
{
    let mut best: Option<(&ProcedureRecord, Option<NaiveDate>)> = None;
    for item in procedures {
        let procedure: &ProcedureRecord = item.borrow();
        let date = procedure.date_of_service.as_deref().and_then(parse_date);
        match best {
            Some((_, best_date)) if date <= best_date => {}
            _ => best = Some((procedure, date)),
        }
    }
    best.map(|(procedure, _)| procedure)
}

/// Most frequent description with its count; ties keep the first seen.
fn most_common<P>(procedures: &[P]) -> Option<(&str, usize)>
where
    P: Borrow<ProcedureRecord>,
{
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for description in procedures.iter().filter_map(|item| {
        let procedure: &ProcedureRecord = item.borrow();
        procedure.procedure_description.as_deref()
    }) {
        match tally.iter_mut().find(|(seen, _)| *seen == description) {
            Some((_, count)) => *count += 1,
            None => tally.push((description, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (description, count) in tally {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((description, count));
        }
    }
    best
}
