//! Patient record builder.
//!
//! A pure transformation from an intake form snapshot to a persisted
//! `PatientRecord`. The builder never touches storage; the caller passes the
//! result to a repository.

use crate::constants::UNNAMED_PATIENT;
use crate::intake::IntakeForm;
use crate::record::{PatientRecord, RecordStatus};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Average year length used for age derivation.
const DAYS_PER_YEAR: f64 = 365.25;

/// Build a `PatientRecord` from an intake form snapshot.
///
/// - The age is derived from the form's date-of-birth string at build time;
///   an absent or unparseable date yields age 0. Future dates are accepted
///   as entered (garbage in, garbage out) and produce a negative age.
/// - The scan count is the number of checklist entries marked uploaded at
///   build time.
/// - An empty or whitespace-only name is replaced with a fixed fallback
///   rather than persisting an empty string.
///
/// This function has no side effects.
pub fn build_patient_record(form: &IntakeForm, now: DateTime<Utc>) -> PatientRecord {
    let today = now.date_naive();

    let date_of_birth = NaiveDate::parse_from_str(form.date_of_birth.trim(), "%Y-%m-%d").ok();
    let age = date_of_birth
        .map(|dob| derive_age(dob, today))
        .unwrap_or(0);

    let name = if form.full_name.trim().is_empty() {
        UNNAMED_PATIENT.to_string()
    } else {
        form.full_name.clone()
    };

    let scan_count = form
        .scan_checklist()
        .values()
        .filter(|entry| entry.uploaded)
        .count();

    PatientRecord {
        id: Uuid::new_v4().to_string(),
        name,
        medical_record_number: form.medical_record_number().to_string(),
        age,
        gender: form.gender,
        date_of_birth,
        last_activity: today,
        scan_count,
        simulation_count: 0,
        status: RecordStatus::Pending,
        history: form.history.clone(),
        scan_checklist: form.scan_checklist().clone(),
        lab_checklist: form.lab_checklist().clone(),
    }
}

/// Whole years between `dob` and `today` using a 365.25-day year, floored.
pub fn derive_age(dob: NaiveDate, today: NaiveDate) -> i64 {
    let days = (today - dob).num_days();
    (days as f64 / DAYS_PER_YEAR).floor() as i64
}
