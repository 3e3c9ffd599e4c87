//! Persisted patient record types.
//!
//! A `PatientRecord` is created exactly once, when an intake workflow is
//! finalised, and is never mutated or deleted by this crate afterwards.
//! Records are serialised as plain JSON with the field names below; there is
//! no schema version field.

use crate::categories::{LabCategory, ScanCategory};
use crate::intake::ScanUpload;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Patient gender as recorded on the intake form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    /// Parse a gender from user-supplied text, case-insensitively.
    ///
    /// Anything that is not recognisably male or female maps to `Other`;
    /// the intake workflow never rejects input.
    pub fn parse_permissive(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Lifecycle status of a patient record.
///
/// Always `Pending` at creation; later transitions are managed outside this
/// crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Pending,
    Active,
    Completed,
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Active => "active",
            RecordStatus::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// The five free-text narrative fields collected on the demographics step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalHistory {
    pub weight_history: String,
    pub comorbidities: String,
    pub surgical_history: String,
    pub medications: String,
    pub psychosocial_history: String,
}

/// A finalised, persisted patient record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Generated identifier, unique per record (UUID v4).
    pub id: String,
    pub name: String,
    pub medical_record_number: String,
    /// Whole years derived from the date of birth at creation time; 0 when
    /// the date of birth was absent or unparseable.
    pub age: i64,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    /// Date of the most recent activity; the creation date for new records.
    pub last_activity: NaiveDate,
    /// Number of scan checklist entries marked uploaded at creation time.
    pub scan_count: usize,
    /// Number of simulations run against this record; 0 at creation.
    pub simulation_count: usize,
    pub status: RecordStatus,
    /// Copy of the intake narrative fields, not a reference.
    pub history: MedicalHistory,
    /// Copy of the intake scan checklist.
    pub scan_checklist: BTreeMap<ScanCategory, ScanUpload>,
    /// Copy of the intake lab checklist.
    pub lab_checklist: BTreeMap<LabCategory, String>,
}
