//! In-progress intake form data.
//!
//! An `IntakeForm` holds everything a clinician enters across the three
//! intake steps. Every operation here is infallible: the intake policy is
//! deliberately permissive, so no field is mandatory, no format is checked,
//! and there is no validation-error path. The form is transient; dropping it
//! without finalising discards the data, and nothing partial is persisted.

use crate::categories::{LabCategory, ScanCategory};
use crate::record::{Gender, MedicalHistory};
use chrono::{Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The three ordered steps of the intake workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntakeStep {
    Demographics,
    Scans,
    Labs,
}

impl IntakeStep {
    /// 1-based step number as shown in the step indicator.
    pub fn number(self) -> u8 {
        match self {
            IntakeStep::Demographics => 1,
            IntakeStep::Scans => 2,
            IntakeStep::Labs => 3,
        }
    }

    /// The following step, clamped at the last one.
    pub(crate) fn next(self) -> Self {
        match self {
            IntakeStep::Demographics => IntakeStep::Scans,
            IntakeStep::Scans | IntakeStep::Labs => IntakeStep::Labs,
        }
    }

    /// The preceding step, clamped at the first one.
    pub(crate) fn previous(self) -> Self {
        match self {
            IntakeStep::Labs => IntakeStep::Scans,
            IntakeStep::Scans | IntakeStep::Demographics => IntakeStep::Demographics,
        }
    }
}

/// The editable free-text fields of an intake form.
///
/// A closed enumeration so field updates cannot invent new fields. Gender
/// has its own setter because it is not free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeField {
    FullName,
    DateOfBirth,
    WeightHistory,
    Comorbidities,
    SurgicalHistory,
    Medications,
    PsychosocialHistory,
}

/// Per-category scan checklist entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanUpload {
    /// Name of the attached file, empty until one is attached.
    pub reference_name: String,
    pub uploaded: bool,
}

/// The in-progress intake form.
///
/// The medical record number is generated once at construction and is
/// immutable thereafter. Both checklists are populated with their full fixed
/// category sets at construction; no operation can add or remove a category.
#[derive(Debug, Clone)]
pub struct IntakeForm {
    medical_record_number: String,
    pub full_name: String,
    /// Accepted as-is; parsed only at finalisation time.
    pub date_of_birth: String,
    pub gender: Gender,
    pub history: MedicalHistory,
    scan_checklist: BTreeMap<ScanCategory, ScanUpload>,
    lab_checklist: BTreeMap<LabCategory, String>,
}

impl IntakeForm {
    /// Create an empty form with a freshly generated medical record number.
    pub fn new() -> Self {
        Self {
            medical_record_number: generate_medical_record_number(),
            full_name: String::new(),
            date_of_birth: String::new(),
            gender: Gender::default(),
            history: MedicalHistory::default(),
            scan_checklist: ScanCategory::ALL
                .into_iter()
                .map(|category| (category, ScanUpload::default()))
                .collect(),
            lab_checklist: LabCategory::ALL
                .into_iter()
                .map(|category| (category, String::new()))
                .collect(),
        }
    }

    pub fn medical_record_number(&self) -> &str {
        &self.medical_record_number
    }

    pub fn scan_checklist(&self) -> &BTreeMap<ScanCategory, ScanUpload> {
        &self.scan_checklist
    }

    pub fn lab_checklist(&self) -> &BTreeMap<LabCategory, String> {
        &self.lab_checklist
    }

    /// Replace one free-text field's value. Never validates the format;
    /// dates and names are accepted as entered.
    pub fn update_field(&mut self, field: IntakeField, value: impl Into<String>) {
        let value = value.into();
        match field {
            IntakeField::FullName => self.full_name = value,
            IntakeField::DateOfBirth => self.date_of_birth = value,
            IntakeField::WeightHistory => self.history.weight_history = value,
            IntakeField::Comorbidities => self.history.comorbidities = value,
            IntakeField::SurgicalHistory => self.history.surgical_history = value,
            IntakeField::Medications => self.history.medications = value,
            IntakeField::PsychosocialHistory => self.history.psychosocial_history = value,
        }
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    /// Flip the uploaded flag for one scan category, independently of the
    /// other categories.
    pub fn toggle_scan_uploaded(&mut self, category: ScanCategory) {
        if let Some(entry) = self.scan_checklist.get_mut(&category) {
            entry.uploaded = !entry.uploaded;
        }
    }

    /// Record a file attachment for one scan category.
    ///
    /// Idempotently sets the uploaded flag; attaching a second file for the
    /// same category replaces the reference name but never toggles the flag
    /// back off.
    pub fn set_scan_uploaded(&mut self, category: ScanCategory, reference_name: impl Into<String>) {
        if let Some(entry) = self.scan_checklist.get_mut(&category) {
            entry.reference_name = reference_name.into();
            entry.uploaded = true;
        }
    }

    /// Replace the free-text result for one lab category.
    pub fn update_lab_result(&mut self, category: LabCategory, text: impl Into<String>) {
        if let Some(result) = self.lab_checklist.get_mut(&category) {
            *result = text.into();
        }
    }
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a medical record number of the form `P-<year>-<NNN>`.
fn generate_medical_record_number() -> String {
    let year = Utc::now().year();
    let suffix: u32 = rand::thread_rng().gen_range(100..1000);
    format!("P-{year}-{suffix}")
}
