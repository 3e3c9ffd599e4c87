//! Intake workflow state machine.
//!
//! Tracks which of the three ordered intake steps is active and holds the
//! in-progress form. Navigation is fully permissive: steps never gate on
//! field completeness, and any step can be reached directly through the step
//! indicator. Finalisation is one-way and one-time; `submit` consumes the
//! workflow, and a workflow dropped without submitting leaves nothing
//! behind.

use crate::builder::build_patient_record;
use crate::error::PatientResult;
use crate::intake::{IntakeForm, IntakeStep};
use crate::record::PatientRecord;
use crate::repository::PatientRepository;
use chrono::Utc;

/// One intake editing session: the active step plus the form being edited.
#[derive(Debug, Clone)]
pub struct IntakeWorkflow {
    step: IntakeStep,
    form: IntakeForm,
}

impl IntakeWorkflow {
    /// Start a new workflow on the demographics step with an empty form.
    pub fn new() -> Self {
        Self {
            step: IntakeStep::Demographics,
            form: IntakeForm::new(),
        }
    }

    pub fn step(&self) -> IntakeStep {
        self.step
    }

    pub fn form(&self) -> &IntakeForm {
        &self.form
    }

    /// Mutable access to the form for field edits. Edits are held without
    /// loss across any sequence of step navigation.
    pub fn form_mut(&mut self) -> &mut IntakeForm {
        &mut self.form
    }

    /// Advance one step. A no-op on the last step.
    pub fn go_next(&mut self) {
        self.step = self.step.next();
    }

    /// Retreat one step. A no-op on the first step.
    pub fn go_previous(&mut self) {
        self.step = self.step.previous();
    }

    /// Jump directly to any step, regardless of the current step or field
    /// completeness.
    pub fn jump_to_step(&mut self, step: IntakeStep) {
        self.step = step;
    }

    /// Finalise the workflow: build a patient record from the current form
    /// snapshot, append it through the repository, and return it so the
    /// caller can navigate onwards with its id and name.
    ///
    /// Only available from the labs step, mirroring where the step indicator
    /// offers it; navigate there first (the steps themselves never gate on
    /// field completeness). Consumes the workflow; an intake form produces
    /// at most one record.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::SubmitOutsideFinalStep`] when called before
    /// the labs step, or a `PatientError` if the repository write fails.
    /// Building the record itself cannot fail: no field is mandatory and
    /// nothing is validated.
    pub fn submit(self, repository: &dyn PatientRepository) -> PatientResult<PatientRecord> {
        if self.step != IntakeStep::Labs {
            return Err(crate::PatientError::SubmitOutsideFinalStep);
        }

        let record = build_patient_record(&self.form, Utc::now());
        tracing::info!(
            "finalising intake for {} ({})",
            record.name,
            record.medical_record_number
        );
        repository.append(record.clone())?;
        Ok(record)
    }
}

impl Default for IntakeWorkflow {
    fn default() -> Self {
        Self::new()
    }
}
