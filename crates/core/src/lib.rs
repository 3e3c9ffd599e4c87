//! # Gastroplan Core
//!
//! Core business logic for the Gastroplan bariatric surgery planning
//! service.
//!
//! This crate contains pure data operations and local persistence:
//! - The three-step patient intake workflow and its permissive form state
//! - The patient record builder (age and scan-count derivation)
//! - The seed-merged, append-only patient repository over a JSON slot
//!
//! **No API concerns**: HTTP servers, routing, or service interfaces belong
//! in the `gastroplan-api` crate.

pub mod builder;
pub mod categories;
pub mod config;
pub mod constants;
pub mod error;
pub mod intake;
pub mod record;
pub mod repository;
pub mod seed;
pub mod workflow;

pub use builder::build_patient_record;
pub use categories::{LabCategory, ScanCategory};
pub use config::CoreConfig;
pub use error::{PatientError, PatientResult};
pub use intake::{IntakeField, IntakeForm, IntakeStep, ScanUpload};
pub use record::{Gender, MedicalHistory, PatientRecord, RecordStatus};
pub use repository::{JsonFileRepository, PatientRepository};
pub use workflow::IntakeWorkflow;
