//! Error types for the core crate.
//!
//! Note there is deliberately no "invalid input" variant for intake fields:
//! the intake workflow is permissive and never rejects user-entered data.
//! Errors here cover storage and serialisation failures, plus the one
//! workflow precondition (finalisation is only offered from the last step).
//! Storage reads have no error variant at all: a missing or unparsable
//! store is absorbed by the repository and treated as empty.

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("failed to create data directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write patient store: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialise patient records: {0}")]
    Serialization(serde_json::Error),
    #[error("submit is only available from the labs step")]
    SubmitOutsideFinalStep,
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
