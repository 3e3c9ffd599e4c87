//! Constants used throughout the core crate.

/// Default directory for patient data storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "gastroplan_data";

/// Filename of the single slot holding the stored patient record sequence.
pub const RECORDS_FILENAME: &str = "patients.json";

/// Name substituted for a patient record when the intake form's name field is empty.
pub const UNNAMED_PATIENT: &str = "Unnamed Patient";
