//! Patient record persistence.
//!
//! The repository is an injected interface so the workflow and its callers
//! never depend on a concrete store. The provided implementation keeps the
//! whole stored sequence in a single JSON slot on disk.
//!
//! ## Failure model
//!
//! Reads never fail: a missing or unparsable slot is logged and treated as
//! an empty sequence, so a corrupted store degrades to "seed records only"
//! instead of surfacing an error. Writes propagate I/O and serialisation
//! errors to the caller.
//!
//! ## Single writer
//!
//! `append` is a read-modify-write without locking. Concurrent writers from
//! separate processes could race and lose an append; callers are expected to
//! share one repository per process.

use crate::config::CoreConfig;
use crate::error::{PatientError, PatientResult};
use crate::record::PatientRecord;
use crate::seed::seed_records;
use std::fs;
use std::sync::Arc;

/// Append-only store of finalised patient records.
///
/// No update or delete operation exists; records are immutable once
/// appended.
pub trait PatientRepository: Send + Sync {
    /// Append one record to the stored sequence.
    fn append(&self, record: PatientRecord) -> PatientResult<()>;

    /// All records: the fixed seed records first, in their fixed order,
    /// then stored records in insertion order.
    fn list_all(&self) -> Vec<PatientRecord>;

    /// The first record (seed or stored) with the given id, or `None`.
    /// Linear scan; record counts are expected to stay small.
    fn get_by_id(&self, id: &str) -> Option<PatientRecord>;
}

/// Repository backed by a single `patients.json` slot on disk.
#[derive(Clone, Debug)]
pub struct JsonFileRepository {
    cfg: Arc<CoreConfig>,
}

impl JsonFileRepository {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Read the stored sequence, substituting an empty one when the slot is
    /// missing or does not parse.
    fn read_stored(&self) -> Vec<PatientRecord> {
        let path = self.cfg.records_path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&contents) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    "ignoring unparsable patient store: {} - {}",
                    path.display(),
                    e
                );
                Vec::new()
            }
        }
    }
}

impl PatientRepository for JsonFileRepository {
    fn append(&self, record: PatientRecord) -> PatientResult<()> {
        let mut stored = self.read_stored();
        stored.push(record);

        fs::create_dir_all(self.cfg.data_dir()).map_err(PatientError::StorageDirCreation)?;
        let json = serde_json::to_string_pretty(&stored).map_err(PatientError::Serialization)?;
        fs::write(self.cfg.records_path(), json).map_err(PatientError::FileWrite)?;

        Ok(())
    }

    fn list_all(&self) -> Vec<PatientRecord> {
        let mut records = seed_records();
        records.extend(self.read_stored());
        records
    }

    fn get_by_id(&self, id: &str) -> Option<PatientRecord> {
        self.list_all().into_iter().find(|record| record.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_patient_record;
    use crate::intake::{IntakeField, IntakeForm};
    use chrono::Utc;
    use std::path::Path;
    use tempfile::TempDir;

    fn test_repository(data_dir: &Path) -> JsonFileRepository {
        JsonFileRepository::new(Arc::new(CoreConfig::new(data_dir.to_path_buf())))
    }

    fn test_record(name: &str) -> PatientRecord {
        let mut form = IntakeForm::new();
        form.update_field(IntakeField::FullName, name);
        build_patient_record(&form, Utc::now())
    }

    #[test]
    fn test_list_all_returns_seeds_for_empty_store() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repository = test_repository(temp_dir.path());

        let records = repository.list_all();
        assert_eq!(records.len(), seed_records().len());
    }

    #[test]
    fn test_append_then_list_positions_record_after_seeds() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repository = test_repository(temp_dir.path());

        let record = test_record("Jane Doe");
        repository.append(record.clone()).expect("append should succeed");

        let records = repository.list_all();
        let seed_count = seed_records().len();
        assert_eq!(records.len(), seed_count + 1);
        assert_eq!(records[seed_count], record);

        let occurrences = records.iter().filter(|r| r.id == record.id).count();
        assert_eq!(occurrences, 1, "appended record should appear exactly once");
    }

    #[test]
    fn test_appends_preserve_insertion_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repository = test_repository(temp_dir.path());

        let first = test_record("First Patient");
        let second = test_record("Second Patient");
        repository.append(first.clone()).expect("append should succeed");
        repository.append(second.clone()).expect("append should succeed");

        let records = repository.list_all();
        let seed_count = seed_records().len();
        assert_eq!(records[seed_count].id, first.id);
        assert_eq!(records[seed_count + 1].id, second.id);
    }

    #[test]
    fn test_get_by_id_finds_seed_and_stored_records() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repository = test_repository(temp_dir.path());

        let record = test_record("Jane Doe");
        repository.append(record.clone()).expect("append should succeed");

        let seed_id = &seed_records()[0].id;
        assert!(repository.get_by_id(seed_id).is_some());

        let found = repository.get_by_id(&record.id).expect("should find stored record");
        assert_eq!(found.name, "Jane Doe");
    }

    #[test]
    fn test_get_by_id_returns_none_for_unknown_id() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repository = test_repository(temp_dir.path());

        assert!(repository.get_by_id("nonexistent-id").is_none());
    }

    #[test]
    fn test_corrupted_store_degrades_to_seeds_only() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repository = test_repository(temp_dir.path());

        fs::create_dir_all(temp_dir.path()).expect("should create data dir");
        fs::write(repository.cfg.records_path(), "{not json [[[")
            .expect("should write corrupt slot");

        let records = repository.list_all();
        assert_eq!(records.len(), seed_records().len());
        assert!(repository.get_by_id("nonexistent-id").is_none());
    }

    #[test]
    fn test_append_over_corrupted_store_starts_fresh() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let repository = test_repository(temp_dir.path());

        fs::write(repository.cfg.records_path(), "{not json [[[")
            .expect("should write corrupt slot");

        let record = test_record("Jane Doe");
        repository.append(record.clone()).expect("append should succeed");

        let records = repository.list_all();
        assert_eq!(records.len(), seed_records().len() + 1);
        assert_eq!(repository.get_by_id(&record.id).unwrap().name, "Jane Doe");
    }

    #[test]
    fn test_stored_records_survive_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let record = {
            let repository = test_repository(temp_dir.path());
            let mut form = IntakeForm::new();
            form.update_field(IntakeField::FullName, "Round Trip");
            form.update_field(IntakeField::DateOfBirth, "1990-01-15");
            form.set_scan_uploaded(crate::categories::ScanCategory::ChestXray, "rt.dcm");
            let record = build_patient_record(&form, Utc::now());
            repository.append(record.clone()).expect("append should succeed");
            record
        };

        // A fresh repository over the same directory sees the same record.
        let repository = test_repository(temp_dir.path());
        let found = repository.get_by_id(&record.id).expect("should find record");
        assert_eq!(found, record);
    }
}
