//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core
//! services, rather than reading process-wide environment variables during
//! request handling, which behaves inconsistently in multi-threaded runtimes
//! and test harnesses.

use crate::constants::RECORDS_FILENAME;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig` rooted at the given data directory.
    ///
    /// The directory does not need to exist yet; it is created lazily on the
    /// first write through the repository.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the single JSON slot holding the stored patient sequence.
    pub fn records_path(&self) -> PathBuf {
        self.data_dir.join(RECORDS_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_path_is_under_data_dir() {
        let cfg = CoreConfig::new(PathBuf::from("/tmp/gastroplan"));
        assert_eq!(
            cfg.records_path(),
            PathBuf::from("/tmp/gastroplan").join(RECORDS_FILENAME)
        );
    }
}
