//! File-backed record store
//!
//! Loads the bounded record set from the backing file and writes it back.
//! Delegates line format concerns to the record_format module.
//!
//! # Design
//!
//! The backing file is opened and closed for every discrete load or save;
//! no handle is held between operations. A save truncates the file and
//! rewrites every record, so a crash halfway through a save can leave a
//! truncated file behind.
//!
//! ```no_run
//! use atm_simulator::io::{RecordStore, StoreConfig};
//! use atm_simulator::core::AccountStore;
//!
//! let store = RecordStore::new(StoreConfig::default());
//! let mut records = store.load().unwrap();
//! records.deposit(0, rust_decimal::Decimal::ONE).unwrap();
//! store.save(&records).unwrap();
//! ```
//!
//! # Error Handling
//!
//! - Failing to open the file for reading is `StoreNotFound`
//! - A malformed line is `StoreCorrupt` and no records are returned
//! - Failing to create or write the file is `StoreWriteFailed`

use crate::core::{AccountStore, RecordSet, DEFAULT_CAPACITY};
use crate::io::record_format::{read_records, write_records};
use crate::types::AtmError;
use log::{debug, info, warn};
use std::fs::File;
use std::path::PathBuf;

/// Default location of the backing file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "text.txt";

/// Configuration for the record store
#[derive(Clone, Debug, PartialEq)]
pub struct StoreConfig {
    /// Path of the backing file
    pub path: PathBuf,
    /// Maximum number of records loaded into memory
    pub max_records: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_FILE),
            max_records: DEFAULT_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Create a new StoreConfig with custom values
    ///
    /// A zero `max_records` falls back to the default capacity.
    pub fn new(path: impl Into<PathBuf>, max_records: usize) -> Self {
        let default = Self::default();

        let max_records = if max_records == 0 {
            warn!(
                "Invalid max_records ({}), using default ({})",
                max_records, default.max_records
            );
            default.max_records
        } else {
            max_records
        };

        Self {
            path: path.into(),
            max_records,
        }
    }
}

/// Record store backed by a plain text file
#[derive(Debug, Clone)]
pub struct RecordStore {
    config: StoreConfig,
}

impl RecordStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }
}

impl AccountStore for RecordStore {
    /// Load up to `max_records` records from the backing file
    ///
    /// # Returns
    ///
    /// * `Ok(RecordSet)` in file order
    /// * `Err(AtmError::StoreNotFound)` if the file cannot be opened
    /// * `Err(AtmError::StoreCorrupt)` if any line before capacity is malformed
    fn load(&self) -> Result<RecordSet, AtmError> {
        let path = &self.config.path;
        debug!("Loading account records from {}", path.display());

        let file = File::open(path).map_err(|e| {
            warn!("Failed to open account file '{}': {}", path.display(), e);
            AtmError::store_not_found(path)
        })?;

        let records = read_records(file, self.config.max_records)?;
        info!(
            "Loaded {} account record(s) from {}",
            records.len(),
            path.display()
        );
        Ok(records)
    }

    /// Truncate the backing file and write every record back in order
    fn save(&self, records: &RecordSet) -> Result<(), AtmError> {
        let path = &self.config.path;

        let mut file =
            File::create(path).map_err(|e| AtmError::store_write_failed(path, e))?;
        write_records(records, &mut file).map_err(|e| AtmError::store_write_failed(path, e))?;

        debug!("Saved {} account record(s) to {}", records.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountRecord;
    use rust_decimal::Decimal;
    use std::fs;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    /// Helper function to create a temporary account file for testing
    fn create_temp_store(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn store_for(file: &NamedTempFile) -> RecordStore {
        RecordStore::new(StoreConfig::new(file.path(), 10))
    }

    #[test]
    fn test_config_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.path, PathBuf::from("text.txt"));
        assert_eq!(config.max_records, 10);
    }

    #[test]
    fn test_config_zero_capacity_falls_back() {
        let config = StoreConfig::new("accounts.txt", 0);
        assert_eq!(config.path, PathBuf::from("accounts.txt"));
        assert_eq!(config.max_records, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_load_reads_records() {
        let file = create_temp_store("1234,Alice,500.00\n5678,Bob,100.00\n");
        let records = store_for(&file).load().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records.get(0).unwrap().name, "Alice");
        assert_eq!(records.get(1).unwrap().balance, Decimal::new(10000, 2));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let store = RecordStore::new(StoreConfig::new(&path, 10));

        let result = store.load();
        assert_eq!(
            result,
            Err(AtmError::StoreNotFound {
                path: path.display().to_string()
            })
        );
    }

    #[test]
    fn test_load_honors_configured_capacity() {
        let file = create_temp_store("1,A,1.00\n2,B,2.00\n3,C,3.00\n");
        let store = RecordStore::new(StoreConfig::new(file.path(), 2));

        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records.capacity(), 2);
    }

    #[test]
    fn test_load_malformed_second_line_fails() {
        let file = create_temp_store("1234,Alice,500.00\ngarbage\n");
        let result = store_for(&file).load();
        assert!(matches!(result, Err(AtmError::StoreCorrupt { line: 2, .. })));
    }

    #[test]
    fn test_save_overwrites_file() {
        let file = create_temp_store("1234,Alice,500.00\n5678,Bob,100.00\n");
        let store = store_for(&file);

        let mut records = store.load().unwrap();
        records.withdraw(0, Decimal::new(50000, 2)).unwrap();
        store.save(&records).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "1234,Alice,0.00\n5678,Bob,100.00\n");
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(StoreConfig::new(dir.path().join("accounts.txt"), 10));

        let mut records = RecordSet::default();
        records
            .push(AccountRecord::new(1234, "Alice", Decimal::new(50000, 2)))
            .unwrap();
        records
            .push(AccountRecord::new(99, "Carol Smith", Decimal::new(1, 2)))
            .unwrap();

        store.save(&records).unwrap();
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn test_save_to_unwritable_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("accounts.txt");
        let store = RecordStore::new(StoreConfig::new(&path, 10));

        let result = store.save(&RecordSet::default());
        assert!(matches!(result, Err(AtmError::StoreWriteFailed { .. })));
    }
}
