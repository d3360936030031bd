//! # Record Store
//!
//! Owns the single backing file and its full-read/full-replace
//! contract. Every mutation re-reads and re-writes the whole file;
//! nothing is appended or patched in place, and no table state is
//! cached in memory between calls.
//!
//! The store also carries the serializing lock that mutating handlers
//! hold across their load+mutate+replace sequence. Without it two
//! concurrent adds would both load the same prior file state and the
//! second replace would silently discard the first record.

mod errors;

pub use errors::{StoreError, StoreResult};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::{Mutex, MutexGuard};

use crate::codec::{self, Table};

/// File-backed store for the student record table.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Create a store over the given backing file path.
    ///
    /// The file is not created eagerly; an absent file loads as an
    /// empty table.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire the update lock.
    ///
    /// Mutating handlers hold the returned guard across load, mutate
    /// and replace so that concurrent updates serialize instead of
    /// losing writes.
    pub async fn lock_for_update(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Read the whole backing file and parse it into a table.
    ///
    /// A missing file yields an empty table; any other read failure is
    /// an [`StoreError::Io`].
    pub fn load_all(&self) -> StoreResult<Table> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(codec::parse(&raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Table::default()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    /// Serialize the table and overwrite the backing file's full
    /// contents.
    pub fn replace_all(&self, table: &Table) -> StoreResult<()> {
        let raw = codec::serialize(table);
        fs::write(&self.path, raw).map_err(|e| StoreError::Io(e.to_string()))
    }

    /// The backing file's raw bytes, bypassing the codec.
    ///
    /// Whatever is on disk is reproduced verbatim, malformed content
    /// included. A missing file yields zero bytes.
    pub fn export_raw(&self) -> StoreResult<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    /// Overwrite the backing file byte-for-byte, bypassing the codec.
    ///
    /// No validation is applied; the caller owns the consequences of
    /// importing content that is not well-formed delimited text.
    pub fn import_raw(&self, bytes: &[u8]) -> StoreResult<()> {
        fs::write(&self.path, bytes).map_err(|e| StoreError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Record;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> RecordStore {
        RecordStore::new(temp.path().join("students.csv"))
    }

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let table = store.load_all().unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(store.path(), "").unwrap();

        let table = store.load_all().unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_replace_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let mut table = Table::default();
        table.push(record(&[("name", "Alice"), ("roll", "1"), ("marks", "90")]));
        store.replace_all(&table).unwrap();

        assert_eq!(store.load_all().unwrap(), table);
    }

    #[test]
    fn test_replace_empty_writes_default_header() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        store.replace_all(&Table::default()).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "name,roll,marks");
    }

    #[test]
    fn test_export_raw_is_verbatim() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        // Deliberately malformed content must pass through untouched.
        fs::write(store.path(), "not,a\nvalid csv,,,").unwrap();
        assert_eq!(store.export_raw().unwrap(), b"not,a\nvalid csv,,,");
    }

    #[test]
    fn test_export_raw_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        assert!(store.export_raw().unwrap().is_empty());
    }

    #[test]
    fn test_import_raw_overwrites_byte_for_byte() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(store.path(), "old contents").unwrap();

        store.import_raw(b"name,roll,marks\nBob,2,80").unwrap();
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "name,roll,marks\nBob,2,80"
        );

        let table = store.load_all().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].get("name"), Some("Bob"));
    }

    #[test]
    fn test_load_failure_is_io_error() {
        let temp = TempDir::new().unwrap();
        // A directory at the backing path fails the read with something
        // other than NotFound.
        let store = RecordStore::new(temp.path());
        assert!(matches!(store.load_all(), Err(StoreError::Io(_))));
    }
}
