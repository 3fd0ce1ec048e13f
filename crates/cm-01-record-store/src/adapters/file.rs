//! # File Record Store
//!
//! Durable backend: the three tables live in memory and every committed
//! transaction rewrites `records.json` in the data directory.
//!
//! ## Write Path
//!
//! 1. Serialize the post-transaction tables
//! 2. Write them to `records.json.tmp` (fsync when `sync_writes`)
//! 3. Rename over `records.json`
//!
//! The rename is the commit point. If any step fails the transaction rolls
//! back in memory, so memory and disk never disagree.
//!
//! ## Locking
//!
//! An exclusive `fs2` lock on `LOCK` keeps a second process from opening the
//! same directory. The lock is held for the lifetime of the store.

use crate::adapters::transaction::{CommitSink, TableTransaction};
use crate::domain::errors::StoreError;
use crate::domain::tables::{Snapshot, Tables};
use crate::ports::store::{RecordStore, StoreTransaction};
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const SNAPSHOT_FILE: &str = "records.json";
const SNAPSHOT_TMP_FILE: &str = "records.json.tmp";
const LOCK_FILE: &str = "LOCK";

/// Configuration for [`FileRecordStore`].
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    pub data_dir: PathBuf,
    /// fsync the snapshot before the rename (default: true).
    pub sync_writes: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            sync_writes: true,
        }
    }
}

impl FileStoreConfig {
    /// Config for tests (no fsync).
    pub fn for_testing(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            sync_writes: false,
        }
    }
}

struct SnapshotWriter {
    path: PathBuf,
    tmp_path: PathBuf,
    sync_writes: bool,
}

impl CommitSink for SnapshotWriter {
    fn persist(&self, tables: &Tables) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&tables.snapshot())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut file = File::create(&self.tmp_path)?;
        file.write_all(&bytes)?;
        if self.sync_writes {
            file.sync_all()?;
        }
        drop(file);

        fs::rename(&self.tmp_path, &self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "snapshot rename failed");
            StoreError::Io(e)
        })
    }
}

/// Record store persisted as a JSON snapshot.
pub struct FileRecordStore {
    tables: Mutex<Tables>,
    writer: SnapshotWriter,
    _lock: File,
}

impl FileRecordStore {
    /// Open (or create) a store in `config.data_dir`.
    pub fn open(config: FileStoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.data_dir)?;
        let lock = acquire_lock(&config.data_dir)?;

        let path = config.data_dir.join(SNAPSHOT_FILE);
        let tables = load_snapshot(&path)?;

        info!(
            path = %path.display(),
            cats = tables.cat_count(),
            suggestions = tables.suggestion_count(),
            votes = tables.vote_count(),
            "opened file record store"
        );

        Ok(Self {
            tables: Mutex::new(tables),
            writer: SnapshotWriter {
                path,
                tmp_path: config.data_dir.join(SNAPSHOT_TMP_FILE),
                sync_writes: config.sync_writes,
            },
            _lock: lock,
        })
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.writer.path
    }
}

impl RecordStore for FileRecordStore {
    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>, StoreError> {
        Ok(Box::new(TableTransaction::new(
            self.tables.lock(),
            Some(&self.writer as &dyn CommitSink),
        )))
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

fn acquire_lock(data_dir: &Path) -> Result<File, StoreError> {
    let lock_path = data_dir.join(LOCK_FILE);
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)?;
    file.try_lock_exclusive().map_err(|_| StoreError::Locked {
        path: data_dir.display().to_string(),
    })?;
    Ok(file)
}

fn load_snapshot(path: &Path) -> Result<Tables, StoreError> {
    if !path.exists() {
        return Ok(Tables::new());
    }
    let bytes = fs::read(path)?;
    let snapshot: Snapshot =
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    Tables::from_snapshot(snapshot)
}
