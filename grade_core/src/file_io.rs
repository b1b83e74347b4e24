//! # File I/O Module
//!
//! JSON export/import of [`StoredData`] and the storage capability the
//! engine expects callers to inject.
//!
//! - **Export/import**: pretty JSON mirroring `StoredData`. Import never
//!   panics; malformed input is logged and yields `None`.
//! - **[`RecordStore`]**: load/save/clear capability passed in by the caller.
//!   [`FileStore`] keeps the record in a JSON file; [`MemoryStore`] keeps it
//!   in process.
//! - **Atomic saves**: write to `.tmp`, fsync, rename.
//! - **Writer locking**: an OS advisory lock on a sidecar `.lock` file
//!   serializes concurrent saves.
//!
//! ## Example
//!
//! ```rust,no_run
//! use grade_core::file_io::{load_or_default, FileStore, RecordStore};
//! use grade_core::record::Semester;
//!
//! let store = FileStore::new("record.json");
//! let mut data = load_or_default(&store);
//! data.add_semester(Semester::new("Fall 2024"));
//! store.save(&data)?;
//! # Ok::<(), grade_core::errors::GradeError>(())
//! ```

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use fs2::FileExt;

use crate::errors::{GradeError, GradeResult};
use crate::record::StoredData;

/// Serialize a record to pretty-printed JSON.
pub fn export_to_json(data: &StoredData) -> GradeResult<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Parse and validate a record, reporting why it was rejected.
///
/// # Returns
///
/// * `Ok(StoredData)` - Well-formed JSON whose courses pass validation
/// * `Err(GradeError::SerializationError)` - Invalid JSON or wrong shape
/// * `Err(GradeError::InvalidInput)` - A course has zero credits or negative marks
pub fn parse_stored_data(json: &str) -> GradeResult<StoredData> {
    let data: StoredData = serde_json::from_str(json)
        .map_err(|e| GradeError::serialization(format!("Invalid record JSON: {}", e)))?;
    data.validate()?;
    Ok(data)
}

/// Import a record from JSON.
///
/// Returns `None` (and logs the reason) when the input is malformed.
///
/// # Example
///
/// ```rust
/// use grade_core::file_io::{export_to_json, import_from_json};
/// use grade_core::record::StoredData;
///
/// let data = StoredData::new();
/// let json = export_to_json(&data)?;
/// assert_eq!(import_from_json(&json), Some(data));
///
/// assert_eq!(import_from_json("{ not json"), None);
/// # Ok::<(), grade_core::errors::GradeError>(())
/// ```
pub fn import_from_json(json: &str) -> Option<StoredData> {
    match parse_stored_data(json) {
        Ok(data) => Some(data),
        Err(e) => {
            tracing::error!(error = %e, "Failed to import record");
            None
        }
    }
}

/// Storage capability for a single record.
///
/// The engine never stores anything itself; callers pick an implementation
/// and pass it in.
pub trait RecordStore {
    /// Load the stored record. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> GradeResult<Option<StoredData>>;

    /// Replace the stored record.
    fn save(&self, data: &StoredData) -> GradeResult<()>;

    /// Remove the stored record. Clearing an empty store is not an error.
    fn clear(&self) -> GradeResult<()>;
}

/// Load from a store, falling back to an empty record on any failure.
///
/// Failures are logged at warn level.
pub fn load_or_default<S: RecordStore + ?Sized>(store: &S) -> StoredData {
    match store.load() {
        Ok(Some(data)) => data,
        Ok(None) => StoredData::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load stored record, starting fresh");
            StoredData::new()
        }
    }
}

/// Record kept as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// Path of the record file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for FileStore {
    fn load(&self) -> GradeResult<Option<StoredData>> {
        if !self.path.exists() {
            return Ok(None);
        }
        load_record(&self.path).map(Some)
    }

    fn save(&self, data: &StoredData) -> GradeResult<()> {
        let _lock = WriteLock::acquire(&self.path)?;
        save_record(data, &self.path)
    }

    fn clear(&self) -> GradeResult<()> {
        let _lock = WriteLock::acquire(&self.path)?;
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                GradeError::file_error("remove", self.path.display().to_string(), e.to_string())
            })?;
            tracing::debug!(path = %self.path.display(), "Cleared record");
        }
        Ok(())
    }
}

/// Record kept in process as its serialized JSON.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Seed the store with raw JSON, as if a previous session had saved it.
    pub fn with_json(json: impl Into<String>) -> Self {
        MemoryStore {
            slot: Mutex::new(Some(json.into())),
        }
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> GradeResult<Option<StoredData>> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_deref().map(parse_stored_data).transpose()
    }

    fn save(&self, data: &StoredData) -> GradeResult<()> {
        let json = export_to_json(data)?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(json);
        Ok(())
    }

    fn clear(&self) -> GradeResult<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Exclusive OS-level lock on `<record>.lock`, released on drop.
///
/// The lock file itself is left in place; removing it would let a waiting
/// writer and a new writer lock different inodes.
struct WriteLock {
    file: File,
}

impl WriteLock {
    fn acquire(record_path: &Path) -> GradeResult<Self> {
        ensure_parent_dir(record_path)?;
        let lock_path = with_suffix(record_path, "lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| GradeError::file_error("open lock", lock_path.display().to_string(), e.to_string()))?;

        file.lock_exclusive()
            .map_err(|e| GradeError::file_error("lock", lock_path.display().to_string(), e.to_string()))?;

        Ok(WriteLock { file })
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// `record.json` + `tmp` → `record.json.tmp`
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("record"));
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

fn ensure_parent_dir(path: &Path) -> GradeResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| GradeError::file_error("create directory", parent.display().to_string(), e.to_string())),
        _ => Ok(()),
    }
}

/// Save a record with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write to `<path>.tmp`
/// 3. Sync to disk
/// 4. Rename over `path`
pub fn save_record(data: &StoredData, path: &Path) -> GradeResult<()> {
    let json = export_to_json(data)?;

    ensure_parent_dir(path)?;
    let tmp_path = with_suffix(path, "tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        GradeError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        GradeError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        GradeError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        GradeError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), semesters = data.semesters.len(), "Saved record");
    Ok(())
}

/// Load and validate a record file.
///
/// # Returns
///
/// * `Ok(StoredData)` - Successfully loaded record
/// * `Err(GradeError::SerializationError)` - Invalid JSON
/// * `Err(GradeError::InvalidInput)` - A course fails validation
/// * `Err(GradeError::FileError)` - I/O error
pub fn load_record(path: &Path) -> GradeResult<StoredData> {
    let mut file = File::open(path)
        .map_err(|e| GradeError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| GradeError::file_error("read", path.display().to_string(), e.to_string()))?;

    parse_stored_data(&contents).map_err(|e| match e {
        GradeError::SerializationError { reason } => {
            GradeError::serialization(format!("{} ({})", reason, path.display()))
        }
        other => other,
    })
}
