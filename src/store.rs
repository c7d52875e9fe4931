//! Snapshot persistence.
//!
//! The directory is persisted as one document holding every employee. A
//! [`SnapshotStore`] loads and saves that document; [`JsonFileStore`] keeps
//! it on disk and [`MemoryStore`] keeps it in memory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PayrollError, PayrollResult};
use crate::models::Employee;

/// Current snapshot document version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Loads and saves the whole employee collection.
pub trait SnapshotStore: Send + Sync {
    /// Loads every employee. An absent snapshot loads as empty.
    fn load_all(&self) -> PayrollResult<Vec<Employee>>;

    /// Replaces the stored snapshot with `employees`.
    fn save_all(&self, employees: &[Employee]) -> PayrollResult<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    version: u32,
    saved_at: DateTime<Utc>,
    employees: Vec<Employee>,
}

#[derive(Serialize)]
struct SnapshotDocumentRef<'a> {
    version: u32,
    saved_at: DateTime<Utc>,
    employees: &'a [Employee],
}

/// A snapshot kept as a JSON file.
///
/// Saves write a temporary file next to the target and rename it into place,
/// so a crash mid-save leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn failure(&self, message: impl Into<String>) -> PayrollError {
        PayrollError::PersistenceFailure {
            path: self.path.display().to_string(),
            message: message.into(),
        }
    }

    fn atomic_write(&self, data: &[u8]) -> PayrollResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)
            .map_err(|e| self.failure(format!("failed to create {}: {e}", dir.display())))?;

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
            self.failure(format!(
                "failed to create temp file in {}: {e}",
                dir.display()
            ))
        })?;
        temp.as_file_mut()
            .write_all(data)
            .map_err(|e| self.failure(format!("failed to write snapshot temp file: {e}")))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| self.failure(format!("failed to sync snapshot temp file: {e}")))?;
        temp.persist(&self.path)
            .map_err(|e| self.failure(format!("failed to persist snapshot: {}", e.error)))?;
        #[cfg(unix)]
        {
            if let Ok(dir) = fs::File::open(dir) {
                let _ = dir.sync_all();
            }
        }
        Ok(())
    }
}

impl SnapshotStore for JsonFileStore {
    fn load_all(&self) -> PayrollResult<Vec<Employee>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No snapshot on disk");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| self.failure(format!("failed to read snapshot: {e}")))?;
        let document: SnapshotDocument = serde_json::from_str(&content)
            .map_err(|e| self.failure(format!("failed to decode snapshot: {e}")))?;

        if document.version > SNAPSHOT_VERSION {
            return Err(self.failure(format!(
                "snapshot version {} is newer than supported version {}",
                document.version, SNAPSHOT_VERSION
            )));
        }

        info!(
            path = %self.path.display(),
            employees = document.employees.len(),
            saved_at = %document.saved_at,
            "Snapshot loaded"
        );
        Ok(document.employees)
    }

    fn save_all(&self, employees: &[Employee]) -> PayrollResult<()> {
        let document = SnapshotDocumentRef {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            employees,
        };
        let data = serde_json::to_vec_pretty(&document)
            .map_err(|e| self.failure(format!("failed to encode snapshot: {e}")))?;
        self.atomic_write(&data)?;

        debug!(
            path = %self.path.display(),
            employees = employees.len(),
            "Snapshot saved"
        );
        Ok(())
    }
}

/// A snapshot held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    employees: Mutex<Vec<Employee>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `employees`.
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees: Mutex::new(employees),
        }
    }

    fn lock(&self) -> PayrollResult<std::sync::MutexGuard<'_, Vec<Employee>>> {
        self.employees
            .lock()
            .map_err(|_| PayrollError::PersistenceFailure {
                path: "<memory>".to_string(),
                message: "snapshot lock poisoned".to_string(),
            })
    }
}

impl SnapshotStore for MemoryStore {
    fn load_all(&self) -> PayrollResult<Vec<Employee>> {
        Ok(self.lock()?.clone())
    }

    fn save_all(&self, employees: &[Employee]) -> PayrollResult<()> {
        *self.lock()? = employees.to_vec();
        Ok(())
    }
}
