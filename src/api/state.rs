//! Application state for the payroll API.
//!
//! One [`RwLock`] guards the directory. Mutations hold the write lock until
//! the snapshot has been saved, so readers never see a change that a
//! concurrent save has not yet attempted to persist.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::warn;

use crate::config::PayrollConfig;
use crate::directory::PayrollDirectory;
use crate::error::{PayrollError, PayrollResult};
use crate::store::SnapshotStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    directory: Arc<RwLock<PayrollDirectory>>,
    store: Arc<dyn SnapshotStore>,
}

impl AppState {
    /// Creates state around an existing directory.
    pub fn new(directory: PayrollDirectory, store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            directory: Arc::new(RwLock::new(directory)),
            store,
        }
    }

    /// Loads the directory from `store`.
    ///
    /// A snapshot that cannot be read is logged and replaced by an empty
    /// directory; the next successful save overwrites it.
    pub fn load(store: Arc<dyn SnapshotStore>, config: PayrollConfig) -> Self {
        let employees = match store.load_all() {
            Ok(employees) => employees,
            Err(err) => {
                warn!(error = %err, "Failed to load snapshot, starting with an empty directory");
                Vec::new()
            }
        };
        Self::new(PayrollDirectory::from_snapshot(employees, config), store)
    }

    /// Acquires the directory for reading.
    pub async fn read(&self) -> RwLockReadGuard<'_, PayrollDirectory> {
        self.directory.read().await
    }

    /// Applies `change` under the write lock and saves the snapshot.
    ///
    /// Nothing is saved when `change` fails. When the save fails the change
    /// stays applied in memory and the persistence error is returned.
    pub async fn mutate<T, F>(&self, change: F) -> PayrollResult<T>
    where
        F: FnOnce(&mut PayrollDirectory) -> PayrollResult<T>,
    {
        self.mutate_if(change, |_| true).await
    }

    /// Like [`AppState::mutate`], but saves only when `changed` holds for
    /// the value `change` produced.
    ///
    /// The save runs on the blocking pool while the write lock is held, so
    /// snapshots are written in the same order as the changes.
    pub async fn mutate_if<T, F, C>(&self, change: F, changed: C) -> PayrollResult<T>
    where
        F: FnOnce(&mut PayrollDirectory) -> PayrollResult<T>,
        C: FnOnce(&T) -> bool,
    {
        let mut directory = self.directory.write().await;
        let value = change(&mut directory)?;
        if !changed(&value) {
            return Ok(value);
        }

        let employees = directory.employees().to_vec();
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.save_all(&employees))
            .await
            .map_err(|err| PayrollError::PersistenceFailure {
                path: "snapshot".to_string(),
                message: format!("save task failed: {err}"),
            })??;
        Ok(value)
    }
}
