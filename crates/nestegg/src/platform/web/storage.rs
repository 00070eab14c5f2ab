//! Web storage implementation using browser LocalStorage.

use gloo_storage::errors::StorageError as GlooError;
use gloo_storage::{LocalStorage, Storage as GlooStorage};

use crate::data::PersistedSchedule;
use crate::platform::storage::{Storage, StorageError};

/// Key for the persisted schedule; bump the suffix on schema changes
pub const SCHEDULE_KEY: &str = "nestegg_schedule_v1";

/// Web storage implementation using browser LocalStorage.
///
/// The schedule is stored as a single JSON value under [`SCHEDULE_KEY`].
#[derive(Debug, Default)]
pub struct WebStorage;

impl WebStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for WebStorage {
    fn load(&self) -> Result<Option<PersistedSchedule>, StorageError> {
        match LocalStorage::get::<PersistedSchedule>(SCHEDULE_KEY) {
            Ok(schedule) => Ok(Some(schedule)),
            Err(GlooError::KeyNotFound(_)) => Ok(None),
            Err(GlooError::SerdeError(e)) => Err(StorageError::Parse(format!(
                "Failed to parse stored schedule: {}",
                e
            ))),
            Err(e) => Err(StorageError::NotAvailable(e.to_string())),
        }
    }

    fn save(&self, schedule: &PersistedSchedule) -> Result<(), StorageError> {
        LocalStorage::set(SCHEDULE_KEY, schedule)
            .map_err(|e| StorageError::Io(format!("Failed to save schedule: {}", e)))
    }
}
