//! Native storage implementation using the filesystem.
//!
//! Directory structure:
//! ~/.nestegg/
//!   schedule.json        # Persisted savings and interest segments
//!   nestegg.log          # Log file (see `logging`)

use std::fs;
use std::path::{Path, PathBuf};

use crate::data::PersistedSchedule;
use crate::platform::storage::{Storage, StorageError};

const SCHEDULE_FILE: &str = "schedule.json";

/// Native storage keeping the schedule as a JSON file in a data directory.
pub struct NativeStorage {
    root: PathBuf,
}

impl NativeStorage {
    /// Create a new native storage with the given root path.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the default data directory path (~/.nestegg/)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".nestegg")
    }

    /// Get the root path of the storage directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn schedule_path(&self) -> PathBuf {
        self.root.join(SCHEDULE_FILE)
    }
}

impl Storage for NativeStorage {
    fn load(&self) -> Result<Option<PersistedSchedule>, StorageError> {
        let path = self.schedule_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read schedule: {}", e)))?;

        PersistedSchedule::from_json(&content)
            .map(Some)
            .map_err(|e| StorageError::Parse(format!("Failed to parse schedule: {}", e)))
    }

    fn save(&self, schedule: &PersistedSchedule) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::Io(format!("Failed to create data directory: {}", e)))?;

        let json = serde_json::to_string_pretty(schedule)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize schedule: {}", e)))?;

        fs::write(self.schedule_path(), json)
            .map_err(|e| StorageError::Io(format!("Failed to write schedule: {}", e)))
    }
}
