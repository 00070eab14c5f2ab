//! Storage abstraction for platform-independent persistence.
//!
//! This module defines the [`Storage`] trait that abstracts where the
//! schedule is kept: a file on native, LocalStorage on web.

use std::cell::{Cell, RefCell};

use crate::data::PersistedSchedule;

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    /// I/O error (file not found, permission denied, etc.)
    Io(String),
    /// Parse error (invalid JSON, corrupted data)
    Parse(String),
    /// Serialization error
    Serialize(String),
    /// Storage not available (e.g., LocalStorage full or disabled)
    NotAvailable(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::NotAvailable(msg) => write!(f, "Storage not available: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Platform-independent persistence port.
///
/// `load` returns `Ok(None)` when nothing has been saved yet.
pub trait Storage {
    fn load(&self) -> Result<Option<PersistedSchedule>, StorageError>;

    fn save(&self, schedule: &PersistedSchedule) -> Result<(), StorageError>;
}

/// In-memory storage holding the serialized JSON string.
///
/// Goes through the same JSON encoding as the real backends so corrupt
/// payloads can be simulated with [`MemoryStorage::with_raw`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: RefCell<Option<String>>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with an arbitrary (possibly malformed) payload
    pub fn with_raw(json: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(json.into())),
            saves: Cell::new(0),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<PersistedSchedule>, StorageError> {
        match self.slot.borrow().as_deref() {
            None => Ok(None),
            Some(json) => PersistedSchedule::from_json(json)
                .map(Some)
                .map_err(|e| StorageError::Parse(e.to_string())),
        }
    }

    fn save(&self, schedule: &PersistedSchedule) -> Result<(), StorageError> {
        let json = schedule
            .to_json()
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        *self.slot.borrow_mut() = Some(json);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn load(&self) -> Result<Option<PersistedSchedule>, StorageError> {
        (**self).load()
    }

    fn save(&self, schedule: &PersistedSchedule) -> Result<(), StorageError> {
        (**self).save(schedule)
    }
}
