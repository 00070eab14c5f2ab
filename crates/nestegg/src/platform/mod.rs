//! Platform abstraction layer for native/web compatibility.
//!
//! [`Storage`] is the persistence port the session writes through. Each
//! platform supplies an implementation: a JSON file on native, browser
//! LocalStorage on web. [`MemoryStorage`] backs tests and embedders.

mod storage;

#[cfg(feature = "native")]
pub mod native;

#[cfg(feature = "web")]
pub mod web;

pub use storage::{MemoryStorage, Storage, StorageError};

// Re-export platform-specific implementations
#[cfg(feature = "native")]
pub use native::NativeStorage;

#[cfg(feature = "web")]
pub use web::WebStorage;
