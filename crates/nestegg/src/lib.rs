//! NestEgg savings widget
//!
//! Application shell around `nestegg_core`: a [`Session`] owning the
//! editable schedule, a persistence port with native (file) and web
//! (LocalStorage) backends, logging, the native CLI and the WASM entry
//! point used by the browser rendering layer.

// ============================================================================
// Core modules
// ============================================================================

pub mod data;
pub mod platform;
pub mod session;
pub mod util;

// ============================================================================
// Platform front ends
// ============================================================================

#[cfg(feature = "native")]
pub mod cli;
#[cfg(feature = "native")]
pub mod logging;

#[cfg(feature = "web")]
pub mod web;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use data::PersistedSchedule;
pub use platform::{MemoryStorage, Storage, StorageError};
pub use session::{ProjectionView, Session};

#[cfg(feature = "native")]
pub use logging::init_logging;

/// Debounce window between the last edit and the save it triggers
pub const SAVE_DEBOUNCE_MS: u32 = 400;

/// Initialize logging to the browser console.
#[cfg(feature = "web")]
pub fn init_logging_web() {
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::INFO)
            .build(),
    );
}
