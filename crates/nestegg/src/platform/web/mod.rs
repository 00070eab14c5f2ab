//! Web platform implementations using browser APIs.

mod storage;

pub use storage::WebStorage;
