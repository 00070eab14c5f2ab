//! Tests for the application shell
//!
//! - `session` - Edits, derived view caching and fire-and-forget saves
//! - `storage` - Persisted schema and storage backends
//! - `cli` - Command execution against an in-memory store
