//! Serialized forms of application state.

mod persisted;

pub use persisted::PersistedSchedule;
