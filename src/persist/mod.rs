//! Persistence channel for the screen snapshot.

pub mod snapshot;
pub mod store;

pub use snapshot::Snapshot;
pub use store::{JsonFileStore, MemoryStore, SnapshotError, SnapshotStore};
