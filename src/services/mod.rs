//! Storage and export adapters
//!
//! Side-effecting edges of the stopwatch: the snapshot slot and lap export.

pub mod export;
pub mod persistence;

// Re-export main types
pub use export::{lap_label, render_lap_export, EXPORT_FILENAME, EXPORT_MIME};
pub use persistence::{PersistedSnapshot, SnapshotStore, SNAPSHOT_KEY};
