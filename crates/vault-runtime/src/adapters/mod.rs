//! # Adapters
//!
//! Port implementations that connect the subsystems to each other and to
//! the filesystem.

pub mod directory;
pub mod router;
pub mod snapshot;

pub use directory::RosterDirectory;
pub use router::ModuleRouter;
pub use snapshot::{SnapshotError, SnapshotStore, SNAPSHOT_FORMAT_VERSION};
