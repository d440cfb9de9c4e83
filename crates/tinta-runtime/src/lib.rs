#![forbid(unsafe_code)]

//! Runtime side of tenant theming.
//!
//! [`ThemeStore`] owns the tenant theme and the user's preference, applies
//! the resolved tokens to a style sink whenever either changes, and keeps a
//! [`ThemeSnapshot`] of the last application so the next page load can
//! reapply it before recomputing.

pub mod snapshot;
pub mod store;

pub use snapshot::{
    MemoryStorage, SnapshotBackend, StorageError, StorageResult, ThemeSnapshot,
};
#[cfg(feature = "snapshot-file")]
pub use snapshot::FileStorage;
pub use store::{BootstrapReport, ThemeStore};
