//! Snapshot cache for the last applied theme.
//!
//! A [`ThemeSnapshot`] records what was last written to the style sink for a
//! tenant: the user's preference, the resolved mode and the full token map.
//! On the next start the store reapplies it before recomputing, so the
//! tenant's colors appear before derivation has run.
//!
//! # Design Invariants
//!
//! 1. **Graceful degradation**: storage failures never panic; operations
//!    return [`StorageResult`] and the store logs and carries on.
//! 2. **Atomic writes**: [`FileStorage`] writes a temp file and renames it.
//! 3. **Version gate**: a snapshot file with an unknown format version is
//!    ignored, never partially trusted.
//! 4. **Tenant isolation**: snapshots are keyed by tenant; loading one
//!    tenant never returns another tenant's tokens.
//! 5. **Serialized writers**: concurrent saves through one backend never
//!    lose each other's snapshots.
//!
//! # Feature Gates
//!
//! - `snapshot-file` (default): enables [`FileStorage`]. Without it only
//!   [`MemoryStorage`] is available.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tinta_tokens::{ThemeMode, ThemePreference, TokenMap};

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors from a snapshot backend.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// Snapshot could not be encoded or decoded.
    #[cfg(feature = "snapshot-file")]
    Serialization(String),
    /// Backend state is unusable (poisoned lock, invalid layout).
    Corruption(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "snapshot-file")]
            StorageError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StorageError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Result alias for snapshot operations.
pub type StorageResult<T> = Result<T, StorageError>;

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// The last theme applied for one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSnapshot {
    /// Tenant key the tokens belong to.
    pub tenant: String,
    /// Preference in effect when the snapshot was taken.
    pub preference: ThemePreference,
    /// Mode the tokens were resolved for.
    pub mode: ThemeMode,
    /// Every token that was applied.
    pub tokens: TokenMap,
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Where snapshots are kept.
///
/// Implementations must be thread-safe; the store may be shared behind an
/// `Arc` by the host application.
pub trait SnapshotBackend: Send + Sync {
    /// Human-readable backend name for logging.
    fn name(&self) -> &str;

    /// Snapshot for `tenant`, or `None` if nothing was stored yet.
    fn load(&self, tenant: &str) -> StorageResult<Option<ThemeSnapshot>>;

    /// Store `snapshot`, replacing any prior snapshot for its tenant.
    fn save(&self, snapshot: &ThemeSnapshot) -> StorageResult<()>;

    /// Remove every stored snapshot.
    fn clear(&self) -> StorageResult<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Storage
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    snapshots: RwLock<HashMap<String, ThemeSnapshot>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tenants with a stored snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.read().map_or(0, |s| s.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotBackend for MemoryStorage {
    fn name(&self) -> &str {
        "MemoryStorage"
    }

    fn load(&self, tenant: &str) -> StorageResult<Option<ThemeSnapshot>> {
        let guard = self
            .snapshots
            .read()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        Ok(guard.get(tenant).cloned())
    }

    fn save(&self, snapshot: &ThemeSnapshot) -> StorageResult<()> {
        let mut guard = self
            .snapshots
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        guard.insert(snapshot.tenant.clone(), snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        let mut guard = self
            .snapshots
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        guard.clear();
        Ok(())
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStorage")
            .field("tenants", &self.len())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Storage
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "snapshot-file")]
mod file_storage {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs::{self, File};
    use std::io::{BufReader, BufWriter, Write};
    use std::path::{Path, PathBuf};

    /// On-disk layout: every tenant's snapshot in one versioned document.
    #[derive(Debug, Serialize, Deserialize)]
    struct SnapshotFile {
        format_version: u32,
        snapshots: BTreeMap<String, ThemeSnapshot>,
    }

    impl SnapshotFile {
        const FORMAT_VERSION: u32 = 1;

        fn new() -> Self {
            Self {
                format_version: Self::FORMAT_VERSION,
                snapshots: BTreeMap::new(),
            }
        }
    }

    /// JSON file backend.
    ///
    /// Every save rewrites the whole file through a temp file and rename, so
    /// a crash mid-write leaves the previous snapshot intact. Saves through
    /// one `FileStorage` are serialized by an internal lock; separate
    /// instances pointing at the same path are not coordinated.
    pub struct FileStorage {
        path: PathBuf,
        lock: RwLock<()>,
    }

    impl FileStorage {
        /// Storage at an explicit path.
        #[must_use]
        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
                lock: RwLock::new(()),
            }
        }

        /// Storage at `$XDG_STATE_HOME/tinta/snapshots.json`, falling back to
        /// `~/.local/state` and then the current directory.
        #[must_use]
        pub fn default_location() -> Self {
            Self::new(state_dir().join("tinta").join("snapshots.json"))
        }

        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn temp_path(&self) -> PathBuf {
            let mut tmp = self.path.clone();
            tmp.set_extension("json.tmp");
            tmp
        }

        fn read_file(&self) -> StorageResult<SnapshotFile> {
            if !self.path.exists() {
                return Ok(SnapshotFile::new());
            }
            let reader = BufReader::new(File::open(&self.path)?);
            let file: SnapshotFile = serde_json::from_reader(reader).map_err(|e| {
                StorageError::Serialization(format!("failed to parse snapshot file: {e}"))
            })?;
            if file.format_version != SnapshotFile::FORMAT_VERSION {
                tracing::warn!(
                    stored = file.format_version,
                    expected = SnapshotFile::FORMAT_VERSION,
                    "snapshot file format version mismatch, ignoring stored snapshots"
                );
                return Ok(SnapshotFile::new());
            }
            Ok(file)
        }

        fn write_file(&self, file: &SnapshotFile) -> StorageResult<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let tmp_path = self.temp_path();
            {
                let mut writer = BufWriter::new(File::create(&tmp_path)?);
                serde_json::to_writer_pretty(&mut writer, file).map_err(|e| {
                    StorageError::Serialization(format!("failed to serialize snapshots: {e}"))
                })?;
                writer.flush()?;
                writer.get_ref().sync_all()?;
            }
            fs::rename(&tmp_path, &self.path)?;
            Ok(())
        }
    }

    fn state_dir() -> PathBuf {
        if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
            return PathBuf::from(state_home);
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".local").join("state");
        }
        PathBuf::from(".")
    }

    impl SnapshotBackend for FileStorage {
        fn name(&self) -> &str {
            "FileStorage"
        }

        fn load(&self, tenant: &str) -> StorageResult<Option<ThemeSnapshot>> {
            let _guard = self
                .lock
                .read()
                .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
            let mut file = self.read_file()?;
            Ok(file.snapshots.remove(tenant))
        }

        fn save(&self, snapshot: &ThemeSnapshot) -> StorageResult<()> {
            // Held across read-modify-write; the temp path is shared.
            let _guard = self
                .lock
                .write()
                .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
            // A corrupt file is replaced rather than blocking every future save.
            let mut file = match self.read_file() {
                Ok(file) => file,
                Err(StorageError::Serialization(msg)) => {
                    tracing::warn!(path = %self.path.display(), error = %msg, "discarding unreadable snapshot file");
                    SnapshotFile::new()
                }
                Err(e) => return Err(e),
            };
            file.snapshots
                .insert(snapshot.tenant.clone(), snapshot.clone());
            self.write_file(&file)?;
            tracing::debug!(
                path = %self.path.display(),
                tenant = %snapshot.tenant,
                tokens = snapshot.tokens.len(),
                "saved theme snapshot"
            );
            Ok(())
        }

        fn clear(&self) -> StorageResult<()> {
            let _guard = self
                .lock
                .write()
                .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            Ok(())
        }
    }

    impl fmt::Debug for FileStorage {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("FileStorage")
                .field("path", &self.path)
                .finish()
        }
    }
}

#[cfg(feature = "snapshot-file")]
pub use file_storage::FileStorage;
