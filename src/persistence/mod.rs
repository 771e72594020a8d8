//! Last-used input persistence
//!
//! The engine never touches storage. Callers go through the [`InputStore`]
//! port, which round-trips the calculator fields as opaque key/value pairs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;
use tracing::{debug, info};

/// Calculator fields keyed by name (`madaFee`, `cogs`, ...)
pub type InputRecord = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stored inputs are not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
    #[error("input store lock poisoned")]
    Poisoned,
}

/// Load/save port for the last-used inputs
#[cfg_attr(test, mockall::automock)]
pub trait InputStore: Send + Sync {
    /// Stored record, `None` when nothing was saved yet
    fn load(&self) -> Result<Option<InputRecord>, StoreError>;

    fn save(&self, record: &InputRecord) -> Result<(), StoreError>;

    /// Forget the stored record
    fn clear(&self) -> Result<(), StoreError>;
}

/// On-disk layout of the JSON store
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredInputs {
    version: String,
    saved_at: i64,
    fields: InputRecord,
}

const STORE_VERSION: &str = "1";

/// Keeps the record in a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            path: data_dir.as_ref().join(file_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl InputStore for JsonFileStore {
    fn load(&self) -> Result<Option<InputRecord>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no saved inputs");
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let stored: StoredInputs = serde_json::from_str(&json)?;
        info!(
            "📂 Inputs loaded from {} (version {}, {} fields)",
            self.path.display(),
            stored.version,
            stored.fields.len()
        );
        Ok(Some(stored.fields))
    }

    fn save(&self, record: &InputRecord) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let stored = StoredInputs {
            version: STORE_VERSION.to_string(),
            saved_at: Utc::now().timestamp_millis(),
            fields: record.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), "inputs saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("🗑️ Saved inputs removed: {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Process-local store, used when persistence is switched off and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: RwLock<Option<InputRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputStore for MemoryStore {
    fn load(&self) -> Result<Option<InputRecord>, StoreError> {
        let guard = self.record.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, record: &InputRecord) -> Result<(), StoreError> {
        let mut guard = self.record.write().map_err(|_| StoreError::Poisoned)?;
        *guard = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.record.write().map_err(|_| StoreError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}
