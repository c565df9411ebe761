//! # Persistence Port
//!
//! The grocery store reads its lists once at startup and writes the complete
//! list sequence after every mutation. The storage medium sits behind
//! [`GroceryPersistence`]; this module ships a JSON snapshot file adapter and an
//! in-memory adapter.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

use crate::grocery_model::GroceryList;
use crate::store_config::{StoreConfig, SNAPSHOT_VERSION};
use crate::store_errors::StoreError;

/// Load/save port for the grocery store
///
/// `save` must be durable before it returns; the store treats a returned `Ok`
/// as the point where a mutation is complete.
pub trait GroceryPersistence {
    /// Read every stored list, in store order
    fn load(&self) -> Result<Vec<GroceryList>>;

    /// Replace the stored lists with `lists`
    fn save(&mut self, lists: &[GroceryList]) -> Result<()>;
}

/// On-disk snapshot layout
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    namespace: String,
    saved_at: DateTime<Utc>,
    #[serde(rename = "groceryLists")]
    grocery_lists: Vec<GroceryList>,
}

/// Stores all lists as one JSON document at `<data_dir>/<namespace>.json`
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
    namespace: String,
    pretty: bool,
}

impl JsonFilePersistence {
    /// Create an adapter for the snapshot file described by `config`
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            path: config.snapshot_path(),
            namespace: config.namespace.clone(),
            pretty: config.pretty_json,
        }
    }

    /// Location of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_snapshot(&self) -> std::result::Result<Option<Snapshot>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion(snapshot.version));
        }

        Ok(Some(snapshot))
    }

    fn write_snapshot(&self, lists: &[GroceryList]) -> std::result::Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            namespace: self.namespace.clone(),
            saved_at: Utc::now(),
            grocery_lists: lists.to_vec(),
        };

        let encoded = if self.pretty {
            serde_json::to_vec_pretty(&snapshot)?
        } else {
            serde_json::to_vec(&snapshot)?
        };

        // Write next to the target and rename so a crash never leaves a torn file;
        // the temp file is deleted on drop if any step fails
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&encoded)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::from(e.error))?;

        Ok(())
    }
}

impl GroceryPersistence for JsonFilePersistence {
    fn load(&self) -> Result<Vec<GroceryList>> {
        info!("Loading grocery lists from {}", self.path.display());

        let snapshot = self
            .read_snapshot()
            .with_context(|| format!("Failed to load snapshot {}", self.path.display()))?;

        match snapshot {
            Some(snapshot) => {
                if snapshot.namespace != self.namespace {
                    warn!(
                        "Snapshot namespace '{}' does not match configured '{}'",
                        snapshot.namespace, self.namespace
                    );
                }
                info!(
                    "Loaded {} grocery lists saved at {}",
                    snapshot.grocery_lists.len(),
                    snapshot.saved_at
                );
                Ok(snapshot.grocery_lists)
            }
            None => {
                info!("No snapshot found, starting with an empty store");
                Ok(Vec::new())
            }
        }
    }

    fn save(&mut self, lists: &[GroceryList]) -> Result<()> {
        debug!("Saving {} grocery lists to {}", lists.len(), self.path.display());

        self.write_snapshot(lists)
            .with_context(|| format!("Failed to save snapshot {}", self.path.display()))
    }
}

/// Keeps the lists in memory
///
/// Clones share the same storage, so a second store built from a clone sees
/// everything the first one saved.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersistence {
    lists: Arc<Mutex<Vec<GroceryList>>>,
}

impl InMemoryPersistence {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an in-memory store seeded with `lists`
    pub fn with_lists(lists: Vec<GroceryList>) -> Self {
        Self {
            lists: Arc::new(Mutex::new(lists)),
        }
    }

    /// Copy of what is currently stored
    pub fn stored(&self) -> Result<Vec<GroceryList>> {
        self.load()
    }
}

impl GroceryPersistence for InMemoryPersistence {
    fn load(&self) -> Result<Vec<GroceryList>> {
        let lists = self
            .lists
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))
            .context("Failed to read in-memory grocery lists")?;
        Ok(lists.clone())
    }

    fn save(&mut self, lists: &[GroceryList]) -> Result<()> {
        let mut stored = self
            .lists
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))
            .context("Failed to write in-memory grocery lists")?;
        *stored = lists.to_vec();
        Ok(())
    }
}
