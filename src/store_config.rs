//! # Store Configuration Module
//!
//! Where and how the grocery store persists its snapshot, and how manual list
//! ids are generated.

use log::{info, warn};
use std::env;
use std::path::PathBuf;

// Constants for store configuration
pub const DEFAULT_NAMESPACE: &str = "groceryLists";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const MANUAL_LIST_ID_LENGTH: usize = 16;
pub const MAX_ID_ATTEMPTS: usize = 64;
pub const SNAPSHOT_VERSION: u32 = 1;

/// Configuration structure for the grocery store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Well-known key the snapshot is stored under
    pub namespace: String,
    /// Directory holding the snapshot file
    pub data_dir: PathBuf,
    /// Length of generated manual list ids
    pub manual_id_length: usize,
    /// Whether to pretty-print the JSON snapshot
    pub pretty_json: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            manual_id_length: MANUAL_LIST_ID_LENGTH,
            pretty_json: false,
        }
    }
}

impl StoreConfig {
    /// Build a configuration from the environment
    ///
    /// Loads a `.env` file if present, then reads `GROCERY_DATA_DIR`,
    /// `GROCERY_NAMESPACE` and `GROCERY_PRETTY_JSON`. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();

        if let Ok(dir) = env::var("GROCERY_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(namespace) = env::var("GROCERY_NAMESPACE") {
            if namespace.trim().is_empty() {
                warn!("GROCERY_NAMESPACE is empty, using '{}'", DEFAULT_NAMESPACE);
            } else {
                config.namespace = namespace.trim().to_string();
            }
        }

        if let Ok(pretty) = env::var("GROCERY_PRETTY_JSON") {
            config.pretty_json = matches!(pretty.trim(), "1" | "true" | "yes");
        }

        info!(
            "Store configured with namespace '{}' in {}",
            config.namespace,
            config.data_dir.display()
        );

        config
    }

    /// Use a different data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Use a different namespace
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    /// Full path of the snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.namespace))
    }
}
