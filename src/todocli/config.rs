use crate::error::{Result, TodoError};
use crate::store::sqlite::StoreOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_DB_PATH: &str = "todocli.db";

/// Environment variable naming the store file.
pub const DB_ENV: &str = "TODOCLI_DB";
/// Environment variable naming the directory holding `config.json`.
pub const CONFIG_DIR_ENV: &str = "TODOCLI_CONFIG_DIR";

/// Configuration for todocli, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoConfig {
    /// Store file; relative paths resolve against the working directory
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// How long to wait for another process holding the store, in milliseconds
    #[serde(default)]
    pub lock_timeout_ms: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_PATH)
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            lock_timeout_ms: 0,
        }
    }
}

impl TodoConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        serde_json::from_str(&content).map_err(|e| {
            TodoError::Config(format!("{}: {}", config_path.display(), e))
        })
    }

    /// Store path after applying overrides: explicit flag, then `TODOCLI_DB`, then this config.
    pub fn resolve_db_path(&self, flag: Option<PathBuf>, env: Option<PathBuf>) -> PathBuf {
        flag.or(env).unwrap_or_else(|| self.db_path.clone())
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            lock_timeout: Duration::from_millis(self.lock_timeout_ms),
        }
    }
}
