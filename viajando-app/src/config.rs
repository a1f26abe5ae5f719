//! Storage configuration.
//!
//! Values come from defaults, optionally overridden by `VIAJANDO_*`
//! environment variables.

use std::path::PathBuf;

use viajando_core::error::{CoreError, CoreResult};
use viajando_core::types::Platform;

pub const ENV_DATABASE: &str = "VIAJANDO_DATABASE";
pub const ENV_DATA_DIR: &str = "VIAJANDO_DATA_DIR";
pub const ENV_PLATFORM: &str = "VIAJANDO_PLATFORM";
pub const ENV_SEED_EXAMPLES: &str = "VIAJANDO_SEED_EXAMPLES";

const DEFAULT_DATABASE_NAME: &str = "viajesDB";
const APP_DIR_NAME: &str = "viajando";

/// Storage settings shared by every frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Logical database name; the file is `<data_dir>/<database_name>.db`
    pub database_name: String,
    /// Directory holding the durable database
    pub data_dir: PathBuf,
    /// Forces a platform instead of auto-detection
    pub platform: Option<Platform>,
    /// Seed the in-memory backend with sample trips
    pub seed_examples: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            data_dir: default_data_dir(),
            platform: None,
            seed_examples: true,
        }
    }
}

impl StorageConfig {
    /// Full path of the `SQLite` database file.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.db", self.database_name))
    }

    /// Load from process environment variables.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(ENV_DATABASE) {
            let name = name.trim();
            if name.is_empty() {
                return Err(CoreError::ValidationError(format!(
                    "{ENV_DATABASE} cannot be empty"
                )));
            }
            config.database_name = name.to_string();
        }

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            if !dir.trim().is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }

        if let Some(platform) = lookup(ENV_PLATFORM) {
            config.platform = Some(platform.parse()?);
        }

        if let Some(seed) = lookup(ENV_SEED_EXAMPLES) {
            config.seed_examples = parse_bool(ENV_SEED_EXAMPLES, &seed)?;
        }

        Ok(config)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

fn parse_bool(key: &str, value: &str) -> CoreResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(CoreError::ValidationError(format!(
            "Invalid boolean for {key}: '{other}'"
        ))),
    }
}
