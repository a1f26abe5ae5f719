//! Execution platform, which decides the storage backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Where the application is running.
///
/// - `Native`: a device with an on-disk relational store (durable).
/// - `Web`: browser or sandboxed environment (in-memory, lost on restart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Native,
    Web,
}

impl Platform {
    /// Whether records written on this platform survive a restart.
    #[must_use]
    pub fn is_durable(self) -> bool {
        matches!(self, Self::Native)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "sqlite" => Ok(Self::Native),
            "web" | "memory" => Ok(Self::Web),
            other => Err(CoreError::ValidationError(format!(
                "Invalid platform: '{other}'. Must be one of: native, web"
            ))),
        }
    }
}
