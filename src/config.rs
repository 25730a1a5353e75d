use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::collector::FailurePolicy;
use crate::query::DEFAULT_API_BASE;
use crate::source::http::DEFAULT_TIMEOUT;

// ------------------------------------------------------------
// Root configuration
// ------------------------------------------------------------
//
// Runtime settings that are not part of a single query.
//
// Every field has a default, so running without a config file
// talks to the public marketplace API with a 10 second budget
// and writes into the current directory.
//
// Example config file:
//
//     {
//       "api_base": "https://api-mainnet.magiceden.dev/v2",
//       "timeout_secs": 10,
//       "output_dir": "exports",
//       "failure_policy": "keep_going"
//     }
//
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// API root the collection paths are appended to
    pub api_base: String,

    /// Whole-request budget per collection, in seconds
    pub timeout_secs: u64,

    /// Directory the export file is written into
    pub output_dir: PathBuf,

    /// Behavior when one collection fails
    pub failure_policy: FailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            output_dir: PathBuf::from("."),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Loads the configuration file if one was given, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let cfg = serde_json::from_str(&data)
        .with_context(|| format!("invalid config file {}", path.display()))?;

    Ok(cfg)
}
