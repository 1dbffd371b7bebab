//! Ledger configuration
//!
//! Read from `runledger.toml` with environment overrides applied on top:
//!
//! ```toml
//! data_path = "runledger.json"
//! root = "runs"
//! access_mode = "read_write"
//! ingest_token = "s3cret"
//! log_filter = "runledger=debug"
//! ```
//!
//! | Field | Default | Environment |
//! |-------|---------|-------------|
//! | `data_path` | `runledger.json` | `RUNLEDGER_DATA` |
//! | `root` | `runs` | |
//! | `access_mode` | `read_write` | |
//! | `ingest_token` | none | `INGEST_TOKEN` |
//! | `log_filter` | `warn` | `RUST_LOG` |
//!
//! An empty environment value counts as unset.
//!
//! `ingest_token` guards transports only: requests that go through
//! `Executor::execute_authorized` must present it as a bearer token, and are
//! all refused while it is unset. The CLI runs commands in-process and never
//! checks it.

use runledger_core::TreePath;
use runledger_security::{AccessMode, AccessPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::run_store::DEFAULT_ROOT;

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "runledger.toml";

const DEFAULT_DATA_PATH: &str = "runledger.json";
const DEFAULT_LOG_FILTER: &str = "warn";

const ENV_DATA_PATH: &str = "RUNLEDGER_DATA";
const ENV_INGEST_TOKEN: &str = "INGEST_TOKEN";
const ENV_LOG_FILTER: &str = "RUST_LOG";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        /// Config file path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        /// Config file path
        path: String,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// A value parsed but is not usable.
    #[error("invalid config: {reason}")]
    Invalid {
        /// What is wrong
        reason: String,
    },
}

/// Settings needed to open a ledger.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Snapshot file for the file-backed tree store
    pub data_path: PathBuf,
    /// Tree path under which runs are stored
    pub root: String,
    /// Whether ingest is allowed
    pub access_mode: AccessMode,
    /// Bearer token transports must present; with `None` they refuse every
    /// request
    pub ingest_token: Option<String>,
    /// `tracing-subscriber` filter directive
    pub log_filter: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            root: DEFAULT_ROOT.to_string(),
            access_mode: AccessMode::default(),
            ingest_token: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl LedgerConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, "<inline>")
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!(
                    target: "runledger::config",
                    path = %path.display(),
                    "Loaded config file"
                );
                Self::parse(&text, &path.display().to_string())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    target: "runledger::config",
                    path = %path.display(),
                    "No config file, using defaults"
                );
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    fn parse(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `RUNLEDGER_DATA`, `INGEST_TOKEN` and `RUST_LOG` from the process
    /// environment.
    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(path) = get(ENV_DATA_PATH) {
            self.data_path = PathBuf::from(path);
        }
        if let Some(token) = get(ENV_INGEST_TOKEN) {
            self.ingest_token = Some(token);
        }
        if let Some(filter) = get(ENV_LOG_FILTER) {
            self.log_filter = filter;
        }
        self
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "data_path must not be empty".to_string(),
            });
        }
        self.root_path().map(|_| ())
    }

    /// The run root as a tree path
    pub fn root_path(&self) -> Result<TreePath, ConfigError> {
        let path: TreePath = self.root.parse().map_err(|e| ConfigError::Invalid {
            reason: format!("root '{}': {}", self.root, e),
        })?;
        if path.is_root() {
            return Err(ConfigError::Invalid {
                reason: "root must name at least one path segment".to_string(),
            });
        }
        Ok(path)
    }

    /// Access policy derived from `access_mode` and `ingest_token`.
    pub fn access_policy(&self) -> AccessPolicy {
        let policy = AccessPolicy::new().access_mode(self.access_mode);
        match &self.ingest_token {
            Some(token) if !token.is_empty() => policy.bearer_token(token.clone()),
            _ => policy,
        }
    }
}

impl std::fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerConfig")
            .field("data_path", &self.data_path)
            .field("root", &self.root)
            .field("access_mode", &self.access_mode)
            .field(
                "ingest_token",
                &self.ingest_token.as_ref().map(|_| "<redacted>"),
            )
            .field("log_filter", &self.log_filter)
            .finish()
    }
}
