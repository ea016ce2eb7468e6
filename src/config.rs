//! Environment-driven configuration.
//!
//! - `PWD_GATE_DENYLIST_PATH`: extra deny-list file (optional)
//! - `PWD_GATE_BASE_URL`: duplicate-check backend (default `http://localhost:8080`)
//! - `PWD_GATE_TIMEOUT_MS`: duplicate-check request timeout (optional, none by default)

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::denylist::{DenyList, DenyListError};
use crate::duplicate::HttpDuplicateChecker;
use crate::evaluator::PasswordPolicy;

pub const DENYLIST_PATH_ENV: &str = "PWD_GATE_DENYLIST_PATH";
pub const BASE_URL_ENV: &str = "PWD_GATE_BASE_URL";
pub const TIMEOUT_ENV: &str = "PWD_GATE_TIMEOUT_MS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid PWD_GATE_TIMEOUT_MS value: {0:?}")]
    InvalidTimeout(String),
    #[error(transparent)]
    DenyList(#[from] DenyListError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    pub denylist_path: Option<PathBuf>,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            denylist_path: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl GateConfig {
    /// Reads the configuration from the environment; unset variables fall
    /// back to defaults, empty ones count as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let timeout = match var(TIMEOUT_ENV) {
            Some(raw) => {
                let ms: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                Some(Duration::from_millis(ms))
            }
            None => None,
        };

        Ok(Self {
            denylist_path: var(DENYLIST_PATH_ENV).map(PathBuf::from),
            base_url: var(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
        })
    }

    /// Built-in deny-list, extended from `denylist_path` when set.
    pub fn password_policy(&self) -> Result<PasswordPolicy, ConfigError> {
        let deny_list = match &self.denylist_path {
            Some(path) => DenyList::from_path(path)?,
            None => DenyList::builtin(),
        };
        Ok(PasswordPolicy::new(deny_list))
    }

    pub fn duplicate_checker(&self) -> HttpDuplicateChecker {
        HttpDuplicateChecker::new(&self.base_url).with_timeout(self.timeout)
    }
}
