//! Lock registry configuration

use serde::{Deserialize, Serialize};
use stationlock_core::{Error, Result};
use std::time::Duration;

/// Settings for a [`LockRegistry`](crate::LockRegistry)
///
/// # Example
///
/// ```
/// use stationlock_concurrency::RegistryConfig;
/// use std::time::Duration;
///
/// let config = RegistryConfig::from_json_str(r#"{"acquire_timeout_ms": 250}"#).unwrap();
/// assert_eq!(config.acquire_timeout(), Duration::from_millis(250));
///
/// let config = RegistryConfig::default().with_acquire_timeout(Duration::from_secs(1));
/// assert_eq!(config.acquire_timeout_ms, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Longest wait for the critical section before failing with
    /// `LockUnavailable`
    pub acquire_timeout_ms: u64,
}

impl RegistryConfig {
    /// Default wait for the critical section
    pub const DEFAULT_ACQUIRE_TIMEOUT_MS: u64 = 5_000;

    /// Parse a configuration from JSON; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Set the critical-section wait
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// The critical-section wait
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            acquire_timeout_ms: Self::DEFAULT_ACQUIRE_TIMEOUT_MS,
        }
    }
}
