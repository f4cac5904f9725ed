use std::time::Duration;

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// HTTP client settings shared by every service.
///
/// All durations are in seconds.
///
/// # Environment Variables
/// Each field can be overridden per service with a `__` separated key, for
/// example `ASSISTANT_HTTP__READ_TIMEOUT=120`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "snake_case")]
pub struct HttpConfig {
    pub connect_timeout: u64,
    pub read_timeout: u64,
    pub pool_idle_timeout: u64,
    pub pool_max_idle_per_host: usize,
}

impl HttpConfig {
    pub fn connect_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn read_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.read_timeout)
    }

    pub fn pool_idle_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.pool_idle_timeout)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: 30,
            read_timeout: 60,
            pool_idle_timeout: 90,
            pool_max_idle_per_host: 5,
        }
    }
}
