//! Hold TTL and expiry sweep configuration.

use serde::{Deserialize, Serialize};

/// Seat hold lifetime and reclamation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldConfig {
    /// How long a hold lasts before it expires, in seconds.
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// How often the expiry sweeper runs, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl HoldConfig {
    /// The hold TTL as a chrono duration.
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_seconds as i64)
    }

    /// The sweep interval as a std duration.
    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_seconds)
    }
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_ttl() -> u64 {
    120
}

fn default_sweep_interval() -> u64 {
    2
}
