use crate::session::ReselectPolicy;
use serde::{Deserialize, Serialize};

/// User configuration from `LungScan Config.yaml`.
///
/// Contains tunables for the stub gateway and the session policies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "LungScan_Settings")]
    pub settings: ScanSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Simulated analysis time of the stub gateway, in seconds
    #[serde(rename = "Gateway Delay", default = "default_gateway_delay")]
    pub gateway_delay: u64,

    /// Upper bound on any gateway call, in seconds. Expiry is treated like a
    /// gateway failure.
    #[serde(rename = "Gateway Timeout", default = "default_gateway_timeout")]
    pub gateway_timeout: u64,

    /// What a new image selection does while an analysis is in flight
    #[serde(rename = "Reselect Policy", default)]
    pub reselect_policy: ReselectPolicy,

    /// Placeholder rows shown while analyzing, before any result set exists
    #[serde(rename = "Skeleton Rows", default = "default_skeleton_rows")]
    pub skeleton_rows: usize,

    #[serde(rename = "Debug Logging", default)]
    pub debug_logging: bool,
}

fn default_gateway_delay() -> u64 {
    2
}

fn default_gateway_timeout() -> u64 {
    30
}

fn default_skeleton_rows() -> usize {
    5
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            gateway_delay: default_gateway_delay(),
            gateway_timeout: default_gateway_timeout(),
            reselect_policy: ReselectPolicy::default(),
            skeleton_rows: default_skeleton_rows(),
            debug_logging: false,
        }
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            settings: ScanSettings::default(),
        }
    }
}
