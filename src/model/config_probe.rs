use std::time::Duration;
use crate::m3u_channels_error::{info_err, M3uChannelsError};
use crate::utils::{default_as_true, default_probe_timeout_secs};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
    /// Unreachable channels still get their own file.
    #[serde(default = "default_as_true")]
    pub write_unreachable: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_secs: default_probe_timeout_secs(),
            write_unreachable: true,
        }
    }
}

impl ProbeConfig {
    pub fn prepare(&mut self) -> Result<(), M3uChannelsError> {
        if self.enabled && self.timeout_secs == 0 {
            return Err(info_err!("probe timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
