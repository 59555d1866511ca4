use std::time::Duration;
use crate::m3u_channels_error::{info_err, M3uChannelsError};
use crate::utils::default_fetch_timeout_secs;

const DEFAULT_SOURCE: &str = "playlist.m3u";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Remote url or local file of the master playlist.
    #[serde(default)]
    pub url: String,
    /// Stores the fetched playlist text, relative to the working dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persist: Option<String>,
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_SOURCE),
            persist: None,
            timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl SourceConfig {
    pub fn prepare(&mut self) -> Result<(), M3uChannelsError> {
        self.url = self.url.trim().to_string();
        if self.url.is_empty() {
            self.url = String::from(DEFAULT_SOURCE);
        }
        if self.timeout_secs == 0 {
            return Err(info_err!("source timeout_secs must be greater than zero"));
        }
        if self.persist.as_ref().is_some_and(|p| p.trim().is_empty()) {
            self.persist = None;
        }
        Ok(())
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
