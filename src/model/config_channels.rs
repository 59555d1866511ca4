use crate::m3u_channels_error::{info_err, M3uChannelsError};
use crate::utils::default_channels_dir;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelsConfig {
    #[serde(default = "default_channels_dir")]
    pub dir: String,
    /// Published location of the channel directory, used for links and the index playlist.
    #[serde(default)]
    pub base_url: String,
    /// Removes channel files of previous runs before writing.
    #[serde(default)]
    pub clean: bool,
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            dir: default_channels_dir(),
            base_url: String::new(),
            clean: false,
        }
    }
}

impl ChannelsConfig {
    pub fn prepare(&mut self) -> Result<(), M3uChannelsError> {
        self.dir = self.dir.trim().to_string();
        if self.dir.is_empty() {
            return Err(info_err!("channels dir can't be empty"));
        }
        self.base_url = self.base_url.trim().to_string();
        Ok(())
    }
}
