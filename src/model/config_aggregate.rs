use std::fmt::Display;
use crate::m3u_channels_error::{info_err, M3uChannelsError};

#[derive(Debug, Copy, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub enum AggregateKind {
    /// Verbatim copy of the source playlist.
    #[serde(rename = "clone")]
    Clone,
    /// `#EXTINF` + url pairs pointing at the published channel files.
    #[serde(rename = "index")]
    Index,
    /// Source playlist wrapped with a generated header and an optional footer.
    #[serde(rename = "mirror")]
    Mirror,
}

impl AggregateKind {
    const CLONE: &'static str = "clone";
    const INDEX: &'static str = "index";
    const MIRROR: &'static str = "mirror";
}

impl Display for AggregateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Self::Clone => Self::CLONE,
            Self::Index => Self::INDEX,
            Self::Mirror => Self::MIRROR,
        })
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregateConfig {
    pub kind: AggregateKind,
    pub filename: String,
    /// Overrides `channels.base_url` for index playlists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub footer: Vec<String>,
}

impl AggregateConfig {
    pub fn prepare(&mut self) -> Result<(), M3uChannelsError> {
        self.filename = self.filename.trim().to_string();
        if self.filename.is_empty() {
            return Err(info_err!("aggregate filename can't be empty for kind {}", self.kind));
        }
        Ok(())
    }
}
