use std::path::{Path, PathBuf};

use log::debug;

use crate::m3u_channels_error::M3uChannelsError;
use crate::model::{AggregateConfig, ChannelsConfig, HtmlConfig, LogConfig, ProbeConfig, SourceConfig, TimestampConfig};
use crate::utils::default_as_empty_list;
use crate::utils::file::file_utils::{get_file_path, get_working_path};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub working_dir: String,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub channels: ChannelsConfig,
    #[serde(default = "default_as_empty_list")]
    pub aggregates: Vec<AggregateConfig>,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<HtmlConfig>,
    #[serde(default)]
    pub timestamp: TimestampConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<LogConfig>,
    #[serde(skip)]
    pub t_working_path: PathBuf,
}

impl Config {
    pub fn prepare(&mut self) -> Result<(), M3uChannelsError> {
        self.t_working_path = get_working_path(&self.working_dir);
        debug!("working dir: {:?}", &self.t_working_path);
        self.source.prepare()?;
        self.channels.prepare()?;
        for aggregate in &mut self.aggregates {
            aggregate.prepare()?;
        }
        self.probe.prepare()?;
        if let Some(html) = self.html.as_mut() {
            html.prepare()?;
        }
        self.timestamp.prepare()?;
        Ok(())
    }

    pub fn working_path(&self) -> &Path {
        &self.t_working_path
    }

    pub fn resolve_path(&self, path: &str) -> PathBuf {
        get_file_path(&self.t_working_path, path)
    }

    pub fn channels_path(&self) -> PathBuf {
        self.resolve_path(&self.channels.dir)
    }

    pub fn persist_path(&self) -> Option<PathBuf> {
        self.source.persist.as_deref().map(|p| self.resolve_path(p))
    }

    pub fn sanitize_sensitive_info(&self) -> bool {
        self.log.as_ref().map_or(true, |l| l.sanitize_sensitive_info)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.log.as_ref().and_then(|l| l.log_level.as_deref())
    }

    /// The enabled html settings, `None` when the page is not generated.
    pub fn html(&self) -> Option<&HtmlConfig> {
        self.html.as_ref().filter(|h| h.enabled)
    }
}
