use regex::Regex;
use crate::m3u_channels_error::{info_err, M3uChannelsError};
use crate::utils::{default_as_true, default_begin_marker, default_end_marker, default_html_filename, default_html_title, default_timestamp_pattern};

#[derive(Debug, Copy, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq, Default)]
pub enum HtmlMode {
    /// Regenerates the whole page.
    #[serde(rename = "full")]
    #[default]
    Full,
    /// Replaces the channel list and the timestamp inside the existing page.
    #[serde(rename = "template")]
    Template,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HtmlConfig {
    #[serde(default = "default_as_true")]
    pub enabled: bool,
    #[serde(default)]
    pub mode: HtmlMode,
    #[serde(default = "default_html_filename")]
    pub filename: String,
    #[serde(default = "default_html_title")]
    pub title: String,
    /// Overrides `channels.base_url` for the copied links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// List the channel directory instead of the channels of the current run.
    #[serde(default = "default_as_true")]
    pub from_directory: bool,
    #[serde(default = "default_as_true")]
    pub sort: bool,
    #[serde(default = "default_begin_marker")]
    pub begin_marker: String,
    #[serde(default = "default_end_marker")]
    pub end_marker: String,
    #[serde(default = "default_timestamp_pattern")]
    pub timestamp_pattern: String,
    #[serde(skip)]
    pub t_timestamp_regex: Option<Regex>,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: HtmlMode::default(),
            filename: default_html_filename(),
            title: default_html_title(),
            base_url: None,
            from_directory: true,
            sort: true,
            begin_marker: default_begin_marker(),
            end_marker: default_end_marker(),
            timestamp_pattern: default_timestamp_pattern(),
            t_timestamp_regex: None,
        }
    }
}

impl HtmlConfig {
    pub fn prepare(&mut self) -> Result<(), M3uChannelsError> {
        self.filename = self.filename.trim().to_string();
        if self.filename.is_empty() {
            return Err(info_err!("html filename can't be empty"));
        }
        if self.mode == HtmlMode::Template {
            if self.begin_marker.is_empty() || self.end_marker.is_empty() {
                return Err(info_err!("html template mode needs begin_marker and end_marker"));
            }
            if self.begin_marker == self.end_marker {
                return Err(info_err!("html begin_marker and end_marker must differ"));
            }
            match Regex::new(&self.timestamp_pattern) {
                Ok(re) => self.t_timestamp_regex = Some(re),
                Err(err) => return Err(info_err!("invalid html timestamp_pattern {}: {err}", self.timestamp_pattern)),
            }
        }
        Ok(())
    }
}
