use chrono::format::{Item, StrftimeItems};
use chrono::{Offset, Utc};
use crate::m3u_channels_error::{info_err, M3uChannelsError};
use crate::utils::{default_timestamp_format, default_timestamp_offset, format_timestamp, parse_fixed_offset};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimestampConfig {
    #[serde(default = "default_timestamp_offset")]
    pub offset: String,
    #[serde(default = "default_timestamp_format")]
    pub format: String,
    #[serde(skip)]
    pub t_offset: Option<chrono::FixedOffset>,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self {
            offset: default_timestamp_offset(),
            format: default_timestamp_format(),
            t_offset: None,
        }
    }
}

impl TimestampConfig {
    pub fn prepare(&mut self) -> Result<(), M3uChannelsError> {
        match parse_fixed_offset(&self.offset) {
            Some(offset) => self.t_offset = Some(offset),
            None => return Err(info_err!("invalid timestamp offset: {}", self.offset)),
        }
        if self.format.trim().is_empty() {
            self.format = default_timestamp_format();
        }
        if StrftimeItems::new(&self.format).any(|item| matches!(item, Item::Error)) {
            return Err(info_err!("invalid timestamp format: {}", self.format));
        }
        Ok(())
    }

    pub fn now(&self) -> String {
        let offset = self.t_offset.or_else(|| parse_fixed_offset(&self.offset)).unwrap_or_else(|| Utc.fix());
        format_timestamp(offset, &self.format)
    }
}
