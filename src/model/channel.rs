use indexmap::IndexMap;
use crate::utils::sanitize_for_filename;

/// One playlist entry: the `#EXTINF` line, its property lines and the stream url.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelRecord {
    pub name: String,
    pub logo: Option<String>,
    pub group: Option<String>,
    pub id: Option<String>,
    /// All `key="value"` attributes of the `#EXTINF` line, keys lower case.
    pub attributes: IndexMap<String, String>,
    pub stream_url: String,
    /// The source lines of the entry, joined with `\n`.
    pub raw_block: String,
    pub safe_file_name: String,
}

impl ChannelRecord {
    pub fn new(name: String, attributes: IndexMap<String, String>, stream_url: String, raw_block: String) -> Self {
        let non_empty = |key: &str| attributes.get(key).filter(|v| !v.is_empty()).cloned();
        let logo = non_empty("tvg-logo");
        let group = non_empty("group-title");
        let id = non_empty("tvg-id");
        let safe_file_name = sanitize_for_filename(&name);
        Self {
            name,
            logo,
            group,
            id,
            attributes,
            stream_url,
            raw_block,
            safe_file_name,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.safe_file_name, crate::utils::CHANNEL_FILE_EXT)
    }

    /// `#EXTINF` line for playlists which reference the channel file instead of the stream.
    /// Non empty attributes keep their source order, a group from `#EXTGRP` is added as `group-title`.
    pub fn to_index_extinf(&self) -> String {
        let mut line = String::from("#EXTINF:-1");
        for (key, value) in self.attributes.iter().filter(|(_, v)| !v.is_empty()) {
            line.push_str(&format!(" {key}=\"{value}\""));
        }
        if let Some(group) = self.group.as_ref().filter(|_| self.attributes.get("group-title").map_or(true, String::is_empty)) {
            line.push_str(&format!(" group-title=\"{group}\""));
        }
        line.push(',');
        line.push_str(&self.name);
        line
    }
}
