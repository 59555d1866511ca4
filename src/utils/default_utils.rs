pub(crate) fn default_as_true() -> bool { true }

pub(crate) fn default_as_empty_list<T>() -> Vec<T> { vec![] }

pub(crate) fn default_fetch_timeout_secs() -> u64 { 30 }

pub(crate) fn default_probe_timeout_secs() -> u64 { 5 }

pub(crate) fn default_channels_dir() -> String { String::from("channels") }

pub(crate) fn default_html_filename() -> String { String::from("index.html") }

pub(crate) fn default_html_title() -> String { String::from("Channels") }

pub(crate) fn default_begin_marker() -> String { String::from("<!-- CHANNELS_START -->") }

pub(crate) fn default_end_marker() -> String { String::from("<!-- CHANNELS_END -->") }

pub(crate) fn default_timestamp_pattern() -> String { String::from("(Last updated: )[^<]*") }

pub(crate) fn default_timestamp_offset() -> String { String::from("+05:30") }

pub(crate) fn default_timestamp_format() -> String { String::from("%Y-%m-%d %H:%M:%S %z") }
