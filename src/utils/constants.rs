use regex::Regex;
use std::sync::LazyLock;

pub const CONFIG_FILE: &str = "config.yml";

pub const M3U_HEADER: &str = "#EXTM3U";
pub const EXTINF_PREFIX: &str = "#EXTINF";
pub const EXTGRP_PREFIX: &str = "#EXTGRP:";
pub const CHANNEL_FILE_EXT: &str = "m3u8";

pub const EMPTY_FILENAME_REPLACEMENT: &str = "unnamed";

// property lines which belong to the channel block they follow
pub const PROPERTY_PREFIXES: &[&str] = &["#EXTVLCOPT", "#KODIPROP", "#EXTHTTP", "#EXTGRP", "#EXT-X-"];

pub const STREAM_SCHEMES: &[&str] = &["http://", "https://"];

pub struct Constants {
    pub re_username: Regex,
    pub re_password: Regex,
    pub re_token: Regex,
    pub re_filename: Regex,
}

pub static CONSTANTS: LazyLock<Constants> = LazyLock::new(||
    Constants {
        re_username: Regex::new(r"(username=)[^&]*").unwrap(),
        re_password: Regex::new(r"(password=)[^&]*").unwrap(),
        re_token: Regex::new(r"(token=)[^&]*").unwrap(),
        re_filename: Regex::new(r"[^A-Za-z0-9_-]").unwrap(),
    }
);
