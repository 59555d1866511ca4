use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, warn};
use regex::Regex;

use crate::m3u_channels_error::{create_m3u_channels_error_result, info_err, M3uChannelsError};
use crate::model::{ChannelRecord, Config, HtmlConfig, HtmlMode};
use crate::processing::parser::m3u::parse_m3u;
use crate::repository::channel_repository::read_channel_block;
use crate::utils::file::file_utils::{list_files_with_extension, write_text_file};
use crate::utils::{display_name_from_file_stem, html_escape, join_url, CHANNEL_FILE_EXT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlEntry {
    pub name: String,
    pub file_name: String,
    pub logo: Option<String>,
}

fn read_logo(path: &Path) -> Option<String> {
    match read_channel_block(path) {
        Ok(block) => parse_m3u(&block).into_iter().find_map(|r| r.logo),
        Err(err) => {
            warn!("cant read channel file {path:?}: {err}");
            None
        }
    }
}

/// Lists the channel directory, files of earlier runs are listed too.
pub fn entries_from_directory(dir: &Path) -> std::io::Result<Vec<HtmlEntry>> {
    let files = list_files_with_extension(dir, CHANNEL_FILE_EXT)?;
    Ok(files.iter().filter_map(|path| {
        let file_name = path.file_name()?.to_str()?.to_string();
        let stem = path.file_stem()?.to_str()?;
        Some(HtmlEntry {
            name: display_name_from_file_stem(stem),
            file_name,
            logo: read_logo(path),
        })
    }).collect())
}

/// One entry per channel file, a later record replaces an earlier one with the same file.
pub fn entries_from_records(records: &[ChannelRecord]) -> Vec<HtmlEntry> {
    let mut entries: IndexMap<String, HtmlEntry> = IndexMap::new();
    for record in records {
        let file_name = record.file_name();
        entries.insert(file_name.clone(), HtmlEntry {
            name: record.name.clone(),
            file_name,
            logo: record.logo.clone(),
        });
    }
    entries.into_values().collect()
}

pub fn sort_entries(entries: &mut [HtmlEntry]) {
    entries.sort_by_cached_key(|e| e.name.to_lowercase());
}

pub fn render_entries(entries: &[HtmlEntry], link_base: &str) -> String {
    let mut result = String::new();
    for entry in entries {
        let url = html_escape(&join_url(link_base, &entry.file_name));
        let name = html_escape(&entry.name);
        result.push_str("<li class=\"channel\">");
        if let Some(logo) = &entry.logo {
            result.push_str(&format!("<img src=\"{}\" alt=\"{name}\" loading=\"lazy\">", html_escape(logo)));
        }
        result.push_str(&format!("<a href=\"{url}\">{name}</a>"));
        result.push_str(&format!("<button type=\"button\" data-url=\"{url}\" onclick=\"copyLink(this)\">Copy</button>"));
        result.push_str("</li>\n");
    }
    result
}

fn timestamp_line(timestamp: &str) -> String {
    format!("Last updated: {}", html_escape(timestamp))
}

pub fn render_page(html: &HtmlConfig, entries_html: &str, count: usize, timestamp: &str) -> String {
    let title = html_escape(&html.title);
    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 2em; }}
ul {{ list-style: none; padding: 0; }}
.channel {{ display: flex; align-items: center; gap: 1em; padding: .4em 0; border-bottom: 1px solid #ddd; }}
.channel img {{ width: 48px; height: 48px; object-fit: contain; }}
.channel a {{ flex: 1; }}
</style>
</head>
<body>
<h1>{title}</h1>
<p>{count} channels</p>
<ul>
{begin}
{entries_html}{end}
</ul>
<footer>{footer}</footer>
<script>
function copyLink(button) {{
  const url = new URL(button.dataset.url, window.location.href).href;
  navigator.clipboard.writeText(url).then(() => {{
    const text = button.textContent;
    button.textContent = "Copied";
    setTimeout(() => {{ button.textContent = text; }}, 1500);
  }});
}}
</script>
</body>
</html>
"#, begin = html.begin_marker, end = html.end_marker, footer = timestamp_line(timestamp))
}

/// Replaces the text between the markers and the timestamp of an existing page.
/// The first group of the timestamp pattern is kept, the rest of the match becomes the timestamp.
/// Only the text outside of the markers is searched for the timestamp.
pub fn apply_template(page: &str, html: &HtmlConfig, timestamp_re: &Regex, entries_html: &str, timestamp: &str) -> Result<String, M3uChannelsError> {
    let Some(begin_pos) = page.find(&html.begin_marker) else {
        return create_m3u_channels_error_result!("html template marker not found: {}", html.begin_marker);
    };
    let content_start = begin_pos + html.begin_marker.len();
    let Some(end_offset) = page[content_start..].find(&html.end_marker) else {
        return create_m3u_channels_error_result!("html template marker not found: {}", html.end_marker);
    };
    let head = &page[..content_start];
    let tail = &page[content_start + end_offset..];

    let replacement = format!("${{1}}{}", html_escape(timestamp).replace('$', "$$"));
    let (head, tail) = if timestamp_re.is_match(head) {
        (timestamp_re.replace(head, replacement.as_str()), Cow::Borrowed(tail))
    } else if timestamp_re.is_match(tail) {
        (Cow::Borrowed(head), timestamp_re.replace(tail, replacement.as_str()))
    } else {
        warn!("html timestamp pattern {} not found", timestamp_re.as_str());
        (Cow::Borrowed(head), Cow::Borrowed(tail))
    };
    Ok(format!("{head}\n{entries_html}{tail}"))
}

pub fn write_html_index(cfg: &Config, html: &HtmlConfig, records: &[ChannelRecord], timestamp: &str) -> Result<PathBuf, M3uChannelsError> {
    let mut entries = if html.from_directory {
        entries_from_directory(&cfg.channels_path())
            .map_err(|err| info_err!("cant list channel directory {:?}: {err}", cfg.channels_path()))?
    } else {
        entries_from_records(records)
    };
    if html.sort {
        sort_entries(&mut entries);
    }
    debug!("html index with {} entries", entries.len());

    let link_base = html.base_url.as_deref().unwrap_or(&cfg.channels.base_url);
    let link_base = if link_base.is_empty() { cfg.channels.dir.as_str() } else { link_base };
    let entries_html = render_entries(&entries, link_base);

    let path = cfg.resolve_path(&html.filename);
    let page = match html.mode {
        HtmlMode::Full => render_page(html, &entries_html, entries.len(), timestamp),
        HtmlMode::Template => {
            let existing = fs::read_to_string(&path)
                .map_err(|err| info_err!("cant read html template {path:?}: {err}"))?;
            let Some(timestamp_re) = html.t_timestamp_regex.as_ref() else {
                return create_m3u_channels_error_result!("html timestamp pattern not prepared");
            };
            apply_template(&existing, html, timestamp_re, &entries_html, timestamp)?
        }
    };
    write_text_file(&path, &page).map_err(|err| info_err!("cant write html index {path:?}: {err}"))?;
    Ok(path)
}
