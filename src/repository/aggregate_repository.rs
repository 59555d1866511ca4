use std::path::PathBuf;

use crate::m3u_channels_error::{create_m3u_channels_error_result, M3uChannelsError};
use crate::model::{AggregateConfig, AggregateKind, ChannelRecord, Config};
use crate::utils::file::file_utils::write_text_file;
use crate::utils::{join_url, M3U_HEADER};

macro_rules! cant_write_result {
    ($path:expr, $err:expr) => {
        create_m3u_channels_error_result!("failed to write aggregate playlist: {} - {}", $path.to_str().unwrap_or("?"), $err)
    }
}

fn strip_header(source: &str) -> &str {
    let trimmed = source.trim_start_matches('\u{feff}');
    match trimmed.split_once('\n') {
        Some((first, rest)) if first.trim_end().starts_with(M3U_HEADER) => rest,
        None if trimmed.trim_end().starts_with(M3U_HEADER) => "",
        _ => source,
    }
}

/// The source as it was fetched, a missing `#EXTM3U` header is added.
pub fn build_clone(source: &str) -> String {
    if source.trim_start_matches('\u{feff}').starts_with(M3U_HEADER) {
        source.to_string()
    } else {
        format!("{M3U_HEADER}\n{source}")
    }
}

/// One `#EXTINF` line and one url line per record, the urls point at the published channel files.
pub fn build_index<'a, I>(records: I, base_url: &str) -> String
where
    I: IntoIterator<Item=&'a ChannelRecord>,
{
    let mut result = String::from(M3U_HEADER);
    result.push('\n');
    for record in records {
        result.push_str(&record.to_index_extinf());
        result.push('\n');
        result.push_str(&join_url(base_url, &record.file_name()));
        result.push('\n');
    }
    result
}

pub fn build_mirror(source: &str, comment: Option<&str>, timestamp: &str, footer: &[String]) -> String {
    let mut result = format!("{M3U_HEADER}\n");
    if let Some(text) = comment {
        result.push_str(&format!("# {text}\n"));
    }
    result.push_str(&format!("# Last updated on {timestamp}\n\n"));
    let body = strip_header(source);
    result.push_str(body);
    if !body.is_empty() && !body.ends_with('\n') {
        result.push('\n');
    }
    if !footer.is_empty() {
        result.push('\n');
        for line in footer {
            result.push_str(&format!("# {line}\n"));
        }
    }
    result
}

pub fn write_aggregate(cfg: &Config, aggregate: &AggregateConfig, source: &str, included: &[&ChannelRecord], timestamp: &str) -> Result<PathBuf, M3uChannelsError> {
    let content = match aggregate.kind {
        AggregateKind::Clone => build_clone(source),
        AggregateKind::Index => {
            let base_url = aggregate.base_url.as_deref().unwrap_or(&cfg.channels.base_url);
            build_index(included.iter().copied(), base_url)
        }
        AggregateKind::Mirror => build_mirror(source, aggregate.comment.as_deref(), timestamp, &aggregate.footer),
    };
    let path = cfg.resolve_path(&aggregate.filename);
    match write_text_file(&path, &content) {
        Ok(()) => Ok(path),
        Err(err) => cant_write_result!(path, err),
    }
}
