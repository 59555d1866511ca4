use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::model::ChannelRecord;
use crate::utils::file::file_utils::{list_files_with_extension, write_text_file};
use crate::utils::{CHANNEL_FILE_EXT, EXTINF_PREFIX, M3U_HEADER};

pub fn channel_file_content(record: &ChannelRecord, timestamp: &str) -> String {
    format!("{M3U_HEADER}\n# Generated on {timestamp}\n\n{}\n", record.raw_block)
}

/// Creates the channel directory, optionally removing channel files of earlier runs.
pub fn prepare_channel_dir(dir: &Path, clean: bool) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    if clean {
        let stale = list_files_with_extension(dir, CHANNEL_FILE_EXT)?;
        debug!("removing {} channel files from {dir:?}", stale.len());
        for file in stale {
            fs::remove_file(file)?;
        }
    }
    Ok(())
}

/// Existing files are overwritten, names which collide after sanitizing end up in one file.
pub fn write_channel(dir: &Path, record: &ChannelRecord, timestamp: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(record.file_name());
    write_text_file(&path, &channel_file_content(record, timestamp))?;
    Ok(path)
}

/// The channel block of a channel file, starting at its `#EXTINF` line.
/// Header lines are skipped whatever run wrote them.
pub fn read_channel_block(path: &Path) -> std::io::Result<String> {
    let content = fs::read_to_string(path)?;
    let block = content.lines()
        .skip_while(|line| !line.trim_start_matches('\u{feff}').trim_start().starts_with(EXTINF_PREFIX))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(block)
}
