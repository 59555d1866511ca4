use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, error};
use path_clean::PathClean;

use crate::utils::constants::CONFIG_FILE;

pub fn file_writer<W>(w: W) -> BufWriter<W>
where
    W: Write,
{
    BufWriter::with_capacity(131_072, w)
}

pub fn get_exe_path() -> PathBuf {
    let default_path = PathBuf::from("./");
    let current_exe = std::env::current_exe();
    match current_exe {
        Ok(exe) => {
            match fs::read_link(&exe) {
                Ok(f) => f.parent().map_or(default_path, Path::to_path_buf),
                Err(_) => exe.parent().map_or(default_path, Path::to_path_buf)
            }
        }
        Err(_) => default_path
    }
}

/// The config next to the executable wins over the one in the current directory.
pub fn get_default_config_path() -> PathBuf {
    let exe_config = get_exe_path().join(CONFIG_FILE);
    if exe_config.exists() {
        exe_config
    } else {
        PathBuf::from(CONFIG_FILE)
    }
}

pub fn get_working_path(wd: &str) -> PathBuf {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if wd.is_empty() {
        current_dir
    } else {
        let work_path = PathBuf::from(wd);
        if let Err(err) = fs::create_dir_all(&work_path) {
            error!("cant create working dir {work_path:?}: {err}");
        }
        if work_path.is_relative() {
            current_dir.join(work_path).clean()
        } else {
            work_path.clean()
        }
    }
}

pub fn get_file_path(wd: &Path, path: &str) -> PathBuf {
    let p = PathBuf::from(path);
    if p.is_relative() {
        wd.join(&p).clean()
    } else {
        p
    }
}

pub fn persist_file(persist_file: Option<&Path>, text: &str) {
    if let Some(path_buf) = persist_file {
        let filename = path_buf.to_str().unwrap_or("?");
        match File::create(path_buf) {
            Ok(mut file) => match file.write_all(text.as_bytes()) {
                Ok(()) => debug!("persisted: {filename}"),
                Err(e) => error!("failed to persist file {filename}, {e}")
            },
            Err(e) => error!("failed to persist file {filename}, {e}")
        }
    }
}

pub fn write_text_file(path: &Path, content: &str) -> std::io::Result<()> {
    let mut writer = file_writer(File::create(path)?);
    writer.write_all(content.as_bytes())?;
    writer.flush()
}

/// Files of the directory carrying the given extension, ordered by file name.
pub fn list_files_with_extension(dir: &Path, ext: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e.eq_ignore_ascii_case(ext)) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
