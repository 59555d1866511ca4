use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::m3u_channels_error::{create_m3u_channels_error_result, M3uChannelsError};
use crate::model::Config;
use crate::utils::file::file_utils::get_default_config_path;

static ENV_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{env:(?P<var>[a-zA-Z_][a-zA-Z0-9_]*)}").unwrap());

pub fn resolve_env_var(value: &str) -> String {
    ENV_REGEX.replace_all(value, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_else(|_| format!("${{env:{var_name}}}"))
    }).to_string()
}

pub fn parse_config(content: &str) -> Result<Config, M3uChannelsError> {
    match serde_yaml::from_str::<Config>(&resolve_env_var(content)) {
        Ok(mut cfg) => {
            cfg.prepare()?;
            Ok(cfg)
        }
        Err(e) => create_m3u_channels_error_result!("cant read config file: {}", e),
    }
}

/// An explicitly given config file has to exist, without one the defaults are used
/// when no config file is found next to the executable or in the current directory.
pub fn read_config(config_file: Option<&str>) -> Result<(Config, Option<PathBuf>), M3uChannelsError> {
    let (path, mandatory) = match config_file {
        Some(file) => (PathBuf::from(file), true),
        None => (get_default_config_path(), false),
    };
    match fs::read_to_string(&path) {
        Ok(content) => parse_config(&content).map(|cfg| (cfg, Some(path))),
        Err(err) => {
            if mandatory {
                create_m3u_channels_error_result!("cant read config file {}: {}", path.to_str().unwrap_or("?"), err)
            } else {
                let mut cfg = Config::default();
                cfg.prepare()?;
                Ok((cfg, None))
            }
        }
    }
}
