use clap::Parser;
use log::{debug, info};

use crate::processing::playlist_processor::process_playlist;
use crate::utils::file::config_reader::read_config;
use crate::utils::network::request::set_sanitize_sensitive_info;

mod m3u_channels_error;
mod model;
mod processing;
mod repository;
mod utils;

#[derive(Parser)]
#[command(name = "m3u-channels")]
#[command(version)]
#[command(about = "Splits an extended M3U playlist into channel files, aggregate playlists and an html index", long_about = None)]
struct Args {
    /// The config file
    #[arg(short = 'c', long = "config")]
    config_file: Option<String>,

    /// Input url or filename, overrides the configured source
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Log level (error, warn, info, debug, trace), overrides the configured level
    #[arg(short = 'l', long = "log-level")]
    log_level: Option<String>,
}

fn init_logger(log_level: Option<&str>) {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(level) = log_level {
        builder.parse_filters(level);
    }
    builder.init();
}

fn main() {
    let args = Args::parse();
    let config = read_config(args.config_file.as_deref());

    let log_level = args.log_level.clone().or_else(|| config.as_ref().ok().and_then(|(cfg, _)| cfg.log_level().map(String::from)));
    init_logger(log_level.as_deref());
    if let Some(build_time) = option_env!("VERGEN_BUILD_TIMESTAMP") {
        debug!("build time: {build_time}");
    }

    let (cfg, config_path) = match config {
        Ok(result) => result,
        Err(err) => utils::exit!("{}", err),
    };
    set_sanitize_sensitive_info(cfg.sanitize_sensitive_info());
    match &config_path {
        Some(path) => info!("config file: {path:?}"),
        None => info!("no config file found, using defaults"),
    }
    info!("working dir: {:?}", cfg.working_path());

    if let Err(err) = process_playlist(&cfg, args.input.as_deref()) {
        utils::exit!("{}", err);
    }
}
