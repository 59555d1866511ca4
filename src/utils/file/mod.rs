pub mod config_reader;
pub mod file_utils;
