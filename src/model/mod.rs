mod channel;
mod config;
mod config_aggregate;
mod config_channels;
mod config_html;
mod config_log;
mod config_probe;
mod config_source;
mod config_timestamp;
mod stats;

pub use self::channel::*;
pub use self::config::*;
pub use self::config_aggregate::*;
pub use self::config_channels::*;
pub use self::config_html::*;
pub use self::config_log::*;
pub use self::config_probe::*;
pub use self::config_source::*;
pub use self::config_timestamp::*;
pub use self::stats::*;
