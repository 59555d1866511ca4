mod constants;
mod default_utils;
mod string_utils;
mod step_measure;
mod sys_utils;
mod time_utils;
pub mod compression;
pub mod file;
pub mod network;

#[macro_export]
macro_rules! debug_if_enabled {
    ($fmt:expr, $( $args:expr ),*) => {
        if log::log_enabled!(log::Level::Debug) {
            log::log!(log::Level::Debug, $fmt, $($args),*);
        }
    };

    ($txt:expr) => {
        if log::log_enabled!(log::Level::Debug) {
            log::log!(log::Level::Debug, $txt);
        }
    };
}

pub use debug_if_enabled;

pub use self::constants::*;
pub(crate) use self::default_utils::*;
pub use self::string_utils::*;
pub use self::step_measure::*;
pub use self::sys_utils::*;
pub use self::time_utils::*;
