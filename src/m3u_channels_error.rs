use std::error::Error;
use std::fmt::{Display, Formatter, Result};

#[macro_export]
macro_rules! create_m3u_channels_error_result {
     ($($arg:tt)*) => {
        Err(M3uChannelsError::new(format!($($arg)*)))
    }
}

#[macro_export]
macro_rules! info_err {
    ($($arg:tt)*) => {
        M3uChannelsError::new(format!($($arg)*))
    }
}

pub use create_m3u_channels_error_result;
pub use info_err;

/// Failure of a run or of a single pipeline step.
#[derive(Debug)]
pub struct M3uChannelsError {
    pub message: String,
}

impl M3uChannelsError {
    pub const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

impl Display for M3uChannelsError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "M3uChannels error: {}", self.message)
    }
}

impl Error for M3uChannelsError {}

impl From<std::io::Error> for M3uChannelsError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

pub fn str_to_io_error(err: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err)
}
