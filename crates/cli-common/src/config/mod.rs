mod log;

pub use self::log::{Error as LogError, LogConfig, LogFormatter, LogOutput};
