//! `log` backend over the syscall console.

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::config;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            crate::uprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the console logger at `config::LOG_LEVEL`.
pub fn init() -> Result<(), SetLoggerError> {
    init_with_level(config::LOG_LEVEL)
}

/// Install the console logger at `level`.
///
/// Fails if a logger is already installed; the level is left unchanged then.
pub fn init_with_level(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}
