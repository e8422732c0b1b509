//! Syscall Console
//!
//! Formatted output over the checked write syscall, for diagnostics only.
//! The greeting itself never goes through here.
//!
//! # Behaviour
//! - Output goes to `config::LOG_DESCRIPTOR`
//! - A rejected write has written nothing, so it is retried whole, up to
//!   `config::WRITE_RETRIES` times, then reported as `fmt::Error`
//! - A short count (Linux only) resumes after the bytes already written
//! - A spinlock keeps lines from different callers apart

use core::fmt::{self, Write};
use spin::Mutex;

use crate::config;
use crate::syscall::{self, OsError};

/// Console bound to one descriptor
pub struct Console {
    descriptor: u64,
}

impl Console {
    pub const fn new(descriptor: u64) -> Self {
        Self { descriptor }
    }

    /// Descriptor this console writes to
    pub fn descriptor(&self) -> u64 {
        self.descriptor
    }

    /// Write all of `bytes`, retrying failed calls.
    pub fn write_bytes(&self, mut bytes: &[u8]) -> Result<(), OsError> {
        let mut failures = 0;

        while !bytes.is_empty() {
            match syscall::write(self.descriptor, bytes) {
                Ok(0) => return Err(OsError::IoError),
                Ok(n) => bytes = &bytes[n.min(bytes.len())..],
                Err(e) => {
                    failures += 1;
                    if failures > config::WRITE_RETRIES {
                        return Err(e);
                    }
                }
            }
        }

        Ok(())
    }
}

impl Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Global console protected by spinlock
pub static CONSOLE: Mutex<Console> = Mutex::new(Console::new(config::LOG_DESCRIPTOR));

/// Print to the diagnostics descriptor
#[macro_export]
macro_rules! uprint {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut console = $crate::console::CONSOLE.lock();
        let _ = write!(console, $($arg)*);
    }};
}

/// Print a line to the diagnostics descriptor
#[macro_export]
macro_rules! uprintln {
    () => {
        $crate::uprint!("\n")
    };
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut console = $crate::console::CONSOLE.lock();
        let _ = write!(console, $($arg)*);
        let _ = console.write_str("\n");
    }};
}
