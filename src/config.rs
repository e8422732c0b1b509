//! Build-time configuration
//!
//! Everything here is environment specific. Values are fixed at compile time
//! through cargo features and `option_env!`; nothing is read at run time.

use log::LevelFilter;

/// Descriptor the greeting is written to.
///
/// The legacy program writes to descriptor 0 even though standard output is
/// conventionally 1. Enable the `stdout-descriptor` feature to use 1.
#[cfg(not(feature = "stdout-descriptor"))]
pub const WRITE_DESCRIPTOR: u64 = 0;

/// Descriptor the greeting is written to.
#[cfg(feature = "stdout-descriptor")]
pub const WRITE_DESCRIPTOR: u64 = 1;

/// Descriptor for console and log output.
///
/// The target kernel prints descriptor 0 and silently drops every other one,
/// so diagnostics share the console with the greeting there.
#[cfg(not(feature = "linux-abi"))]
pub const LOG_DESCRIPTOR: u64 = 0;

/// Descriptor for console and log output: stderr.
#[cfg(feature = "linux-abi")]
pub const LOG_DESCRIPTOR: u64 = 2;

/// How many times the console retries a write the kernel rejected.
pub const WRITE_RETRIES: usize = 8;

/// Exit status used by the panic handler.
pub const PANIC_STATUS: i32 = 101;

/// Maximum log level, taken from `SVC_HELLO_LOG` at build time.
///
/// Defaults to `Off` so the greeting is the only output.
pub const LOG_LEVEL: LevelFilter = parse_level(option_env!("SVC_HELLO_LOG"));

/// Parse a level name (case-insensitive). Unknown names turn logging off.
pub const fn parse_level(name: Option<&str>) -> LevelFilter {
    let name = match name {
        Some(name) => name.as_bytes(),
        None => return LevelFilter::Off,
    };

    if eq_ignore_case(name, b"error") {
        LevelFilter::Error
    } else if eq_ignore_case(name, b"warn") {
        LevelFilter::Warn
    } else if eq_ignore_case(name, b"info") {
        LevelFilter::Info
    } else if eq_ignore_case(name, b"debug") {
        LevelFilter::Debug
    } else if eq_ignore_case(name, b"trace") {
        LevelFilter::Trace
    } else {
        LevelFilter::Off
    }
}

const fn eq_ignore_case(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i].to_ascii_lowercase() != b[i].to_ascii_lowercase() {
            return false;
        }
        i += 1;
    }
    true
}
