//! Entry Routine
//!
//! Measures the greeting, hands it to the kernel in one write and reports
//! status 0. The write's result is deliberately ignored: there is no error
//! path in this program.

use log::{debug, trace, warn};

use crate::config;
use crate::cstr;
use crate::syscall;

/// The greeting, zero-terminated. Eleven bytes are written; the terminator
/// and no newline.
pub const GREETING: &[u8] = b"Hello World\0";

/// Exit status reported by `run`.
pub const SUCCESS: i32 = 0;

/// Write the zero-terminated sequence at `ptr` to `config::WRITE_DESCRIPTOR`.
///
/// # Safety
/// Same contract as `cstr::strlen`: a zero byte must be reachable from `ptr`
/// through readable memory.
pub unsafe fn puts(ptr: *const u8) {
    // SAFETY: Forwarded from the caller
    let len = unsafe { cstr::strlen(ptr) };
    trace!("write fd={} len={}", config::WRITE_DESCRIPTOR, len);

    // SAFETY: strlen just read every one of these bytes
    let raw = unsafe { syscall::perform_write(config::WRITE_DESCRIPTOR, ptr as u64, len as u64) };
    trace!("write returned {:?}", raw);
}

/// Write a zero-terminated slice, stopping at its first zero byte.
///
/// A slice without a terminator is written whole rather than scanned past
/// its end.
pub fn put_cstr(bytes: &[u8]) {
    if cstr::is_terminated(bytes) {
        // SAFETY: The slice holds a terminator
        unsafe { puts(bytes.as_ptr()) };
        return;
    }

    warn!("unterminated sequence of {} bytes", bytes.len());
    // SAFETY: A slice is readable for its whole length
    let _ = unsafe {
        syscall::perform_write(
            config::WRITE_DESCRIPTOR,
            bytes.as_ptr() as u64,
            bytes.len() as u64,
        )
    };
}

/// The program: print the greeting and report success.
pub fn run() -> i32 {
    debug!("greeting {} bytes", cstr::terminated_len(GREETING));
    put_cstr(GREETING);
    SUCCESS
}
