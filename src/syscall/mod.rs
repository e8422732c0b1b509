//! System Call Interface
//!
//! The only non-portable code in the crate. Everything that traps into the
//! kernel goes through `perform_write` and `exit`.
//!
//! # Backends
//! - `aarch64-unknown-none`: inline `svc` (see `svc.rs`)
//! - any other target: `capture`, which records writes in memory
//!
//! # Current Syscalls
//! - exit(status) - terminate the process
//! - write(fd, buf, len) - write to a file descriptor

mod status;

#[cfg(all(target_arch = "aarch64", target_os = "none"))]
mod svc;
#[cfg(all(target_arch = "aarch64", target_os = "none"))]
use svc as backend;

#[cfg(not(all(target_arch = "aarch64", target_os = "none")))]
pub mod capture;
#[cfg(not(all(target_arch = "aarch64", target_os = "none")))]
use capture as backend;

pub use status::{OsError, OsResult, RawResult};

/// System call numbers
///
/// The target kernel encodes the number as the `svc` immediate; write is 5
/// and exit is 2. These do not match AArch64 Linux (64 and 93), which the
/// `linux-abi` feature selects instead.
pub mod numbers {
    #[cfg(not(feature = "linux-abi"))]
    pub const SYS_EXIT: u16 = 2;
    #[cfg(not(feature = "linux-abi"))]
    pub const SYS_WRITE: u16 = 5;

    #[cfg(feature = "linux-abi")]
    pub const SYS_EXIT: u16 = 93;
    #[cfg(feature = "linux-abi")]
    pub const SYS_WRITE: u16 = 64;
}

/// Write `length` bytes at `address` to `descriptor`, straight to the kernel.
///
/// The registers the kernel returns are passed back untouched; nothing is
/// checked here.
///
/// # Safety
/// `address..address + length` must be readable for the duration of the call.
#[inline(never)]
pub unsafe fn perform_write(descriptor: u64, address: u64, length: u64) -> RawResult {
    // SAFETY: Forwarded from the caller
    unsafe { backend::write(descriptor, address, length) }
}

/// Write `bytes` to `descriptor` and decode the kernel's status.
///
/// # Returns
/// Number of bytes the kernel accepted, or the error it reported. A failed
/// call has written nothing, so it can be retried from the start.
pub fn write(descriptor: u64, bytes: &[u8]) -> OsResult<usize> {
    // SAFETY: A slice is readable for its whole length
    let raw = unsafe { perform_write(descriptor, bytes.as_ptr() as u64, bytes.len() as u64) };
    accepted(raw, bytes.len())
}

/// Bytes a write of `requested` bytes got through.
///
/// The target kernel writes all or nothing and sets only x7, leaving the
/// descriptor in x0, so status Ok means the whole buffer.
#[cfg(not(feature = "linux-abi"))]
fn accepted(raw: RawResult, requested: usize) -> OsResult<usize> {
    raw.into_result()?;
    Ok(requested)
}

/// Bytes a write of `requested` bytes got through.
///
/// Linux returns the count in x0 and may stop short.
#[cfg(feature = "linux-abi")]
fn accepted(raw: RawResult, requested: usize) -> OsResult<usize> {
    let written = raw.into_result()?;
    Ok((written as usize).min(requested))
}

/// Terminate the process with `status`.
///
/// If the kernel ever returns from the exit call, spin forever rather than
/// run past the end of the program.
#[cfg(all(target_arch = "aarch64", target_os = "none"))]
pub fn exit(status: i32) -> ! {
    backend::exit(status);
    loop {
        core::hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        #[cfg(not(feature = "linux-abi"))]
        assert_eq!((numbers::SYS_WRITE, numbers::SYS_EXIT), (5, 2));
        #[cfg(feature = "linux-abi")]
        assert_eq!((numbers::SYS_WRITE, numbers::SYS_EXIT), (64, 93));
    }

    #[test]
    fn test_perform_write_passes_arguments_through() {
        let session = capture::session();
        let msg = b"Hello World";
        let raw = unsafe { perform_write(3, msg.as_ptr() as u64, 5) };
        assert!(raw.into_result().is_ok());

        session.with(|c| {
            let writes: Vec<_> = c.writes().collect();
            assert_eq!(writes, vec![(3, &b"Hello"[..])]);
        });
    }

    #[cfg(not(feature = "linux-abi"))]
    #[test]
    fn test_accepted_ignores_x0() {
        // x0 still holds the descriptor after a successful call
        let kernel = RawResult { value: 2, status: 1 };
        assert_eq!(accepted(kernel, 9), Ok(9));

        let kernel = RawResult { value: 0, status: 1 };
        assert_eq!(accepted(kernel, 11), Ok(11));

        let kernel = RawResult { value: 0, status: OsError::IoErrorTimedOut as u64 };
        assert_eq!(accepted(kernel, 11), Err(OsError::IoErrorTimedOut));
    }

    #[cfg(feature = "linux-abi")]
    #[test]
    fn test_accepted_uses_count() {
        assert_eq!(accepted(RawResult::from_errno(4), 9), Ok(4));
        assert_eq!(accepted(RawResult::from_errno(-5), 9), Err(OsError::IoError));
    }

    #[test]
    fn test_write_checked() {
        let session = capture::session();
        assert_eq!(write(1, b"abc"), Ok(3));
        assert_eq!(write(1, b""), Ok(0));
        assert_eq!(session.with(|c| c.len()), 2);
    }

    #[test]
    fn test_write_rejected_when_full() {
        let _session = capture::session();
        let big = [b'x'; capture::CAPACITY];
        assert_eq!(write(1, &big), Ok(capture::CAPACITY));
        assert_eq!(write(1, b"overflow"), Err(OsError::NoMemory));
    }
}
