//! AArch64 supervisor calls
//!
//! Default convention: the syscall number is the `svc` immediate, arguments
//! go in x0-x2 and the kernel reports a status in x7. Write does not touch
//! x0, so it comes back holding the descriptor.
//!
//! With `linux-abi`: the number goes in x8, `svc #0`, and x0 comes back as
//! the result or `-errno`. Every other register is preserved.

use core::arch::asm;

use super::numbers;
use super::RawResult;

/// Issue the write call.
///
/// # Safety
/// `address..address + length` must be readable for the duration of the call.
#[cfg(not(feature = "linux-abi"))]
pub unsafe fn write(descriptor: u64, address: u64, length: u64) -> RawResult {
    let value: u64;
    let status: u64;

    // SAFETY: Caller guarantees the buffer is readable. The kernel only
    // touches x0-x2 and x7, all declared here.
    unsafe {
        asm!(
            "svc {nr}",
            nr = const numbers::SYS_WRITE,
            inlateout("x0") descriptor => value,
            inlateout("x1") address => _,
            inlateout("x2") length => _,
            lateout("x7") status,
            options(nostack),
        );
    }

    RawResult { value, status }
}

/// Issue the write call.
///
/// # Safety
/// `address..address + length` must be readable for the duration of the call.
#[cfg(feature = "linux-abi")]
pub unsafe fn write(descriptor: u64, address: u64, length: u64) -> RawResult {
    let ret: i64;

    // SAFETY: Caller guarantees the buffer is readable. Linux clobbers only x0.
    unsafe {
        asm!(
            "svc #0",
            in("x8") numbers::SYS_WRITE as u64,
            inlateout("x0") descriptor as i64 => ret,
            in("x1") address,
            in("x2") length,
            options(nostack),
        );
    }

    RawResult::from_errno(ret)
}

/// Ask the kernel to terminate the process.
///
/// Returns only if the kernel refuses, in which case the caller must not
/// continue running user code.
#[cfg(not(feature = "linux-abi"))]
pub fn exit(status: i32) {
    // SAFETY: The exit call reads no memory from us
    unsafe {
        asm!(
            "svc {nr}",
            nr = const numbers::SYS_EXIT,
            inlateout("x0") status as i64 as u64 => _,
            lateout("x1") _,
            lateout("x2") _,
            lateout("x7") _,
            options(nostack, nomem),
        );
    }
}

/// Ask the kernel to terminate the process.
#[cfg(feature = "linux-abi")]
pub fn exit(status: i32) {
    // SAFETY: The exit call reads no memory from us
    unsafe {
        asm!(
            "svc #0",
            in("x8") numbers::SYS_EXIT as u64,
            inlateout("x0") status as i64 => _,
            options(nostack, nomem),
        );
    }
}
