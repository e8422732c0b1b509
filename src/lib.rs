//! svc-hello - Freestanding ARM64 "Hello World"
//!
//! Prints a fixed greeting by trapping straight into the kernel with a
//! supervisor call. No libc, no runtime start-up, no buffered I/O.
//!
//! # Layout
//! - `cstr`: length of zero-terminated byte sequences
//! - `syscall`: the only non-portable code (inline `svc`)
//! - `program`: the entry routine
//! - `console` / `logger`: optional diagnostics over the same syscall
//! - `config`: environment-specific constants
//!
//! # Targets
//! - `aarch64-unknown-none`: the real thing, `_start` traps into the kernel
//! - anything else: writes are recorded by `syscall::capture` so the logic
//!   can be exercised by the host test harness

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod console;
pub mod cstr;
pub mod logger;
pub mod program;
pub mod syscall;
