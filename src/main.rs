//! svc-hello - entry point
//!
//! On `aarch64-unknown-none` there is no runtime: `_start` is the first code
//! the process runs and it must end the process itself with an exit call.
//! On a hosted target the same program runs against the capture backend and
//! the recorded writes are replayed to the host's stdout and stderr.

#![cfg_attr(all(target_arch = "aarch64", target_os = "none"), no_std)]
#![cfg_attr(all(target_arch = "aarch64", target_os = "none"), no_main)]
#![deny(unsafe_op_in_unsafe_fn)]

#[cfg(all(target_arch = "aarch64", target_os = "none"))]
mod bare {
    use core::panic::PanicInfo;

    use log::error;
    use svc_hello::{config, logger, program, syscall};

    /// Process entry point
    ///
    /// The kernel's loader jumps here once with a valid stack; nothing has
    /// been initialised before this.
    #[no_mangle]
    pub extern "C" fn _start() -> ! {
        // Diagnostics are optional; a failed install only loses log output
        let _ = logger::init();

        let status = program::run();
        syscall::exit(status);
    }

    /// Panic handler - log what we can and leave with a failure status
    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        if let Some(location) = info.location() {
            error!(
                "panic at {}:{}:{}: {}",
                location.file(),
                location.line(),
                location.column(),
                info.message()
            );
        } else {
            error!("panic: {}", info.message());
        }

        syscall::exit(config::PANIC_STATUS);
    }
}

#[cfg(not(all(target_arch = "aarch64", target_os = "none")))]
fn main() {
    use std::io::Write;

    use svc_hello::syscall::capture;
    use svc_hello::{logger, program};

    const STDERR: u64 = 2;

    let _ = logger::init();

    let session = capture::session();
    let status = program::run();

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    session.drain(|descriptor, bytes| {
        let _ = if descriptor == STDERR {
            stderr.lock().write_all(bytes)
        } else {
            stdout.lock().write_all(bytes)
        };
    });
    let _ = stdout.lock().flush();

    std::process::exit(status);
}
