//! Host Capture Backend
//!
//! Stands in for the kernel on targets without one. Each write is recorded
//! (descriptor plus bytes) in a fixed-size buffer instead of trapping.
//!
//! # Behaviour
//! - Registers come back shaped like the target kernel's: status Ok in x7
//!   and x0 left holding the descriptor (under `linux-abi`, x0 is the length)
//! - Writes are all or nothing. Once the buffer or the record table is full
//!   a write is rejected with `NoMemory` and nothing of it is recorded
//! - `Session` serialises users of the shared buffer and clears it on entry

use spin::{Mutex, MutexGuard};

use super::{OsError, RawResult};

/// Bytes the capture can hold across all writes.
pub const CAPACITY: usize = 1024;

/// Number of write calls the capture can record.
pub const MAX_WRITES: usize = 32;

/// One recorded write call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Record {
    descriptor: u64,
    start: usize,
    len: usize,
}

impl Record {
    const EMPTY: Record = Record {
        descriptor: 0,
        start: 0,
        len: 0,
    };
}

/// Recorded write calls, in issue order.
pub struct Capture {
    bytes: [u8; CAPACITY],
    used: usize,
    records: [Record; MAX_WRITES],
    count: usize,
}

impl Capture {
    const fn new() -> Self {
        Self {
            bytes: [0; CAPACITY],
            used: 0,
            records: [Record::EMPTY; MAX_WRITES],
            count: 0,
        }
    }

    fn clear(&mut self) {
        self.used = 0;
        self.count = 0;
    }

    fn record(&mut self, descriptor: u64, data: &[u8]) -> RawResult {
        if self.count == MAX_WRITES || data.len() > CAPACITY - self.used {
            return rejected(descriptor);
        }

        let end = self.used + data.len();
        self.bytes[self.used..end].copy_from_slice(data);
        self.records[self.count] = Record {
            descriptor,
            start: self.used,
            len: data.len(),
        };
        self.used = end;
        self.count += 1;

        accepted(descriptor, data.len())
    }

    /// Number of write calls recorded.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Recorded writes as `(descriptor, bytes)`.
    pub fn writes(&self) -> impl Iterator<Item = (u64, &[u8])> + '_ {
        self.records[..self.count]
            .iter()
            .map(|r| (r.descriptor, &self.bytes[r.start..r.start + r.len]))
    }
}

/// The target kernel sets only x7, so x0 still holds the descriptor.
#[cfg(not(feature = "linux-abi"))]
fn accepted(descriptor: u64, _len: usize) -> RawResult {
    RawResult::ok(descriptor)
}

#[cfg(not(feature = "linux-abi"))]
fn rejected(descriptor: u64) -> RawResult {
    RawResult::err(descriptor, OsError::NoMemory)
}

#[cfg(feature = "linux-abi")]
fn accepted(_descriptor: u64, len: usize) -> RawResult {
    RawResult::ok(len as u64)
}

#[cfg(feature = "linux-abi")]
fn rejected(_descriptor: u64) -> RawResult {
    RawResult::from_errno(-12) // ENOMEM
}

static CAPTURE: Mutex<Capture> = Mutex::new(Capture::new());
static SESSION: Mutex<()> = Mutex::new(());

/// Exclusive use of the capture buffer.
///
/// Dropping the session releases the buffer to the next user; the recorded
/// writes stay until the next session starts.
pub struct Session {
    _guard: MutexGuard<'static, ()>,
}

/// Start a session, waiting for any other one to finish, and clear the buffer.
pub fn session() -> Session {
    let guard = SESSION.lock();
    CAPTURE.lock().clear();
    Session { _guard: guard }
}

impl Session {
    /// Inspect the recorded writes.
    pub fn with<R>(&self, f: impl FnOnce(&Capture) -> R) -> R {
        let capture = CAPTURE.lock();
        f(&capture)
    }

    /// Hand each recorded write to `f`, then clear the buffer.
    pub fn drain(&self, mut f: impl FnMut(u64, &[u8])) {
        let mut capture = CAPTURE.lock();
        for (descriptor, bytes) in capture.writes() {
            f(descriptor, bytes);
        }
        capture.clear();
    }
}

/// Record a write call.
///
/// # Safety
/// `address..address + length` must be readable.
pub unsafe fn write(descriptor: u64, address: u64, length: u64) -> RawResult {
    let data = if length == 0 {
        &[][..]
    } else {
        // SAFETY: Caller guarantees the range is readable
        unsafe { core::slice::from_raw_parts(address as *const u8, length as usize) }
    };
    CAPTURE.lock().record(descriptor, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_in_order() {
        let mut capture = Capture::new();
        assert!(capture.record(1, b"ab").into_result().is_ok());
        assert!(capture.record(2, b"").into_result().is_ok());
        assert!(capture.record(1, b"cde").into_result().is_ok());

        let writes: Vec<_> = capture.writes().collect();
        assert_eq!(writes, vec![(1, &b"ab"[..]), (2, &b""[..]), (1, &b"cde"[..])]);
        assert_eq!(capture.len(), 3);
    }

    #[cfg(not(feature = "linux-abi"))]
    #[test]
    fn test_registers_match_kernel() {
        // Status Ok in x7, x0 untouched
        let mut capture = Capture::new();
        assert_eq!(capture.record(2, b"[INFO] x\n"), RawResult { value: 2, status: 1 });
        assert_eq!(capture.record(0, b"Hello World"), RawResult { value: 0, status: 1 });
    }

    #[test]
    fn test_full_capture_rejects_whole_write() {
        let mut capture = Capture::new();
        let big = [b'x'; CAPACITY - 4];
        assert!(capture.record(0, &big).into_result().is_ok());

        assert_eq!(capture.record(0, b"123456").into_result(), Err(OsError::NoMemory));
        // No prefix of the rejected write was kept
        assert_eq!(capture.len(), 1);
        assert!(capture.writes().all(|(_, bytes)| bytes.len() == CAPACITY - 4));

        // What still fits goes through
        assert!(capture.record(0, b"1234").into_result().is_ok());
        assert_eq!(capture.len(), 2);
    }

    #[test]
    fn test_record_table_full() {
        let mut capture = Capture::new();
        for _ in 0..MAX_WRITES {
            assert!(capture.record(0, b"x").into_result().is_ok());
        }
        assert_eq!(capture.record(0, b"x").into_result(), Err(OsError::NoMemory));
        assert_eq!(capture.len(), MAX_WRITES);
    }

    #[test]
    fn test_session_clears_and_drains() {
        let session = session();
        let msg = b"hello";
        unsafe { write(7, msg.as_ptr() as u64, msg.len() as u64) };
        assert_eq!(session.with(|c| c.len()), 1);

        let mut seen = Vec::new();
        session.drain(|fd, bytes| seen.push((fd, bytes.to_vec())));
        assert_eq!(seen, vec![(7, b"hello".to_vec())]);
        assert!(session.with(|c| c.is_empty()));
    }

    #[test]
    fn test_new_session_starts_empty() {
        {
            let _first = session();
            let msg = b"left over";
            unsafe { write(0, msg.as_ptr() as u64, msg.len() as u64) };
        }
        let second = session();
        assert!(second.with(|c| c.is_empty()));
    }
}
