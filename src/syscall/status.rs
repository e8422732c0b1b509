//! Syscall Status Decoding
//!
//! The kernel hands back two registers after a supervisor call: x0 carries
//! the call's value and x7 carries a status code, where 1 means success.

/// Result type for checked system calls.
pub type OsResult<T> = Result<T, OsError>;

/// Status codes reported by the kernel in x7.
#[repr(u64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsError {
    Unknown = 0,
    Ok = 1,

    NoEntry = 10,
    NoMemory = 20,
    NoVmSpace = 30,
    NoAccess = 40,
    BadAddress = 50,
    FileExists = 60,
    InvalidArgument = 70,

    IoError = 101,
    IoErrorEof = 102,
    IoErrorInvalidData = 103,
    IoErrorInvalidInput = 104,
    IoErrorTimedOut = 105,

    InvalidSocket = 200,
    IllegalSocketOperation = 201,
}

impl From<u64> for OsError {
    fn from(status: u64) -> Self {
        match status {
            1 => OsError::Ok,

            10 => OsError::NoEntry,
            20 => OsError::NoMemory,
            30 => OsError::NoVmSpace,
            40 => OsError::NoAccess,
            50 => OsError::BadAddress,
            60 => OsError::FileExists,
            70 => OsError::InvalidArgument,

            101 => OsError::IoError,
            102 => OsError::IoErrorEof,
            103 => OsError::IoErrorInvalidData,
            104 => OsError::IoErrorInvalidInput,
            105 => OsError::IoErrorTimedOut,

            200 => OsError::InvalidSocket,
            201 => OsError::IllegalSocketOperation,

            _ => OsError::Unknown,
        }
    }
}

/// Registers returned by a supervisor call, uninterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawResult {
    /// x0: call-specific. The target kernel's write leaves the descriptor
    /// here; Linux puts the byte count or `-errno` here
    pub value: u64,
    /// x7: kernel status code
    pub status: u64,
}

impl RawResult {
    /// A successful call that produced `value`.
    pub const fn ok(value: u64) -> Self {
        Self {
            value,
            status: OsError::Ok as u64,
        }
    }

    /// A failed call; `value` is whatever the kernel left in x0.
    pub const fn err(value: u64, error: OsError) -> Self {
        Self {
            value,
            status: error as u64,
        }
    }

    /// Decode the status register. On success the value is x0, untouched.
    pub fn into_result(self) -> OsResult<u64> {
        match OsError::from(self.status) {
            OsError::Ok => Ok(self.value),
            e => Err(e),
        }
    }

    /// Build a result from a Linux-style return value (`-errno` on failure).
    #[cfg(feature = "linux-abi")]
    pub fn from_errno(ret: i64) -> Self {
        if ret >= 0 {
            return Self::ok(ret as u64);
        }
        let error = match -ret {
            2 => OsError::NoEntry,          // ENOENT
            5 => OsError::IoError,          // EIO
            9 => OsError::InvalidArgument,  // EBADF
            12 => OsError::NoMemory,        // ENOMEM
            13 => OsError::NoAccess,        // EACCES
            14 => OsError::BadAddress,      // EFAULT
            17 => OsError::FileExists,      // EEXIST
            22 => OsError::InvalidArgument, // EINVAL
            _ => OsError::Unknown,
        };
        Self::err(ret as u64, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_codes() {
        assert_eq!(OsError::from(1), OsError::Ok);
        assert_eq!(OsError::from(50), OsError::BadAddress);
        assert_eq!(OsError::from(105), OsError::IoErrorTimedOut);
        assert_eq!(OsError::from(201), OsError::IllegalSocketOperation);
    }

    #[test]
    fn test_decode_unknown_codes() {
        assert_eq!(OsError::from(0), OsError::Unknown);
        assert_eq!(OsError::from(2), OsError::Unknown);
        assert_eq!(OsError::from(u64::MAX), OsError::Unknown);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(RawResult::ok(11).into_result(), Ok(11));
        assert_eq!(
            RawResult::err(0, OsError::NoMemory).into_result(),
            Err(OsError::NoMemory)
        );
        // A zero status is not success
        let raw = RawResult { value: 11, status: 0 };
        assert_eq!(raw.into_result(), Err(OsError::Unknown));
    }

    #[cfg(feature = "linux-abi")]
    #[test]
    fn test_from_errno() {
        assert_eq!(RawResult::from_errno(11).into_result(), Ok(11));
        assert_eq!(
            RawResult::from_errno(-9).into_result(),
            Err(OsError::InvalidArgument)
        );
        assert_eq!(RawResult::from_errno(-14).into_result(), Err(OsError::BadAddress));
        assert_eq!(RawResult::from_errno(-95).into_result(), Err(OsError::Unknown));
    }
}
