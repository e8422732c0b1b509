//! Zero-terminated byte sequences
//!
//! A byte sequence is an address plus an implicit zero terminator; no length
//! is stored with it.
//!
//! # Security Considerations
//! - `strlen` has no bounds. It keeps reading until it finds a zero byte,
//!   so a sequence without one walks off the end of readable memory
//! - Callers holding a slice should check it with `is_terminated` first,
//!   or use the bounded `terminated_len`

/// Count the bytes preceding the first zero byte at `ptr`.
///
/// # Safety
/// `ptr` must point to readable memory that contains a zero byte at or after
/// `ptr`, with every byte up to and including it readable.
pub unsafe fn strlen(ptr: *const u8) -> usize {
    let mut len = 0;
    // SAFETY: Caller guarantees a reachable terminator, so every offset
    // before it is in bounds
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    len
}

/// Index of the first zero byte in `bytes`, or `bytes.len()` if there is none.
pub fn terminated_len(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
}

/// Whether `bytes` contains a terminator, i.e. is safe to pass to `strlen`.
pub fn is_terminated(bytes: &[u8]) -> bool {
    bytes.contains(&0)
}
