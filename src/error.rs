//! Error types shared across the crate.
//!
//! Each fallible component defines its own error enum so callers can match
//! on exactly the failures that component can produce. The MD5 engine has
//! no failure modes and returns no errors.

use thiserror::Error;

/// Errors reported by the SHA-1 engine.
///
/// Once a context reports [`Sha1Error::InputTooLong`] or
/// [`Sha1Error::StateError`] it is corrupted: every further operation fails
/// until the context is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Sha1Error {
    /// More input was fed after the digest had already been produced.
    #[error("digest already produced; reset the context before feeding more input")]
    StateError,

    /// The 64-bit message bit counter overflowed (message of 2^64 bits or more).
    #[error("message too long: 64-bit length counter overflowed")]
    InputTooLong,

    /// The context was corrupted by an earlier failure and cannot produce a digest.
    #[error("context corrupted; reset before reuse")]
    Corrupted,
}

/// Errors reported by the Base64 encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Base64Error {
    /// The input buffer is empty.
    #[error("input buffer is empty")]
    EmptyInput,

    /// The caller's output buffer cannot hold the result. Nothing was written.
    #[error("output buffer too small: {needed} bytes needed, {available} available")]
    BufferTooSmall {
        /// Exact capacity the operation requires.
        needed: usize,
        /// Capacity the caller supplied.
        available: usize,
    },

    /// Encoded input length is not a non-zero multiple of four characters.
    #[error("encoded input length must be a non-zero multiple of 4")]
    InvalidLength,

    /// A character outside the Base64 alphabet, or misplaced padding.
    #[error("input contains a character outside the Base64 alphabet")]
    InvalidSymbol,
}
