//! Message digest implementations.
//!
//! This module provides the incremental digest engines used by the
//! higher-level handshake and authentication code of a network stack:
//! - MD5 (RFC 1321), 128-bit output
//! - SHA-1 (FIPS 180-1), 160-bit output
//!
//! Both engines accept input in arbitrarily sized chunks across any number
//! of calls and produce the same digest as a single-shot computation over
//! the concatenated message.

pub mod md5;
pub mod sha1;

// Re-export MD5 functionality
pub use md5::{md5_digest, md5_hex, Md5, MD5_BLOCK_SIZE, MD5_OUTPUT_SIZE};

// Re-export SHA-1 functionality
pub use sha1::{sha1_digest, sha1_hex, Sha1, SHA1_BLOCK_SIZE, SHA1_OUTPUT_SIZE};
