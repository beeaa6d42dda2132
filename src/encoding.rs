//! Binary-to-text encoding implementations.

pub mod base64;

// Re-export Base64 functionality
pub use base64::{decode, decoded_len, encode, encoded_len, BASE64_PAD};
