//! Incremental SHA-1 message digest (FIPS 180-1).
//!
//! Unlike the MD5 engine, the SHA-1 context is a small state machine:
//! feeding input after the digest has been produced, or overflowing the
//! 64-bit message length counter, leaves the context corrupted and every
//! later operation fails until [`Sha1::reset`] is called.
//!
//! ```
//! use netcommon::digest::sha1::Sha1;
//!
//! let mut ctx = Sha1::new();
//! ctx.input(b"abc")?;
//! let digest = ctx.result()?;
//! assert_eq!(hex::encode(digest), "a9993e364706816aba3e25717850c26c9cd0d89d");
//! # Ok::<(), netcommon::error::Sha1Error>(())
//! ```

use log::warn;

use crate::error::Sha1Error;

/// The size of the SHA-1 digest in bytes (160 bits).
pub const SHA1_OUTPUT_SIZE: usize = 20;

/// The size of the internal message block in bytes (512 bits).
pub const SHA1_BLOCK_SIZE: usize = 64;

/// Initial hash words H0..H4 from FIPS 180-1.
const INIT_HASH: [u32; 5] = [
    0x6745_2301,
    0xEFCD_AB89,
    0x98BA_DCFE,
    0x1032_5476,
    0xC3D2_E1F0,
];

/// Stage constants, one per 20-round stage.
const K: [u32; 4] = [0x5A82_7999, 0x6ED9_EBA1, 0x8F1B_BCDC, 0xCA62_C1D6];

/// Lifecycle of a [`Sha1`] context. Corruption is sticky: the stored reason
/// is what [`Sha1::input`] reports on every later call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Finalized,
    Corrupted(Sha1Error),
}

/// Streaming SHA-1 context.
#[derive(Debug, Clone)]
pub struct Sha1 {
    /// Running hash accumulator H0..H4.
    hash: [u32; 5],
    /// Message length in bits, kept as two 32-bit halves.
    length_low: u32,
    length_high: u32,
    /// Current partially filled block and its fill level.
    block: [u8; SHA1_BLOCK_SIZE],
    block_index: usize,
    state: State,
}

impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha1 {
    /// Creates a context ready to accept the first chunk of a message.
    pub fn new() -> Self {
        Self {
            hash: INIT_HASH,
            length_low: 0,
            length_high: 0,
            block: [0; SHA1_BLOCK_SIZE],
            block_index: 0,
            state: State::Fresh,
        }
    }

    /// Returns the context to its initial state, clearing any corruption.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feeds the next portion of the message.
    ///
    /// An empty slice is accepted unconditionally and does nothing. Calling
    /// `input` after [`Sha1::result`] fails with [`Sha1Error::StateError`]
    /// and corrupts the context. If the 64-bit bit counter overflows, the
    /// bytes accepted so far are kept, the context is marked corrupted with
    /// [`Sha1Error::InputTooLong`], and the *next* call reports the error.
    pub fn input(&mut self, msg: &[u8]) -> Result<(), Sha1Error> {
        if msg.is_empty() {
            return Ok(());
        }

        match self.state {
            State::Finalized => {
                self.state = State::Corrupted(Sha1Error::StateError);
                return Err(Sha1Error::StateError);
            }
            State::Corrupted(reason) => return Err(reason),
            State::Fresh => {}
        }

        for &byte in msg {
            self.block[self.block_index] = byte;
            self.block_index += 1;

            self.length_low = self.length_low.wrapping_add(8);
            if self.length_low == 0 {
                self.length_high = self.length_high.wrapping_add(1);
                if self.length_high == 0 {
                    warn!("sha1: message exceeds 2^64 bits, context corrupted");
                    self.state = State::Corrupted(Sha1Error::InputTooLong);
                }
            }

            if self.block_index == SHA1_BLOCK_SIZE {
                self.process_block();
            }

            if matches!(self.state, State::Corrupted(_)) {
                break;
            }
        }

        Ok(())
    }

    /// Produces the 20-byte message digest.
    ///
    /// The first call pads the message, processes the final block and wipes
    /// the block buffer and length counters. Further calls return the same
    /// digest. Fails with [`Sha1Error::Corrupted`] once the context is
    /// corrupted.
    pub fn result(&mut self) -> Result<[u8; SHA1_OUTPUT_SIZE], Sha1Error> {
        match self.state {
            State::Corrupted(_) => return Err(Sha1Error::Corrupted),
            State::Fresh => {
                self.pad_message();
                self.block = [0; SHA1_BLOCK_SIZE];
                self.length_low = 0;
                self.length_high = 0;
                self.state = State::Finalized;
            }
            State::Finalized => {}
        }

        let mut digest = [0u8; SHA1_OUTPUT_SIZE];
        for (chunk, word) in digest.chunks_exact_mut(4).zip(self.hash.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        Ok(digest)
    }

    /// Processes the 512-bit block currently held in `self.block`.
    fn process_block(&mut self) {
        // Expand the 16 big-endian block words into the 80-word schedule.
        let mut w = [0u32; 80];
        for (word, bytes) in w.iter_mut().zip(self.block.chunks_exact(4)) {
            *word = u32::from_be_bytes(bytes.try_into().unwrap());
        }
        for t in 16..80 {
            w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.hash;

        for t in 0..80 {
            let (f, k) = match t {
                0..=19 => ((b & c) | (!b & d), K[0]),
                20..=39 => (b ^ c ^ d, K[1]),
                40..=59 => ((b & c) | (b & d) | (c & d), K[2]),
                _ => (b ^ c ^ d, K[3]),
            };

            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(w[t])
                .wrapping_add(k);

            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        for (h, word) in self.hash.iter_mut().zip([a, b, c, d, e]) {
            *h = h.wrapping_add(word);
        }

        self.block_index = 0;
    }

    /// Pads the message per FIPS 180-1 and processes the final block(s).
    ///
    /// The length field needs bytes 56..64; when the 0x80 marker leaves no
    /// room for it, padding spills into a second block.
    fn pad_message(&mut self) {
        self.block[self.block_index] = 0x80;
        self.block_index += 1;

        if self.block_index > 56 {
            self.block[self.block_index..].fill(0);
            self.process_block();
        }
        self.block[self.block_index..56].fill(0);

        self.block[56..60].copy_from_slice(&self.length_high.to_be_bytes());
        self.block[60..64].copy_from_slice(&self.length_low.to_be_bytes());
        self.process_block();
    }
}

/// Computes the SHA-1 digest of `data` in a single call.
pub fn sha1_digest(data: &[u8]) -> Result<[u8; SHA1_OUTPUT_SIZE], Sha1Error> {
    let mut ctx = Sha1::new();
    ctx.input(data)?;
    ctx.result()
}

/// Computes the SHA-1 digest of `data` and renders it as lowercase hex.
pub fn sha1_hex(data: &[u8]) -> Result<String, Sha1Error> {
    Ok(hex::encode(sha1_digest(data)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    // Test vectors from FIPS 180-1, appendix A and B.

    #[test]
    fn fips180_vectors() {
        let vectors: &[(&[u8], &str)] = &[
            (b"", "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
            (b"abc", "a9993e364706816aba3e25717850c26c9cd0d89d"),
            (
                b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
                "84983e441c3bd26ebaae4aa1f95129e5e54670f1",
            ),
        ];
        for (message, expected) in vectors {
            assert_eq!(hex::encode(sha1_digest(message).unwrap()), *expected);
        }
    }

    #[test]
    fn million_a() {
        let mut ctx = Sha1::new();
        for _ in 0..10_000 {
            ctx.input(&[b'a'; 100]).unwrap();
        }
        assert_eq!(
            hex::encode(ctx.result().unwrap()),
            "34aa973cd4c4daa4f61eeb2bdbad27316534016f"
        );
    }

    #[test]
    fn streaming_matches_one_shot() {
        let mut rng = StdRng::seed_from_u64(0x1801);
        let message: Vec<u8> = (0..4096).map(|_| rng.gen()).collect();
        let expected = sha1_digest(&message).unwrap();

        for _ in 0..16 {
            let mut ctx = Sha1::new();
            let mut rest = &message[..];
            while !rest.is_empty() {
                let take = rng.gen_range(1..=rest.len().min(200));
                ctx.input(&rest[..take]).unwrap();
                rest = &rest[take..];
            }
            assert_eq!(ctx.result().unwrap(), expected);
        }
    }

    #[test]
    fn block_boundary_lengths() {
        // Padding spills into a second block once the index passes 55.
        for len in [54, 55, 56, 57, 63, 64, 65, 119, 120, 128] {
            let message = vec![0x5Au8; len];
            let expected = sha1_digest(&message).unwrap();

            let mut ctx = Sha1::new();
            for byte in &message {
                ctx.input(std::slice::from_ref(byte)).unwrap();
            }
            assert_eq!(ctx.result().unwrap(), expected, "length {len}");
        }
    }

    #[test]
    fn input_after_result_is_a_state_error() {
        let mut ctx = Sha1::new();
        ctx.input(b"abc").unwrap();
        let first = ctx.result().unwrap();

        assert_eq!(ctx.input(b"more"), Err(Sha1Error::StateError));
        // The violation is sticky and keeps its original reason.
        assert_eq!(ctx.input(b"more"), Err(Sha1Error::StateError));
        assert_eq!(ctx.result(), Err(Sha1Error::Corrupted));

        // Reset recovers the context completely.
        ctx.reset();
        ctx.input(b"abc").unwrap();
        assert_eq!(ctx.result().unwrap(), first);
    }

    #[test]
    fn empty_input_is_always_accepted() {
        let mut ctx = Sha1::new();
        ctx.input(b"abc").unwrap();
        ctx.result().unwrap();
        // Zero-length input short-circuits before any state check.
        assert_eq!(ctx.input(b""), Ok(()));
    }

    #[test]
    fn repeated_result_returns_same_digest() {
        let mut ctx = Sha1::new();
        ctx.input(b"abc").unwrap();
        let first = ctx.result().unwrap();
        let second = ctx.result().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn hex_helper() {
        assert_eq!(
            sha1_hex(b"abc").unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }
}
