//! Incremental MD5 message digest (RFC 1321).
//!
//! MD5 is cryptographically broken and must not be used where collision
//! resistance matters; it survives here because legacy protocol handshakes
//! and digest-authentication schemes still require it for interoperability.
//!
//! The context is fed with [`Md5::update`] in chunks of any size and
//! produces its 16-byte digest with [`Md5::finalize`], which also wipes the
//! context so no message material is left behind in memory.

/// The size of the MD5 digest in bytes (128 bits).
pub const MD5_OUTPUT_SIZE: usize = 16;

/// The size of the internal message block in bytes (512 bits).
pub const MD5_BLOCK_SIZE: usize = 64;

/// Initial state words A, B, C, D from the MD5 specification.
const INIT_STATE: [u32; 4] = [0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476];

/// Sine-derived additive constants: K[i] = floor(2^32 * abs(sin(i + 1))).
const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee,
    0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be,
    0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa,
    0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed,
    0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c,
    0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05,
    0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039,
    0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1,
    0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Per-step left-rotation amounts, grouped by round.
const S: [u32; 64] = [
    // Round 1
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22,
    // Round 2
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20,
    // Round 3
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23,
    // Round 4
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// First padding byte is the mandatory 1-bit; the rest are zeros.
static PADDING: [u8; MD5_BLOCK_SIZE] = {
    let mut pad = [0u8; MD5_BLOCK_SIZE];
    pad[0] = 0x80;
    pad
};

/// Streaming MD5 context.
///
/// # Examples
/// ```
/// use netcommon::digest::md5::Md5;
///
/// let mut ctx = Md5::new();
/// ctx.update(b"hello ");
/// ctx.update(b"world");
/// let digest = ctx.finalize();
/// assert_eq!(hex::encode(digest), "5eb63bbbe01eeed093cb22bb8f5acdc3");
/// ```
#[derive(Debug, Clone)]
pub struct Md5 {
    /// Running hash accumulator A, B, C, D.
    state: [u32; 4],
    /// Message length in bits, low word then high word.
    count: [u32; 2],
    /// Current partially filled block; fill level is `count[0] / 8 mod 64`.
    buffer: [u8; MD5_BLOCK_SIZE],
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl Md5 {
    /// Creates a context loaded with the magic initialization constants.
    pub fn new() -> Self {
        Self {
            state: INIT_STATE,
            count: [0; 2],
            buffer: [0; MD5_BLOCK_SIZE],
        }
    }

    /// Feeds another chunk of message data into the context.
    ///
    /// Chunk boundaries do not affect the digest: any partitioning of the
    /// message across `update` calls yields the same result.
    pub fn update(&mut self, input: &[u8]) {
        // Fill level before this chunk, in bytes mod 64.
        let index = ((self.count[0] >> 3) & 0x3F) as usize;

        // Bit counter, carrying low-word overflow into the high word.
        let bits = (input.len() as u64).wrapping_shl(3);
        let low = bits as u32;
        self.count[0] = self.count[0].wrapping_add(low);
        if self.count[0] < low {
            self.count[1] = self.count[1].wrapping_add(1);
        }
        self.count[1] = self.count[1].wrapping_add((bits >> 32) as u32);

        let partial = MD5_BLOCK_SIZE - index;
        if input.len() < partial {
            self.buffer[index..index + input.len()].copy_from_slice(input);
            return;
        }

        // Complete the buffered block, then transform whole blocks straight
        // from the input.
        self.buffer[index..].copy_from_slice(&input[..partial]);
        let block = self.buffer;
        transform(&mut self.state, &block);

        let mut blocks = input[partial..].chunks_exact(MD5_BLOCK_SIZE);
        for block in blocks.by_ref() {
            transform(&mut self.state, block.try_into().unwrap());
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
    }

    /// Pads the message, produces the 16-byte digest and zeroizes the
    /// entire context.
    ///
    /// The context holds no message or state material afterwards; it must
    /// be re-created before hashing another message.
    pub fn finalize(&mut self) -> [u8; MD5_OUTPUT_SIZE] {
        // Original length in bits, two little-endian words.
        let mut length = [0u8; 8];
        length[..4].copy_from_slice(&self.count[0].to_le_bytes());
        length[4..].copy_from_slice(&self.count[1].to_le_bytes());

        // Pad out to 56 mod 64, then append the length.
        let index = ((self.count[0] >> 3) & 0x3F) as usize;
        let pad_len = if index < 56 { 56 - index } else { 120 - index };
        self.update(&PADDING[..pad_len]);
        self.update(&length);

        let mut digest = [0u8; MD5_OUTPUT_SIZE];
        for (chunk, word) in digest.chunks_exact_mut(4).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }

        // Zeroize potentially sensitive message material.
        self.state = [0; 4];
        self.count = [0; 2];
        self.buffer = [0; MD5_BLOCK_SIZE];

        digest
    }
}

/// Compresses one 64-byte block into the running state.
///
/// Four rounds of sixteen operations; block words are decoded as
/// little-endian 32-bit integers.
fn transform(state: &mut [u32; 4], block: &[u8; MD5_BLOCK_SIZE]) {
    let mut x = [0u32; 16];
    for (word, bytes) in x.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes(bytes.try_into().unwrap());
    }

    let [mut a, mut b, mut c, mut d] = *state;

    for i in 0..64 {
        let (f, g) = match i {
            0..=15 => ((b & c) | (!b & d), i),
            16..=31 => ((b & d) | (c & !d), (5 * i + 1) % 16),
            32..=47 => (b ^ c ^ d, (3 * i + 5) % 16),
            _ => (c ^ (b | !d), (7 * i) % 16),
        };

        let temp = a
            .wrapping_add(f)
            .wrapping_add(x[g])
            .wrapping_add(K[i])
            .rotate_left(S[i])
            .wrapping_add(b);

        a = d;
        d = c;
        c = b;
        b = temp;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}

/// Computes the MD5 digest of `data` in a single call.
pub fn md5_digest(data: &[u8]) -> [u8; MD5_OUTPUT_SIZE] {
    let mut ctx = Md5::new();
    ctx.update(data);
    ctx.finalize()
}

/// Computes the MD5 digest of `data` and renders it as lowercase hex,
/// the form digest-authentication headers expect.
pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(md5_digest(data))
}
