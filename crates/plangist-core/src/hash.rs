//! Rolling 64-bit FNV hash used to fingerprint plan gists.
//!
//! The accumulator is fed byte by byte as the gist is written, so the final
//! value never requires a second pass over the buffer. Not cryptographic.

const OFFSET64: u64 = 14_695_981_039_346_656_037;
const PRIME64: u64 = 1_099_511_628_211;

/// Incremental FNV-64 state.
///
/// Each `add` multiplies by the FNV prime and then folds the value in, so
/// the same byte stream always yields the same sum regardless of how it was
/// chunked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fnv64 {
    hash: u64,
}

impl Fnv64 {
    pub const fn new() -> Self {
        Self { hash: OFFSET64 }
    }

    /// Accumulate one value into the state.
    pub fn add(&mut self, c: u64) {
        self.hash = self.hash.wrapping_mul(PRIME64) ^ c;
    }

    /// Accumulate every byte of `data`, one `add` per byte.
    pub fn add_bytes(&mut self, data: &[u8]) {
        for &b in data {
            self.add(u64::from(b));
        }
    }

    pub const fn sum(&self) -> u64 {
        self.hash
    }
}

impl Default for Fnv64 {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot helper over a full byte slice.
pub fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut h = Fnv64::new();
    h.add_bytes(bytes);
    h.sum()
}
