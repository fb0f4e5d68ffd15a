//! Keyed ChaCha20 word stream used by hash-to-curve.
//!
//! The stream is the raw ChaCha20 keystream (zero nonce, block counter
//! starting at zero) read as little-endian 32-bit words, so any two
//! implementations seeded with the same key agree word for word.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

pub const KEY_SIZE: usize = 32;

pub struct ChaChaStream {
    rng: ChaCha20Rng,
}

impl ChaChaStream {
    /// Seeds the cipher with `key` taken as eight little-endian words.
    pub fn new(key: [u8; KEY_SIZE]) -> Self {
        Self {
            rng: ChaCha20Rng::from_seed(key),
        }
    }

    /// Seeds the cipher with a digest read as eight big-endian words.
    pub fn from_digest(digest: &[u8; KEY_SIZE]) -> Self {
        let mut key = [0u8; KEY_SIZE];
        for (word, chunk) in key.chunks_exact_mut(4).zip(digest.chunks_exact(4)) {
            word.copy_from_slice(chunk);
            word.reverse();
        }
        Self::new(key)
    }

    pub fn next_word(&mut self) -> u32 {
        self.rng.next_u32()
    }
}

impl Iterator for ChaChaStream {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        Some(self.next_word())
    }
}
