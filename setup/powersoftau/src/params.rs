use crate::errors::{CeremonyError, Result};
use ark_serialize::Compress;
use libs::group_structures::{
    G1serde, G2serde, PointSerde, G1_UNCOMPRESSED_SIZE, G2_UNCOMPRESSED_SIZE,
};
use serde::{Deserialize, Serialize};

/// Width of every transcript digest (BLAKE2b-512).
pub const HASH_SIZE: usize = 64;

/// `N = 2^DEFAULT_POWER` unless told otherwise.
pub const DEFAULT_POWER: u32 = 10;

/// Largest supported `N = 2^MAX_POWER`; keeps every file size well inside `usize`.
pub const MAX_POWER: u32 = 28;

/// Indices handed to a worker at a time by the compute engine.
pub const CHUNK_SIZE: usize = 1 << 10;

/// Three `(S, Sx, SxExt)` triples, all uncompressed.
pub const PUBLIC_KEY_SIZE: usize = 3 * (2 * G1_UNCOMPRESSED_SIZE + G2_UNCOMPRESSED_SIZE);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CeremonyParams {
    /// Number of powers `N` in the G2 and alpha/beta ladders.
    pub tau_powers: usize,
}

impl CeremonyParams {
    pub(crate) fn new(tau_powers: usize) -> Self {
        debug_assert!(tau_powers > 0 && tau_powers <= 1 << MAX_POWER);
        Self { tau_powers }
    }

    /// `N = 2^power`, rejecting powers above [`MAX_POWER`].
    pub fn from_power(power: u32) -> Result<Self> {
        if power > MAX_POWER {
            return Err(CeremonyError::InvalidPower {
                power,
                max: MAX_POWER,
            });
        }
        Ok(Self::new(1usize << power))
    }

    /// Length of the G1 tau ladder, `2N - 1`.
    pub fn tau_powers_g1(&self) -> usize {
        2 * self.tau_powers - 1
    }

    pub fn accumulator_size(&self, compress: Compress) -> usize {
        let g1 = G1serde::encoded_size(compress);
        let g2 = G2serde::encoded_size(compress);
        (self.tau_powers_g1() + 2 * self.tau_powers) * g1 + (self.tau_powers + 1) * g2
    }

    pub fn challenge_size(&self) -> usize {
        HASH_SIZE + self.accumulator_size(Compress::No)
    }

    pub fn response_size(&self) -> usize {
        HASH_SIZE + self.accumulator_size(Compress::Yes) + PUBLIC_KEY_SIZE
    }
}

impl Default for CeremonyParams {
    fn default() -> Self {
        Self::new(1 << DEFAULT_POWER)
    }
}
