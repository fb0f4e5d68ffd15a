//! Per-contribution secrets and their proofs of knowledge.

use crate::errors::{CeremonyError, Result};
use crate::hash_to_g2::hash_to_g2;
use crate::params::HASH_SIZE;
use crate::rng::KEY_SIZE;
use blake2::{Blake2b512, Digest};
use libs::field_structures::{scalar_from_bytes, ScalarField, SCALAR_SIZE};
use libs::group_structures::{G1serde, G2serde, G1_UNCOMPRESSED_SIZE, G2_UNCOMPRESSED_SIZE};
use rand::{CryptoRng, RngCore};
use std::io::{Read, Write};

pub const TAU_PERSONALIZATION: u8 = 0;
pub const ALPHA_PERSONALIZATION: u8 = 1;
pub const BETA_PERSONALIZATION: u8 = 2;

/// The three secret exponents of one contribution. Lives only for the
/// duration of a compute pass and is never written anywhere.
#[derive(Clone)]
pub struct PrivateKey {
    pub tau: ScalarField,
    pub alpha: ScalarField,
    pub beta: ScalarField,
}

impl PrivateKey {
    /// Builds a key from big-endian scalars; `None` unless each is below
    /// the group order.
    pub fn from_bytes(tau: &[u8], alpha: &[u8], beta: &[u8]) -> Option<Self> {
        Some(Self {
            tau: scalar_from_bytes(tau)?,
            alpha: scalar_from_bytes(alpha)?,
            beta: scalar_from_bytes(beta)?,
        })
    }
}

/// `(S, Sx, SxExt)`: `Sx = x*S` and `SxExt = x*H`, with `H` hashed from the
/// transcript and `(S, Sx)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnowledgeProof {
    pub s: G1serde,
    pub s_x: G1serde,
    pub s_x_g2: G2serde,
}

impl KnowledgeProof {
    pub const SIZE: usize = 2 * G1_UNCOMPRESSED_SIZE + G2_UNCOMPRESSED_SIZE;

    pub fn new(x: &ScalarField, s: &ScalarField, personalization: u8, digest: &[u8; HASH_SIZE]) -> Self {
        let s = G1serde::generator() * *s;
        let s_x = s * *x;
        let s_x_g2 = Self::g2_base(personalization, digest, &s, &s_x) * *x;
        Self { s, s_x, s_x_g2 }
    }

    /// The G2 point `x` is applied to, bound to the role and the transcript.
    pub fn g2_base(
        personalization: u8,
        digest: &[u8; HASH_SIZE],
        s: &G1serde,
        s_x: &G1serde,
    ) -> G2serde {
        let mut hasher = Blake2b512::new();
        hasher.update([personalization]);
        hasher.update(digest);
        hasher.update(s.encode_uncompressed());
        hasher.update(s_x.encode_uncompressed());
        let hash = hasher.finalize();

        let mut seed = [0u8; KEY_SIZE];
        seed.copy_from_slice(&hash[..KEY_SIZE]);
        hash_to_g2(&seed)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.s.encode_uncompressed())?;
        writer.write_all(&self.s_x.encode_uncompressed())?;
        writer.write_all(&self.s_x_g2.encode_uncompressed())
    }

    fn read_from<R: Read>(reader: &mut R, first_index: usize) -> Result<Self> {
        let mut g1 = [0u8; G1_UNCOMPRESSED_SIZE];
        let mut g2 = [0u8; G2_UNCOMPRESSED_SIZE];

        reader.read_exact(&mut g1)?;
        let s = G1serde::decode_uncompressed(&g1)
            .map_err(CeremonyError::point("public key", first_index))?;
        reader.read_exact(&mut g1)?;
        let s_x = G1serde::decode_uncompressed(&g1)
            .map_err(CeremonyError::point("public key", first_index + 1))?;
        reader.read_exact(&mut g2)?;
        let s_x_g2 = G2serde::decode_uncompressed(&g2)
            .map_err(CeremonyError::point("public key", first_index + 2))?;

        Ok(Self { s, s_x, s_x_g2 })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub tau: KnowledgeProof,
    pub alpha: KnowledgeProof,
    pub beta: KnowledgeProof,
}

impl PublicKey {
    /// Role order tau, alpha, beta; each triple as S, Sx, SxExt.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.tau.write_to(writer)?;
        self.alpha.write_to(writer)?;
        self.beta.write_to(writer)
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            tau: KnowledgeProof::read_from(reader, 0)?,
            alpha: KnowledgeProof::read_from(reader, 3)?,
            beta: KnowledgeProof::read_from(reader, 6)?,
        })
    }
}

/// Uniform scalar below the group order, redrawing whole 32-byte samples.
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> ScalarField {
    loop {
        let mut bytes = [0u8; SCALAR_SIZE];
        rng.fill_bytes(&mut bytes);
        if let Some(scalar) = scalar_from_bytes(&bytes) {
            return scalar;
        }
    }
}

/// Draws fresh secrets and proves knowledge of each, bound to `digest`.
pub fn keypair<R: RngCore + CryptoRng>(rng: &mut R, digest: &[u8; HASH_SIZE]) -> (PublicKey, PrivateKey) {
    let tau = random_scalar(rng);
    let alpha = random_scalar(rng);
    let beta = random_scalar(rng);

    let mut prove = |x: &ScalarField, personalization: u8| {
        let s = random_scalar(rng);
        KnowledgeProof::new(x, &s, personalization, digest)
    };
    let public_key = PublicKey {
        tau: prove(&tau, TAU_PERSONALIZATION),
        alpha: prove(&alpha, ALPHA_PERSONALIZATION),
        beta: prove(&beta, BETA_PERSONALIZATION),
    };

    (public_key, PrivateKey { tau, alpha, beta })
}
