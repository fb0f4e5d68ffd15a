//! Canonical wire encoding for BLS12-381 points.
//!
//! The most significant byte of every encoding carries three flags: bit 7
//! marks a compressed encoding, bit 6 the point at infinity and bit 5 that
//! the lexicographically larger square root was chosen for Y. The remaining
//! five bits are the top bits of X. Extension field elements `c0 + c1 * u`
//! go on the wire as `c1 || c0`.

use super::{G1serde, G2serde};
use crate::field_structures::{fq_from_be_bytes, fq_to_be_bytes, BaseField, FQ_ELEMENT_SIZE};
use ark_bls12_381::{Fq2, G1Affine, G2Affine};
use ark_ec::short_weierstrass::SWCurveConfig;
use ark_ff::Field;
use ark_serialize::Compress;
use thiserror::Error;

pub const FQ2_ELEMENT_SIZE: usize = 2 * FQ_ELEMENT_SIZE;
pub const G1_COMPRESSED_SIZE: usize = FQ_ELEMENT_SIZE;
pub const G1_UNCOMPRESSED_SIZE: usize = 2 * FQ_ELEMENT_SIZE;
pub const G2_COMPRESSED_SIZE: usize = FQ2_ELEMENT_SIZE;
pub const G2_UNCOMPRESSED_SIZE: usize = 2 * FQ2_ELEMENT_SIZE;

pub const SERIALIZATION_MASK: u8 = (1 << 5) - 1;
pub const SERIALIZATION_COMPRESSED: u8 = 1 << 7;
pub const SERIALIZATION_INFINITY: u8 = 1 << 6;
pub const SERIALIZATION_BIG_Y: u8 = 1 << 5;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointError {
    #[error("wrong encoded point size: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("point is compressed")]
    UnexpectedlyCompressed,
    #[error("point isn't compressed")]
    NotCompressed,
    #[error("invalid infinity encoding")]
    InvalidInfinity,
    #[error("high Y bit improperly set")]
    HighYBitSet,
    #[error("coordinate is not a canonical field element")]
    InvalidFieldElement,
    #[error("point is not on the curve")]
    NotOnCurve,
    #[error("no curve point has the encoded X coordinate")]
    NoSquareRoot,
}

/// Swaps the two limbs of every extension field element in `buf`, turning
/// the in-memory `c0 || c1` order into the wire order `c1 || c0` and back.
pub fn swap_limbs(buf: &mut [u8]) {
    assert_eq!(buf.len() % FQ2_ELEMENT_SIZE, 0, "wrong Fq2 element size");
    for block in buf.chunks_exact_mut(FQ2_ELEMENT_SIZE) {
        let (c0, c1) = block.split_at_mut(FQ_ELEMENT_SIZE);
        c0.swap_with_slice(c1);
    }
}

fn check_length(bytes: &[u8], expected: usize) -> Result<(), PointError> {
    if bytes.len() != expected {
        return Err(PointError::WrongLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

// `buf` has its flag bits already masked away.
fn check_infinity(buf: &[u8]) -> Result<(), PointError> {
    if buf.iter().any(|&byte| byte != 0) {
        return Err(PointError::InvalidInfinity);
    }
    Ok(())
}

fn read_fq(bytes: &[u8]) -> Result<BaseField, PointError> {
    let mut element = [0u8; FQ_ELEMENT_SIZE];
    element.copy_from_slice(bytes);
    fq_from_be_bytes(&element).ok_or(PointError::InvalidFieldElement)
}

// Reads an extension element stored in memory order `c0 || c1`.
fn read_fq2(bytes: &[u8]) -> Result<Fq2, PointError> {
    let (c0, c1) = bytes.split_at(FQ_ELEMENT_SIZE);
    Ok(Fq2::new(read_fq(c0)?, read_fq(c1)?))
}

fn write_fq2(out: &mut [u8], element: &Fq2) {
    out[..FQ_ELEMENT_SIZE].copy_from_slice(&fq_to_be_bytes(&element.c0));
    out[FQ_ELEMENT_SIZE..].copy_from_slice(&fq_to_be_bytes(&element.c1));
}

/// Solves `y^2 = x^3 + a*x + b`, returning either root.
fn recover_y<P: SWCurveConfig>(x: &P::BaseField) -> Option<P::BaseField> {
    let rhs = x.square() * x + P::COEFF_A * x + P::COEFF_B;
    rhs.sqrt()
}

impl G1serde {
    pub fn encode_uncompressed(&self) -> [u8; G1_UNCOMPRESSED_SIZE] {
        let mut out = [0u8; G1_UNCOMPRESSED_SIZE];
        if self.is_zero() {
            out[0] |= SERIALIZATION_INFINITY;
            return out;
        }
        out[..FQ_ELEMENT_SIZE].copy_from_slice(&fq_to_be_bytes(&self.0.x));
        out[FQ_ELEMENT_SIZE..].copy_from_slice(&fq_to_be_bytes(&self.0.y));
        out
    }

    pub fn encode_compressed(&self) -> [u8; G1_COMPRESSED_SIZE] {
        let mut out = [0u8; G1_COMPRESSED_SIZE];
        if self.is_zero() {
            out[0] |= SERIALIZATION_INFINITY | SERIALIZATION_COMPRESSED;
            return out;
        }
        out.copy_from_slice(&fq_to_be_bytes(&self.0.x));
        if self.y_is_higher() {
            out[0] |= SERIALIZATION_BIG_Y;
        }
        out[0] |= SERIALIZATION_COMPRESSED;
        out
    }

    pub fn decode_uncompressed(bytes: &[u8]) -> Result<Self, PointError> {
        check_length(bytes, G1_UNCOMPRESSED_SIZE)?;
        let flags = bytes[0];
        if flags & SERIALIZATION_COMPRESSED != 0 {
            return Err(PointError::UnexpectedlyCompressed);
        }
        if flags & SERIALIZATION_BIG_Y != 0 {
            return Err(PointError::HighYBitSet);
        }

        let mut buf = [0u8; G1_UNCOMPRESSED_SIZE];
        buf.copy_from_slice(bytes);
        buf[0] &= SERIALIZATION_MASK;

        if flags & SERIALIZATION_INFINITY != 0 {
            check_infinity(&buf)?;
            return Ok(Self::zero());
        }

        let x = read_fq(&buf[..FQ_ELEMENT_SIZE])?;
        let y = read_fq(&buf[FQ_ELEMENT_SIZE..])?;
        let point = G1Affine::new_unchecked(x, y);
        if !point.is_on_curve() {
            return Err(PointError::NotOnCurve);
        }
        Ok(Self(point))
    }

    pub fn decode_compressed(bytes: &[u8]) -> Result<Self, PointError> {
        check_length(bytes, G1_COMPRESSED_SIZE)?;
        let flags = bytes[0];
        if flags & SERIALIZATION_COMPRESSED == 0 {
            return Err(PointError::NotCompressed);
        }

        let mut buf = [0u8; G1_COMPRESSED_SIZE];
        buf.copy_from_slice(bytes);
        buf[0] &= SERIALIZATION_MASK;

        if flags & SERIALIZATION_INFINITY != 0 {
            if flags & SERIALIZATION_BIG_Y != 0 {
                return Err(PointError::HighYBitSet);
            }
            check_infinity(&buf)?;
            return Ok(Self::zero());
        }

        let x = read_fq(&buf)?;
        let y = recover_y::<ark_bls12_381::g1::Config>(&x).ok_or(PointError::NoSquareRoot)?;
        let point = Self(G1Affine::new_unchecked(x, y));
        if point.y_is_higher() != (flags & SERIALIZATION_BIG_Y != 0) {
            return Ok(-point);
        }
        Ok(point)
    }
}

impl G2serde {
    pub fn encode_uncompressed(&self) -> [u8; G2_UNCOMPRESSED_SIZE] {
        let mut out = [0u8; G2_UNCOMPRESSED_SIZE];
        if self.is_zero() {
            out[0] |= SERIALIZATION_INFINITY;
            return out;
        }
        write_fq2(&mut out[..FQ2_ELEMENT_SIZE], &self.0.x);
        write_fq2(&mut out[FQ2_ELEMENT_SIZE..], &self.0.y);
        swap_limbs(&mut out);
        out
    }

    pub fn encode_compressed(&self) -> [u8; G2_COMPRESSED_SIZE] {
        let mut out = [0u8; G2_COMPRESSED_SIZE];
        if self.is_zero() {
            out[0] |= SERIALIZATION_INFINITY | SERIALIZATION_COMPRESSED;
            return out;
        }
        write_fq2(&mut out, &self.0.x);
        swap_limbs(&mut out);
        if self.y_is_higher() {
            out[0] |= SERIALIZATION_BIG_Y;
        }
        out[0] |= SERIALIZATION_COMPRESSED;
        out
    }

    pub fn decode_uncompressed(bytes: &[u8]) -> Result<Self, PointError> {
        check_length(bytes, G2_UNCOMPRESSED_SIZE)?;
        let flags = bytes[0];
        if flags & SERIALIZATION_COMPRESSED != 0 {
            return Err(PointError::UnexpectedlyCompressed);
        }
        if flags & SERIALIZATION_BIG_Y != 0 {
            return Err(PointError::HighYBitSet);
        }

        let mut buf = [0u8; G2_UNCOMPRESSED_SIZE];
        buf.copy_from_slice(bytes);
        buf[0] &= SERIALIZATION_MASK;

        if flags & SERIALIZATION_INFINITY != 0 {
            check_infinity(&buf)?;
            return Ok(Self::zero());
        }

        swap_limbs(&mut buf);
        let x = read_fq2(&buf[..FQ2_ELEMENT_SIZE])?;
        let y = read_fq2(&buf[FQ2_ELEMENT_SIZE..])?;
        let point = G2Affine::new_unchecked(x, y);
        if !point.is_on_curve() {
            return Err(PointError::NotOnCurve);
        }
        Ok(Self(point))
    }

    pub fn decode_compressed(bytes: &[u8]) -> Result<Self, PointError> {
        check_length(bytes, G2_COMPRESSED_SIZE)?;
        let flags = bytes[0];
        if flags & SERIALIZATION_COMPRESSED == 0 {
            return Err(PointError::NotCompressed);
        }

        let mut buf = [0u8; G2_COMPRESSED_SIZE];
        buf.copy_from_slice(bytes);
        buf[0] &= SERIALIZATION_MASK;

        if flags & SERIALIZATION_INFINITY != 0 {
            if flags & SERIALIZATION_BIG_Y != 0 {
                return Err(PointError::HighYBitSet);
            }
            check_infinity(&buf)?;
            return Ok(Self::zero());
        }

        swap_limbs(&mut buf);
        let x = read_fq2(&buf)?;
        let y = recover_y::<ark_bls12_381::g2::Config>(&x).ok_or(PointError::NoSquareRoot)?;
        let point = Self(G2Affine::new_unchecked(x, y));
        if point.y_is_higher() != (flags & SERIALIZATION_BIG_Y != 0) {
            return Ok(-point);
        }
        Ok(point)
    }
}

/// Mode-dispatching codec shared by both groups.
pub trait PointSerde: Sized + Copy + Send + Sync {
    const COMPRESSED_SIZE: usize;
    const UNCOMPRESSED_SIZE: usize;

    fn encode(&self, compress: Compress) -> Vec<u8>;
    fn decode(bytes: &[u8], compress: Compress) -> Result<Self, PointError>;

    fn encoded_size(compress: Compress) -> usize {
        match compress {
            Compress::Yes => Self::COMPRESSED_SIZE,
            Compress::No => Self::UNCOMPRESSED_SIZE,
        }
    }
}

macro_rules! impl_point_serde {
    ($name:ident, $compressed:expr, $uncompressed:expr) => {
        impl PointSerde for $name {
            const COMPRESSED_SIZE: usize = $compressed;
            const UNCOMPRESSED_SIZE: usize = $uncompressed;

            fn encode(&self, compress: Compress) -> Vec<u8> {
                match compress {
                    Compress::Yes => self.encode_compressed().to_vec(),
                    Compress::No => self.encode_uncompressed().to_vec(),
                }
            }

            fn decode(bytes: &[u8], compress: Compress) -> Result<Self, PointError> {
                match compress {
                    Compress::Yes => Self::decode_compressed(bytes),
                    Compress::No => Self::decode_uncompressed(bytes),
                }
            }
        }
    };
}

impl_point_serde!(G1serde, G1_COMPRESSED_SIZE, G1_UNCOMPRESSED_SIZE);
impl_point_serde!(G2serde, G2_COMPRESSED_SIZE, G2_UNCOMPRESSED_SIZE);
