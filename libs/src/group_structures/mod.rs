pub mod group_serde;

pub use group_serde::*;

use crate::field_structures::{limbs_from_be, ScalarField};
use ark_bls12_381::{Fq, Fq2, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{AffineRepr, CurveConfig, CurveGroup};
use std::ops::{Add, Mul, Neg, Sub};

/// Normalized-Y parity over the base field: `y > -y`.
pub(crate) fn fq_is_higher(y: &Fq) -> bool {
    *y > -*y
}

/// Normalized-Y parity over the extension field, ordering on `c1` first and
/// falling back to `c0` when the imaginary parts agree.
pub(crate) fn fq2_is_higher(y: &Fq2) -> bool {
    let neg = -*y;
    if y.c1 != neg.c1 {
        y.c1 > neg.c1
    } else {
        y.c0 > neg.c0
    }
}

/// Full cofactor of the BLS12-381 G2 curve, little-endian u64 limbs.
pub const G2_COFACTOR: &[u64] = <ark_bls12_381::g2::Config as CurveConfig>::COFACTOR;

macro_rules! impl_group_serde {
    ($name:ident, $affine:ty, $projective:ty, $is_higher:ident) => {
        #[derive(Clone, Debug, Copy, PartialEq, Eq)]
        pub struct $name(pub $affine);

        impl $name {
            pub fn zero() -> Self {
                Self(<$affine>::identity())
            }

            pub fn generator() -> Self {
                Self(<$affine>::generator())
            }

            pub fn is_zero(&self) -> bool {
                self.0.infinity
            }

            /// Scalar multiplication by a big-endian integer of any width,
            /// without reducing it modulo the group order.
            pub fn mul_bytes(&self, scalar: &[u8]) -> Self {
                Self(self.0.mul_bigint(limbs_from_be(scalar)).into_affine())
            }

            pub fn y_is_higher(&self) -> bool {
                !self.is_zero() && $is_higher(&self.0.y)
            }

            /// Multiplies `points[i]` by `scalars[i]` in place, normalizing
            /// the whole batch with a single inversion.
            pub fn batch_mul(points: &mut [Self], scalars: &[ScalarField]) {
                debug_assert_eq!(points.len(), scalars.len());
                let scaled: Vec<$projective> = points
                    .iter()
                    .zip(scalars.iter())
                    .map(|(point, scalar)| point.0 * scalar)
                    .collect();
                for (point, affine) in points
                    .iter_mut()
                    .zip(<$projective>::normalize_batch(&scaled))
                {
                    *point = Self(affine);
                }
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                Self((self.0.into_group() + other.0).into_affine())
            }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                Self((self.0.into_group() - other.0).into_affine())
            }
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Mul<ScalarField> for $name {
            type Output = Self;

            fn mul(self, other: ScalarField) -> Self {
                Self((self.0 * other).into_affine())
            }
        }

        impl Mul<$name> for ScalarField {
            type Output = $name;

            fn mul(self, other: $name) -> $name {
                $name((other.0 * self).into_affine())
            }
        }
    };
}

impl_group_serde!(G1serde, G1Affine, G1Projective, fq_is_higher);
impl_group_serde!(G2serde, G2Affine, G2Projective, fq2_is_higher);

impl G2serde {
    /// Multiplies by the full G2 cofactor, projecting into the prime-order
    /// subgroup.
    pub fn clear_cofactor(&self) -> Self {
        Self(self.0.mul_bigint(G2_COFACTOR).into_affine())
    }
}
