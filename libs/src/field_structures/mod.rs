use ark_bls12_381::{Fq, Fr};
use ark_ff::{BigInt, BigInteger, PrimeField};
use lazy_static::lazy_static;
use std::cmp::Ordering;

pub type ScalarField = Fr;
pub type BaseField = Fq;

/// Width of a serialized base field element.
pub const FQ_ELEMENT_SIZE: usize = 48;
/// Width of a big-endian scalar.
pub const SCALAR_SIZE: usize = 32;

lazy_static! {
    static ref FQ_MODULUS: [u8; FQ_ELEMENT_SIZE] = {
        let mut out = [0u8; FQ_ELEMENT_SIZE];
        out.copy_from_slice(&Fq::MODULUS.to_bytes_be());
        out
    };
    static ref SCALAR_ORDER: [u8; SCALAR_SIZE] = {
        let mut out = [0u8; SCALAR_SIZE];
        out.copy_from_slice(&Fr::MODULUS.to_bytes_be());
        out
    };
}

/// The base field modulus p, big-endian.
pub fn fq_modulus() -> &'static [u8; FQ_ELEMENT_SIZE] {
    &FQ_MODULUS
}

/// The prime order r of both groups, big-endian.
pub fn scalar_order() -> &'static [u8; SCALAR_SIZE] {
    &SCALAR_ORDER
}

// Compares two big-endian integers of any width.
fn cmp_be(a: &[u8], b: &[u8]) -> Ordering {
    let a = &a[a.iter().take_while(|&&byte| byte == 0).count()..];
    let b = &b[b.iter().take_while(|&&byte| byte == 0).count()..];
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Reports whether `bytes`, read as a big-endian integer, is strictly
/// below the group order.
pub fn is_scalar(bytes: &[u8]) -> bool {
    cmp_be(bytes, scalar_order()) == Ordering::Less
}

pub fn scalar_from_bytes(bytes: &[u8]) -> Option<ScalarField> {
    if !is_scalar(bytes) {
        return None;
    }
    Some(Fr::from_be_bytes_mod_order(bytes))
}

pub fn scalar_to_bytes(scalar: &ScalarField) -> [u8; SCALAR_SIZE] {
    let mut out = [0u8; SCALAR_SIZE];
    out.copy_from_slice(&scalar.into_bigint().to_bytes_be());
    out
}

/// Little-endian u64 limbs of an arbitrary big-endian integer, for
/// scalar multiplications that must not be reduced modulo the order.
pub fn limbs_from_be(bytes: &[u8]) -> Vec<u64> {
    bytes
        .rchunks(8)
        .map(|chunk| {
            let mut limb = [0u8; 8];
            limb[8 - chunk.len()..].copy_from_slice(chunk);
            u64::from_be_bytes(limb)
        })
        .collect()
}

fn bigint_from_be(bytes: &[u8; FQ_ELEMENT_SIZE]) -> BigInt<6> {
    let mut limbs = [0u64; 6];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.rchunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_be_bytes(word);
    }
    BigInt::new(limbs)
}

/// Canonical decode; `None` when the value is not below p.
pub fn fq_from_be_bytes(bytes: &[u8; FQ_ELEMENT_SIZE]) -> Option<BaseField> {
    Fq::from_bigint(bigint_from_be(bytes))
}

pub fn fq_to_be_bytes(element: &BaseField) -> [u8; FQ_ELEMENT_SIZE] {
    let mut out = [0u8; FQ_ELEMENT_SIZE];
    out.copy_from_slice(&element.into_bigint().to_bytes_be());
    out
}

/// Takes a big-endian integer below p as the Montgomery form of an element
/// and returns that element, i.e. `v * R^-1 mod p` with `R = 2^384`.
pub fn fq_montgomery_reduce(bytes: &[u8; FQ_ELEMENT_SIZE]) -> Option<BaseField> {
    if cmp_be(bytes, fq_modulus()) != Ordering::Less {
        return None;
    }
    Some(Fq::new_unchecked(bigint_from_be(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::{One, Zero};

    #[test]
    fn test_fq_modulus_bytes() {
        assert_eq!(
            hex::encode(fq_modulus()),
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab"
        );
    }

    #[test]
    fn test_scalar_order_bytes() {
        assert_eq!(
            hex::encode(scalar_order()),
            "73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001"
        );
    }

    #[test]
    fn test_is_scalar() {
        let order = *scalar_order();
        assert!(!is_scalar(&order));

        let mut below = order;
        below[SCALAR_SIZE - 1] -= 1;
        assert!(is_scalar(&below));

        assert!(is_scalar(&[0u8; SCALAR_SIZE]));
        assert!(!is_scalar(&[0xffu8; SCALAR_SIZE]));

        // leading zeros do not count towards the magnitude
        let mut wide = [0u8; 48];
        wide[48 - SCALAR_SIZE..].copy_from_slice(&below);
        assert!(is_scalar(&wide));
    }

    #[test]
    fn test_scalar_bytes_roundtrip() {
        let scalar = Fr::from(0x0102_0304_0506_0708u64);
        let bytes = scalar_to_bytes(&scalar);
        assert_eq!(&bytes[24..], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(scalar_from_bytes(&bytes), Some(scalar));
        assert_eq!(scalar_from_bytes(scalar_order()), None);
    }

    #[test]
    fn test_limbs_from_be() {
        assert_eq!(limbs_from_be(&[0x01, 0, 0, 0, 0, 0, 0, 0, 0x02]), vec![2, 1]);
        assert_eq!(limbs_from_be(&[0xaa]), vec![0xaa]);
    }

    #[test]
    fn test_fq_canonical_decode() {
        assert_eq!(fq_from_be_bytes(fq_modulus()), None);

        let mut one = [0u8; FQ_ELEMENT_SIZE];
        one[FQ_ELEMENT_SIZE - 1] = 1;
        assert_eq!(fq_from_be_bytes(&one), Some(Fq::one()));
        assert_eq!(fq_to_be_bytes(&Fq::one()), one);
    }

    #[test]
    fn test_fq_montgomery_reduce() {
        assert_eq!(fq_montgomery_reduce(fq_modulus()), None);
        assert_eq!(fq_montgomery_reduce(&[0u8; FQ_ELEMENT_SIZE]), Some(Fq::zero()));

        // R mod p is the Montgomery form of one
        let r_mod_p = Fq::one().0.to_bytes_be();
        let mut bytes = [0u8; FQ_ELEMENT_SIZE];
        bytes.copy_from_slice(&r_mod_p);
        assert_eq!(fq_montgomery_reduce(&bytes), Some(Fq::one()));
    }
}
