//! Deterministic map from a 32-byte digest to a G2 point.
//!
//! Candidate X coordinates are drawn from a [`ChaChaStream`] keyed by the
//! digest and tried until one lands on the curve, after which the point is
//! pushed into the prime-order subgroup. The draw order and the byte layout
//! of each field element are part of the transcript format: other
//! implementations verifying a contribution recompute these points and
//! must get the same bytes.

use crate::rng::{ChaChaStream, KEY_SIZE};
use libs::field_structures::{fq_montgomery_reduce, fq_to_be_bytes, BaseField, FQ_ELEMENT_SIZE};
use libs::group_structures::{
    G2serde, G2_COMPRESSED_SIZE, SERIALIZATION_BIG_Y, SERIALIZATION_COMPRESSED,
};

/// Draws a base field element by rejection sampling.
///
/// Twelve words fill the 48-byte big-endian buffer two at a time, starting
/// from the least significant 8-byte slot; inside a slot the first word
/// takes the upper four bytes. The top three bits are cleared and values
/// not below p are redrawn. The survivor is read as a Montgomery form.
pub fn extract_field_element(stream: &mut ChaChaStream) -> BaseField {
    loop {
        let mut repr = [0u8; FQ_ELEMENT_SIZE];
        for slot in repr.rchunks_exact_mut(8) {
            slot[..4].copy_from_slice(&stream.next_word().to_be_bytes());
            slot[4..].copy_from_slice(&stream.next_word().to_be_bytes());
        }
        repr[0] &= 0xff >> 3;
        if let Some(element) = fq_montgomery_reduce(&repr) {
            return element;
        }
    }
}

fn extract_bool(stream: &mut ChaChaStream) -> bool {
    stream.next_word() & 1 == 1
}

pub fn hash_to_g2(digest: &[u8; KEY_SIZE]) -> G2serde {
    let mut stream = ChaChaStream::from_digest(digest);
    loop {
        let c0 = extract_field_element(&mut stream);
        let c1 = extract_field_element(&mut stream);
        let greater = extract_bool(&mut stream);

        // Let the codec pick the root so the Y ordering stays in one place.
        let mut buf = [0u8; G2_COMPRESSED_SIZE];
        buf[..FQ_ELEMENT_SIZE].copy_from_slice(&fq_to_be_bytes(&c1));
        buf[FQ_ELEMENT_SIZE..].copy_from_slice(&fq_to_be_bytes(&c0));
        buf[0] |= SERIALIZATION_COMPRESSED;
        if greater {
            buf[0] |= SERIALIZATION_BIG_Y;
        }

        let point = match G2serde::decode_compressed(&buf) {
            Ok(point) => point,
            Err(_) => continue,
        };

        let point = point.clear_cofactor();
        if point.is_zero() {
            continue;
        }
        return point;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libs::field_structures::scalar_order;

    const ZERO_DIGEST_POINT: &str = "81db4a3b72b7e09ae15918061d2e02110926be25716c1b1614f3ef88be59c57ce58308bf3606159e33d845144350d92413f6c72ded114c2f55c291abdf68b032c7adb95c91dd3411606b7870703fd9d08c0e5c711d850611860c07522ec6cb00";

    #[test]
    fn test_hash_to_g2_zero_digest() {
        let point = hash_to_g2(&[0u8; KEY_SIZE]);
        assert_eq!(hex::encode(point.encode_compressed()), ZERO_DIGEST_POINT);
    }

    #[test]
    fn test_hash_to_g2_lands_in_subgroup() {
        for seed in 0..4u8 {
            let point = hash_to_g2(&[seed; KEY_SIZE]);
            assert!(!point.is_zero());
            assert!(point.mul_bytes(scalar_order()).is_zero());
        }
    }

    #[test]
    fn test_hash_to_g2_deterministic() {
        let digest = [99u8; KEY_SIZE];
        assert_eq!(hash_to_g2(&digest), hash_to_g2(&digest));
        assert_ne!(hash_to_g2(&[1u8; KEY_SIZE]), hash_to_g2(&[2u8; KEY_SIZE]));
    }

    #[test]
    fn test_extract_field_element_is_canonical() {
        let mut stream = ChaChaStream::new([7u8; KEY_SIZE]);
        for _ in 0..64 {
            let element = extract_field_element(&mut stream);
            let bytes = fq_to_be_bytes(&element);
            assert!(bytes[0] < 0x1b);
        }
    }
}
