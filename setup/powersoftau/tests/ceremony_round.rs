use ark_serialize::Compress;
use libs::group_structures::{G1serde, G2serde};
use powersoftau::accumulator::Accumulator;
use powersoftau::keypair::{
    KnowledgeProof, ALPHA_PERSONALIZATION, BETA_PERSONALIZATION, TAU_PERSONALIZATION,
};
use powersoftau::params::HASH_SIZE;
use powersoftau::transcript::{Challenge, Response};
use powersoftau::utils::blank_hash;
use powersoftau::{CeremonyError, CeremonyParams};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::fs;

fn first_challenge(params: &CeremonyParams) -> Challenge {
    Challenge::from_accumulator(blank_hash(), Accumulator::new(params)).unwrap()
}

#[test]
fn test_round_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let challenge_path = dir.path().join("challenge");
    let response_path = dir.path().join("response");
    let next_path = dir.path().join("new_challenge");
    let params = CeremonyParams::from_power(3).unwrap();

    let initial = first_challenge(&params);
    let written_hash = initial.write_to_file(&challenge_path).unwrap();
    assert_eq!(written_hash, initial.hash);
    assert_eq!(
        fs::metadata(&challenge_path).unwrap().len(),
        params.challenge_size() as u64
    );

    let challenge = Challenge::read_from_file(&challenge_path, &params).unwrap();
    assert_eq!(challenge, initial);
    let challenge_hash = challenge.hash;

    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let response = challenge.compute(&mut rng, 2).unwrap();
    let response_hash = response.write_to_file(&response_path).unwrap();
    assert_eq!(
        fs::metadata(&response_path).unwrap().len(),
        params.response_size() as u64
    );

    let (parsed, parsed_hash) = Response::read_from_file(&response_path, &params).unwrap();
    assert_eq!(parsed_hash, response_hash);
    assert_eq!(parsed.hash().unwrap(), response_hash);
    assert_eq!(parsed.challenge_hash, challenge_hash);
    assert_eq!(parsed, response);

    // the response file is the challenge hash followed by the compressed accumulator
    let bytes = fs::read(&response_path).unwrap();
    assert_eq!(&bytes[..HASH_SIZE], &challenge_hash);
    let mut compressed = Vec::new();
    parsed.accumulator.write_to(&mut compressed, Compress::Yes).unwrap();
    assert_eq!(&bytes[HASH_SIZE..HASH_SIZE + compressed.len()], compressed.as_slice());

    let next = parsed.into_next_challenge(response_hash).unwrap();
    next.write_to_file(&next_path).unwrap();
    let reread = Challenge::read_from_file(&next_path, &params).unwrap();
    assert_eq!(reread.previous_hash, response_hash);
    assert_eq!(reread, next);
}

#[test]
fn test_two_contributions_chain() {
    let params = CeremonyParams::from_power(2).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(7);

    let first = first_challenge(&params);
    let first_hash = first.hash;
    let response = first.compute(&mut rng, 1).unwrap();
    let response_hash = response.hash().unwrap();
    assert_eq!(response.challenge_hash, first_hash);

    let second = response.into_next_challenge(response_hash).unwrap();
    assert_eq!(second.previous_hash, response_hash);
    let second_hash = second.hash;
    let response = second.compute(&mut rng, 3).unwrap();
    assert_eq!(response.challenge_hash, second_hash);

    // tau^0 = 1, so the first G1 and G2 powers never move
    let acc = &response.accumulator;
    assert_eq!(acc.tau_powers_g1[0], G1serde::generator());
    assert_eq!(acc.tau_powers_g2[0], G2serde::generator());
    assert_ne!(acc.alpha_tau_powers_g1[0], G1serde::generator());
    assert_ne!(acc.beta_g2, G2serde::generator());

    for (proof, tag) in [
        (response.public_key.tau, TAU_PERSONALIZATION),
        (response.public_key.alpha, ALPHA_PERSONALIZATION),
        (response.public_key.beta, BETA_PERSONALIZATION),
    ] {
        assert!(!proof.s.is_zero());
        assert!(!proof.s_x_g2.is_zero());
        // the proof is bound to the second challenge, not the first
        let base = KnowledgeProof::g2_base(tag, &second_hash, &proof.s, &proof.s_x);
        let stale = KnowledgeProof::g2_base(tag, &first_hash, &proof.s, &proof.s_x);
        assert_ne!(base, stale);
    }
}

#[test]
fn test_wrong_challenge_size_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("challenge");
    let params = CeremonyParams::from_power(1).unwrap();
    first_challenge(&params).write_to_file(&path).unwrap();

    let bigger = CeremonyParams::from_power(2).unwrap();
    match Challenge::read_from_file(&path, &bigger) {
        Err(CeremonyError::WrongFileSize { expected, actual }) => {
            assert_eq!(expected, bigger.challenge_size() as u64);
            assert_eq!(actual, params.challenge_size() as u64);
        }
        other => panic!("expected a size error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_truncated_response_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("response");
    let params = CeremonyParams::from_power(1).unwrap();

    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let response = first_challenge(&params).compute(&mut rng, 1).unwrap();
    response.write_to_file(&path).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    bytes.pop();
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(
        Response::read_from_file(&path, &params),
        Err(CeremonyError::WrongFileSize { .. })
    ));
}
