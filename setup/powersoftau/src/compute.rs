//! In-place exponentiation of an accumulator by a contributor's secrets.
//!
//! The G1 tau ladder is cut into contiguous chunks. Each chunk owns
//! disjoint mutable slices of the four ladders and derives its own starting
//! power, so chunks run on the worker pool without any locking and the
//! result does not depend on how many workers there are.

use crate::accumulator::Accumulator;
use crate::errors::Result;
use crate::keypair::{keypair, PrivateKey};
use crate::params::CHUNK_SIZE;
use crate::transcript::{Challenge, Response};
use ark_ff::Field;
use libs::field_structures::ScalarField;
use libs::group_structures::{G1serde, G2serde};
use rand::{CryptoRng, RngCore};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::time::Instant;
use tracing::{debug, info};

struct ChunkJob<'a> {
    start: usize,
    tau_g1: &'a mut [G1serde],
    tau_g2: &'a mut [G2serde],
    alpha_tau_g1: &'a mut [G1serde],
    beta_tau_g1: &'a mut [G1serde],
}

impl ChunkJob<'_> {
    fn run(self, key: &PrivateKey) {
        let mut power = key.tau.pow([self.start as u64]);
        let mut powers = Vec::with_capacity(self.tau_g1.len());
        for _ in 0..self.tau_g1.len() {
            powers.push(power);
            power *= key.tau;
        }

        G1serde::batch_mul(self.tau_g1, &powers);

        let n = self.tau_g2.len();
        G2serde::batch_mul(self.tau_g2, &powers[..n]);
        let alpha_powers: Vec<ScalarField> = powers[..n].iter().map(|p| *p * key.alpha).collect();
        G1serde::batch_mul(self.alpha_tau_g1, &alpha_powers);
        let beta_powers: Vec<ScalarField> = powers[..n].iter().map(|p| *p * key.beta).collect();
        G1serde::batch_mul(self.beta_tau_g1, &beta_powers);
    }
}

// Splits off at most `len` leading elements, leaving the rest in `slice`.
fn take_chunk<'a, T>(slice: &mut &'a mut [T], len: usize) -> &'a mut [T] {
    let rest = std::mem::take(slice);
    let (head, tail) = rest.split_at_mut(len.min(rest.len()));
    *slice = tail;
    head
}

impl Accumulator {
    fn partition(&mut self, chunk_size: usize) -> Vec<ChunkJob<'_>> {
        let mut tau_g1 = self.tau_powers_g1.as_mut_slice();
        let mut tau_g2 = self.tau_powers_g2.as_mut_slice();
        let mut alpha_tau_g1 = self.alpha_tau_powers_g1.as_mut_slice();
        let mut beta_tau_g1 = self.beta_tau_powers_g1.as_mut_slice();

        let mut jobs = Vec::new();
        let mut start = 0;
        while !tau_g1.is_empty() {
            let job = ChunkJob {
                start,
                tau_g1: take_chunk(&mut tau_g1, chunk_size),
                tau_g2: take_chunk(&mut tau_g2, chunk_size),
                alpha_tau_g1: take_chunk(&mut alpha_tau_g1, chunk_size),
                beta_tau_g1: take_chunk(&mut beta_tau_g1, chunk_size),
            };
            start += job.tau_g1.len();
            jobs.push(job);
        }
        jobs
    }

    /// Multiplies element `i` of each ladder by `tau^i` (and by `alpha` or
    /// `beta` where the ladder carries one), then `beta_g2` by `beta`.
    pub fn transform(&mut self, key: &PrivateKey, workers: usize) -> Result<()> {
        self.transform_chunked(key, workers, CHUNK_SIZE)
    }

    fn transform_chunked(&mut self, key: &PrivateKey, workers: usize, chunk_size: usize) -> Result<()> {
        let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
        let start = Instant::now();
        let jobs = self.partition(chunk_size);
        debug!(chunks = jobs.len(), chunk_size, workers, "dispatching compute jobs");

        pool.install(|| jobs.into_par_iter().for_each(|job| job.run(key)));
        self.beta_g2 = self.beta_g2 * key.beta;

        info!(
            tau_powers = self.tau_powers_g2.len(),
            "transformed accumulator in {:.3} seconds",
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }
}

impl Challenge {
    /// Runs one contribution: draws a keypair bound to this challenge's
    /// hash, applies it, and packages the result as a response.
    pub fn compute<R: RngCore + CryptoRng>(self, rng: &mut R, workers: usize) -> Result<Response> {
        let (public_key, private_key) = keypair(rng, &self.hash);
        let mut accumulator = self.accumulator;
        accumulator.transform(&private_key, workers)?;

        Ok(Response {
            challenge_hash: self.hash,
            accumulator,
            public_key,
        })
    }
}
