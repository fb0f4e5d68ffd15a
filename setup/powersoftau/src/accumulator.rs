use crate::errors::{CeremonyError, Result};
use crate::params::CeremonyParams;
use ark_serialize::Compress;
use libs::group_structures::{G1serde, G2serde, PointSerde};
use rayon::prelude::*;
use std::io::{Read, Write};
use std::time::Instant;
use tracing::info;

/// Points decoded or encoded per buffered batch.
const IO_BATCH: usize = 1 << 14;

/// The structured reference string: powers of the combined secret `tau`
/// in both groups, and the same powers scaled by `alpha` and `beta`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accumulator {
    /// `tau^i * G1` for `i` in `0..2N-1`
    pub tau_powers_g1: Vec<G1serde>,
    /// `tau^i * G2` for `i` in `0..N`
    pub tau_powers_g2: Vec<G2serde>,
    /// `alpha * tau^i * G1` for `i` in `0..N`
    pub alpha_tau_powers_g1: Vec<G1serde>,
    /// `beta * tau^i * G1` for `i` in `0..N`
    pub beta_tau_powers_g1: Vec<G1serde>,
    /// `beta * G2`
    pub beta_g2: G2serde,
}

impl Accumulator {
    /// Every element equal to its generator, i.e. all secrets set to one.
    pub fn new(params: &CeremonyParams) -> Self {
        Self {
            tau_powers_g1: vec![G1serde::generator(); params.tau_powers_g1()],
            tau_powers_g2: vec![G2serde::generator(); params.tau_powers],
            alpha_tau_powers_g1: vec![G1serde::generator(); params.tau_powers],
            beta_tau_powers_g1: vec![G1serde::generator(); params.tau_powers],
            beta_g2: G2serde::generator(),
        }
    }

    pub fn read_from<R: Read>(reader: &mut R, params: &CeremonyParams, compress: Compress) -> Result<Self> {
        let start = Instant::now();
        let tau_powers_g1 = read_section(reader, params.tau_powers_g1(), compress, "tau_powers_g1")?;
        let tau_powers_g2 = read_section(reader, params.tau_powers, compress, "tau_powers_g2")?;
        let alpha_tau_powers_g1 =
            read_section(reader, params.tau_powers, compress, "alpha_tau_powers_g1")?;
        let beta_tau_powers_g1 =
            read_section(reader, params.tau_powers, compress, "beta_tau_powers_g1")?;
        let beta_g2 = read_section::<G2serde, _>(reader, 1, compress, "beta_g2")?[0];
        info!(
            tau_powers = params.tau_powers,
            compressed = matches!(compress, Compress::Yes),
            "decoded accumulator in {:.3} seconds",
            start.elapsed().as_secs_f64()
        );

        Ok(Self {
            tau_powers_g1,
            tau_powers_g2,
            alpha_tau_powers_g1,
            beta_tau_powers_g1,
            beta_g2,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W, compress: Compress) -> std::io::Result<()> {
        write_section(writer, &self.tau_powers_g1, compress)?;
        write_section(writer, &self.tau_powers_g2, compress)?;
        write_section(writer, &self.alpha_tau_powers_g1, compress)?;
        write_section(writer, &self.beta_tau_powers_g1, compress)?;
        writer.write_all(&self.beta_g2.encode(compress))
    }
}

fn read_section<P: PointSerde, R: Read>(
    reader: &mut R,
    len: usize,
    compress: Compress,
    section: &'static str,
) -> Result<Vec<P>> {
    let size = P::encoded_size(compress);
    let mut points = Vec::with_capacity(len);
    let mut buf = vec![0u8; IO_BATCH.min(len) * size];

    while points.len() < len {
        let offset = points.len();
        let batch = IO_BATCH.min(len - offset);
        let bytes = &mut buf[..batch * size];
        reader.read_exact(bytes)?;

        let decoded = bytes
            .par_chunks_exact(size)
            .enumerate()
            .map(|(i, encoded)| {
                P::decode(encoded, compress).map_err(CeremonyError::point(section, offset + i))
            })
            .collect::<Result<Vec<P>>>()?;
        points.extend(decoded);
    }
    Ok(points)
}

fn write_section<P: PointSerde, W: Write>(
    writer: &mut W,
    points: &[P],
    compress: Compress,
) -> std::io::Result<()> {
    let size = P::encoded_size(compress);
    let mut buf = vec![0u8; IO_BATCH.min(points.len()) * size];

    for batch in points.chunks(IO_BATCH) {
        let bytes = &mut buf[..batch.len() * size];
        bytes
            .par_chunks_exact_mut(size)
            .zip(batch.par_iter())
            .for_each(|(out, point)| out.copy_from_slice(&point.encode(compress)));
        writer.write_all(bytes)?;
    }
    Ok(())
}
