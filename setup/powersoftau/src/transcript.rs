//! Challenge and response files.
//!
//! Every file starts with the hash of the file before it, and every file's
//! own BLAKE2b-512 hash is taken over its complete contents as they are
//! read or written. That chains all contributions into one transcript.

use crate::accumulator::Accumulator;
use crate::errors::{CeremonyError, Result};
use crate::keypair::PublicKey;
use crate::params::{CeremonyParams, HASH_SIZE};
use ark_serialize::Compress;
use blake2::{Blake2b512, Digest};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// Passes reads through while hashing everything that goes by.
pub struct HashReader<R> {
    reader: R,
    hasher: Blake2b512,
}

impl<R: Read> HashReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            hasher: Blake2b512::new(),
        }
    }

    pub fn finalize(self) -> [u8; HASH_SIZE] {
        let mut hash = [0u8; HASH_SIZE];
        hash.copy_from_slice(&self.hasher.finalize());
        hash
    }
}

impl<R: Read> Read for HashReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

/// Passes writes through while hashing everything that goes by.
pub struct HashWriter<W> {
    writer: W,
    hasher: Blake2b512,
}

impl<W: Write> HashWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            hasher: Blake2b512::new(),
        }
    }

    /// Flushes the inner writer and returns the hash of all bytes written.
    pub fn finalize(mut self) -> io::Result<[u8; HASH_SIZE]> {
        self.writer.flush()?;
        let mut hash = [0u8; HASH_SIZE];
        hash.copy_from_slice(&self.hasher.finalize());
        Ok(hash)
    }
}

impl<W: Write> Write for HashWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.writer.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

fn check_file_size(file: &File, expected: usize) -> Result<()> {
    let actual = file.metadata()?.len();
    if actual != expected as u64 {
        return Err(CeremonyError::WrongFileSize {
            expected: expected as u64,
            actual,
        });
    }
    Ok(())
}

/// `previous_hash || accumulator (uncompressed)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    pub previous_hash: [u8; HASH_SIZE],
    pub accumulator: Accumulator,
    /// Hash of the serialized challenge.
    pub hash: [u8; HASH_SIZE],
}

impl Challenge {
    pub fn from_accumulator(previous_hash: [u8; HASH_SIZE], accumulator: Accumulator) -> Result<Self> {
        let mut challenge = Self {
            previous_hash,
            accumulator,
            hash: [0u8; HASH_SIZE],
        };
        challenge.hash = challenge.write_to(io::sink())?;
        Ok(challenge)
    }

    pub fn read_from<R: Read>(reader: R, params: &CeremonyParams) -> Result<Self> {
        let mut reader = HashReader::new(reader);
        let mut previous_hash = [0u8; HASH_SIZE];
        reader.read_exact(&mut previous_hash)?;
        let accumulator = Accumulator::read_from(&mut reader, params, Compress::No)?;

        Ok(Self {
            previous_hash,
            accumulator,
            hash: reader.finalize(),
        })
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P, params: &CeremonyParams) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        check_file_size(&file, params.challenge_size())?;
        info!(path = %path.as_ref().display(), "reading challenge");
        Self::read_from(BufReader::new(file), params)
    }

    /// Writes the challenge and returns the hash of what was written.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<[u8; HASH_SIZE]> {
        let mut writer = HashWriter::new(writer);
        writer.write_all(&self.previous_hash)?;
        self.accumulator.write_to(&mut writer, Compress::No)?;
        Ok(writer.finalize()?)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<[u8; HASH_SIZE]> {
        let file = File::create(path.as_ref())?;
        let hash = self.write_to(BufWriter::new(file))?;
        info!(path = %path.as_ref().display(), "wrote challenge");
        Ok(hash)
    }
}

/// `challenge_hash || accumulator (compressed) || public_key`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub challenge_hash: [u8; HASH_SIZE],
    pub accumulator: Accumulator,
    pub public_key: PublicKey,
}

impl Response {
    /// Writes the response and returns its hash, which the next challenge
    /// starts with.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<[u8; HASH_SIZE]> {
        let mut writer = HashWriter::new(writer);
        writer.write_all(&self.challenge_hash)?;
        self.accumulator.write_to(&mut writer, Compress::Yes)?;
        self.public_key.write_to(&mut writer)?;
        Ok(writer.finalize()?)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<[u8; HASH_SIZE]> {
        let file = File::create(path.as_ref())?;
        let hash = self.write_to(BufWriter::new(file))?;
        info!(path = %path.as_ref().display(), "wrote response");
        Ok(hash)
    }

    pub fn hash(&self) -> Result<[u8; HASH_SIZE]> {
        self.write_to(io::sink())
    }

    /// Parses a response, returning it together with its hash.
    pub fn read_from<R: Read>(reader: R, params: &CeremonyParams) -> Result<(Self, [u8; HASH_SIZE])> {
        let mut reader = HashReader::new(reader);
        let mut challenge_hash = [0u8; HASH_SIZE];
        reader.read_exact(&mut challenge_hash)?;
        let accumulator = Accumulator::read_from(&mut reader, params, Compress::Yes)?;
        let public_key = PublicKey::read_from(&mut reader)?;

        let response = Self {
            challenge_hash,
            accumulator,
            public_key,
        };
        Ok((response, reader.finalize()))
    }

    pub fn read_from_file<P: AsRef<Path>>(
        path: P,
        params: &CeremonyParams,
    ) -> Result<(Self, [u8; HASH_SIZE])> {
        let file = File::open(path.as_ref())?;
        check_file_size(&file, params.response_size())?;
        info!(path = %path.as_ref().display(), "reading response");
        Self::read_from(BufReader::new(file), params)
    }

    /// The challenge for the next contributor: this response's hash
    /// followed by the updated accumulator, uncompressed.
    pub fn into_next_challenge(self, response_hash: [u8; HASH_SIZE]) -> Result<Challenge> {
        Challenge::from_accumulator(response_hash, self.accumulator)
    }
}
