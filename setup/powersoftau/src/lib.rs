pub mod accumulator;
pub mod compute;
pub mod contributor;
pub mod errors;
pub mod hash_to_g2;
pub mod keypair;
pub mod params;
pub mod rng;
pub mod transcript;
pub mod utils;

pub use errors::{CeremonyError, Result};
pub use params::{CeremonyParams, HASH_SIZE};
