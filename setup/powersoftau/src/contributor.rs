use crate::params::{CeremonyParams, HASH_SIZE};
use crate::{impl_read_from_json, impl_write_into_json};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a contributor publishes alongside their response file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContributionReceipt {
    pub date: String,
    pub tau_powers: usize,
    pub workers: usize,
    pub challenge_hash: String,
    pub response_hash: String,
    pub time_taken_seconds: f64,
}

impl_read_from_json!(ContributionReceipt);
impl_write_into_json!(ContributionReceipt);

impl ContributionReceipt {
    pub fn new(
        params: &CeremonyParams,
        workers: usize,
        challenge_hash: &[u8; HASH_SIZE],
        response_hash: &[u8; HASH_SIZE],
        time_taken_seconds: f64,
    ) -> Self {
        Self {
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            tau_powers: params.tau_powers,
            workers,
            challenge_hash: hex::encode(challenge_hash),
            response_hash: hex::encode(response_hash),
            time_taken_seconds,
        }
    }
}

impl fmt::Display for ContributionReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Contribution")?;
        writeln!(f, "- **Date**: {}", self.date)?;
        writeln!(f, "- **Tau powers**: {}", self.tau_powers)?;
        writeln!(f, "- **Workers**: {}", self.workers)?;
        writeln!(f, "- **Challenge hash**: `{}`", self.challenge_hash)?;
        writeln!(f, "- **Response hash**: `{}`", self.response_hash)?;
        write!(f, "- **Time taken**: {:.3} seconds", self.time_taken_seconds)
    }
}
