use clap::Parser;
use powersoftau::contributor::ContributionReceipt;
use powersoftau::params::{DEFAULT_POWER, MAX_POWER};
use powersoftau::transcript::Challenge;
use powersoftau::utils::{format_hash, init_logging};
use powersoftau::{CeremonyParams, Result};
use rand::rngs::OsRng;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Config {
    /// Challenge file to contribute to
    #[arg(long, value_name = "CHALLENGE", default_value = "./challenge")]
    challenge: PathBuf,

    /// Where to write the response
    #[arg(long, value_name = "RESPONSE", default_value = "./response")]
    response: PathBuf,

    /// Ceremony size as a power of two: N = 2^POWER
    #[arg(
        long,
        value_name = "POWER",
        default_value_t = DEFAULT_POWER,
        value_parser = clap::value_parser!(u32).range(0..=MAX_POWER as i64)
    )]
    power: u32,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(long, value_name = "THREADS")]
    threads: Option<usize>,

    /// Also write the challenge for the next contributor
    #[arg(long, value_name = "NEXT_CHALLENGE")]
    next_challenge: Option<PathBuf>,

    /// Write a JSON receipt of this contribution
    #[arg(long, value_name = "RECEIPT")]
    receipt: Option<PathBuf>,
}

/*
cargo run --release --bin taucompute -- \
  --challenge ./challenge \
  --response ./response \
  --power 10
*/
fn main() {
    init_logging();
    let config = Config::parse();

    if let Err(err) = run(&config) {
        error!("contribution failed: {}", err);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    let params = CeremonyParams::from_power(config.power)?;
    let workers = config.threads.unwrap_or_else(num_cpus::get);
    let start = Instant::now();

    info!("Reading challenge...");
    let challenge = Challenge::read_from_file(&config.challenge, &params)?;
    let challenge_hash = challenge.hash;

    info!(workers, "Starting computation...");
    let response = challenge.compute(&mut OsRng, workers)?;

    info!("Writing response...");
    let response_hash = response.write_to_file(&config.response)?;

    if let Some(path) = &config.next_challenge {
        response.into_next_challenge(response_hash)?.write_to_file(path)?;
    }

    let elapsed = start.elapsed().as_secs_f64();
    if let Some(path) = &config.receipt {
        let receipt =
            ContributionReceipt::new(&params, workers, &challenge_hash, &response_hash, elapsed);
        receipt.write_into_json(path)?;
        info!("receipt:\n{}", receipt);
    }

    println!(
        "Done!\n\nYour contribution has been written to `{0}`\n\nThe BLAKE2b hash of `{0}` is:",
        config.response.display()
    );
    print!("{}", format_hash(&response_hash));
    Ok(())
}
