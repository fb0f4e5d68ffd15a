use clap::Parser;
use powersoftau::accumulator::Accumulator;
use powersoftau::params::{DEFAULT_POWER, MAX_POWER};
use powersoftau::transcript::Challenge;
use powersoftau::utils::{blank_hash, format_hash, init_logging};
use powersoftau::{CeremonyParams, Result};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Config {
    /// Where to write the first challenge
    #[arg(long, value_name = "OUTFILE", default_value = "./challenge")]
    outfile: PathBuf,

    /// Ceremony size as a power of two: N = 2^POWER
    #[arg(
        long,
        value_name = "POWER",
        default_value_t = DEFAULT_POWER,
        value_parser = clap::value_parser!(u32).range(0..=MAX_POWER as i64)
    )]
    power: u32,
}

fn main() {
    init_logging();
    let config = Config::parse();

    if let Err(err) = run(&config) {
        error!("initialization failed: {}", err);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    let params = CeremonyParams::from_power(config.power)?;
    let start = Instant::now();

    let challenge = Challenge::from_accumulator(blank_hash(), Accumulator::new(&params))?;
    let hash = challenge.write_to_file(&config.outfile)?;
    info!(
        tau_powers = params.tau_powers,
        "initial challenge written in {:.3} seconds",
        start.elapsed().as_secs_f64()
    );

    println!("The BLAKE2b hash of `{}` is:", config.outfile.display());
    print!("{}", format_hash(&hash));
    Ok(())
}
