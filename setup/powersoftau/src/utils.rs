use crate::params::HASH_SIZE;
use blake2::{Blake2b512, Digest};
use tracing_subscriber::EnvFilter;

#[macro_export]
macro_rules! impl_read_from_json {
    ($t:ty) => {
        impl $t {
            pub fn read_from_json<P: AsRef<std::path::Path>>(path: P) -> $crate::Result<Self> {
                let file = std::fs::File::open(path)?;
                let reader = std::io::BufReader::new(file);
                let res: Self = serde_json::from_reader(reader)?;
                Ok(res)
            }
        }
    };
}

#[macro_export]
macro_rules! impl_write_into_json {
    ($t:ty) => {
        impl $t {
            pub fn write_into_json<P: AsRef<std::path::Path>>(&self, path: P) -> $crate::Result<()> {
                if let Some(parent) = path.as_ref().parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let file = std::fs::File::create(path)?;
                let writer = std::io::BufWriter::new(file);
                serde_json::to_writer_pretty(writer, self)?;
                Ok(())
            }
        }
    };
}

/// BLAKE2b-512 of the empty string; the "previous hash" of the first
/// challenge.
pub fn blank_hash() -> [u8; HASH_SIZE] {
    let mut hash = [0u8; HASH_SIZE];
    hash.copy_from_slice(&Blake2b512::new().finalize());
    hash
}

/// Renders a digest as four tab-indented rows of four 4-byte hex groups.
pub fn format_hash(hash: &[u8; HASH_SIZE]) -> String {
    hash.chunks(16)
        .map(|row| {
            let groups: Vec<String> = row.chunks(4).map(hex::encode).collect();
            format!("\t{}\n", groups.join(" "))
        })
        .collect()
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
