use libs::group_structures::PointError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CeremonyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ceremony power {power} is out of range, the largest supported is {max}")]
    InvalidPower { power: u32, max: u32 },

    #[error("wrong file size: expected {expected} bytes, found {actual}")]
    WrongFileSize { expected: u64, actual: u64 },

    #[error("invalid point #{index} in {section}: {source}")]
    Point {
        section: &'static str,
        index: usize,
        source: PointError,
    },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CeremonyError>;

impl CeremonyError {
    pub(crate) fn point(section: &'static str, index: usize) -> impl Fn(PointError) -> Self {
        move |source| CeremonyError::Point {
            section,
            index,
            source,
        }
    }
}
