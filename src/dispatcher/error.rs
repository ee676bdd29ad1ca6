use thiserror::Error;

#[derive(Error, Debug)]
pub enum StressError {
    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("Concurrency {requested} exceeds the admission gate limit of {max}")]
    ConcurrencyTooLarge { requested: usize, max: usize },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

pub type StressResult<T> = Result<T, StressError>;
