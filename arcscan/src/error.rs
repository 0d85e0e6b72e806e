//! Error types for arcscan

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArcScanError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A fallible provider failed to answer the probe for sample `index`.
    #[error("Spatial query failed at sample {index}: {source}")]
    Provider {
        index: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Worker error: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, ArcScanError>;
