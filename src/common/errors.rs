use std::io;

use thiserror::Error;

use crate::audio::RateError;

/// Failures of a file-to-file conversion job.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("cannot open input {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot create output {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("PCM write failed: {0}")]
    Write(#[from] io::Error),
    #[error(transparent)]
    Rate(#[from] RateError),
}
