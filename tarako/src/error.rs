use std::io;
use std::path::PathBuf;

use coefont::SynthesisError;
use thiserror::Error;

use crate::playback::PlaybackError;
use crate::text::DecodingError;

/// Everything that can abort a `save` or `play` run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Decoding(#[from] DecodingError),
    #[error("the output path {} is a directory, not a file", .0.display())]
    InvalidDestination(PathBuf),
    #[error("could not open the output file {}: {source}", .path.display())]
    SinkOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not create a temporary file: {0}")]
    TempFile(#[source] io::Error),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error("playing the generated audio failed: {0}")]
    Playback(#[from] PlaybackError),
}

impl AppError {
    /// Process exit code for this failure. Every failure aborts with 1.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
