//! Local audio playback.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlaybackError {
    #[error("could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not decode {} as audio: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("no usable audio output device: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("could not start playback: {0}")]
    Play(#[from] rodio::PlayError),
}

/// Something that can play a WAV file, blocking until it has finished.
pub trait Player {
    fn play(&self, path: &Path) -> Result<(), PlaybackError>;
}

/// [`Player`] using the default output device.
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioPlayer;

impl RodioPlayer {
    fn decoder(path: &Path) -> Result<rodio::Decoder<BufReader<File>>, PlaybackError> {
        let file = File::open(path).map_err(|source| PlaybackError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        rodio::Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Player for RodioPlayer {
    fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        // decode first so a broken file is reported even without a device
        let source = Self::decoder(path)?;
        let (_stream, handle) = rodio::OutputStream::try_default()?;
        let sink = rodio::Sink::try_new(&handle)?;
        sink.append(source);
        debug!(path = %path.display(), "playback started");
        sink.sleep_until_end();
        Ok(())
    }
}
