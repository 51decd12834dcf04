//! Client for the CoeFont "Hiroyuki" text-to-speech endpoint.
//!
//! Synthesis is a two step exchange: the text is submitted and a `wav_key`
//! comes back, then the key is exchanged for the generated WAV bytes. The
//! [`CoeFontClient`] performs both calls and writes the audio to a caller
//! supplied sink.

pub mod client;
pub mod envelope;
pub mod error;

pub use client::{CoeFontClient, Stage, DEFAULT_BASE_URL, DEFAULT_COEFONT};
pub use envelope::{Envelope, EnvelopeBody, UpstreamError};
pub use error::{Rejection, SynthesisError};

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, SynthesisError>;
