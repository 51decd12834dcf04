//! JSON envelope returned by the submit call.
//!
//! A successful response looks like
//! `{"statusCode":200,"body":{"success":true,"wav_key":"..."}}`. Failures keep
//! the same shape but carry `ng_word` or an `error.message` in the body.

use serde::Deserialize;

use crate::error::{Rejection, SynthesisError};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(rename = "statusCode")]
    pub status_code: i64,
    #[serde(default)]
    pub body: EnvelopeBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvelopeBody {
    #[serde(default)]
    pub success: bool,
    pub wav_key: Option<String>,
    pub ng_word: Option<String>,
    pub error: Option<UpstreamError>,
    #[serde(rename = "statusCode")]
    pub status_code: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamError {
    #[serde(default)]
    pub message: String,
}

impl Envelope {
    /// Parse a submit response body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SynthesisError> {
        serde_json::from_slice(bytes).map_err(|e| SynthesisError::MalformedResponse(e.to_string()))
    }

    /// Whether the envelope itself reports a successful synthesis.
    pub fn is_success(&self) -> bool {
        self.status_code == 200 && self.body.success
    }

    /// Extract the `wav_key` of a successful envelope or classify the failure.
    pub fn into_wav_key(self) -> Result<String, SynthesisError> {
        if !self.is_success() {
            return Err(self.rejection().into());
        }
        self.body
            .wav_key
            .ok_or_else(|| SynthesisError::MalformedResponse("missing wav_key".into()))
    }

    /// Classify a failed envelope. A forbidden word takes precedence over the
    /// generic upstream message.
    pub fn rejection(&self) -> Rejection {
        if let Some(word) = &self.body.ng_word {
            return Rejection::ForbiddenWord { word: word.clone() };
        }
        Rejection::Generic {
            status: self.body.status_code,
            message: self
                .body
                .error
                .as_ref()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "no message".into()),
        }
    }
}
