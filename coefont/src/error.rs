use thiserror::Error;

/// Why the submit call did not produce a usable `wav_key`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("speech generation failed, the CoeFont server may be busy (HTTP {status})")]
    ServerError { status: u16 },
    #[error("speech generation failed because the text contains the forbidden word \"{word}\"; change the text and try again")]
    ForbiddenWord { word: String },
    #[error("speech generation failed, the CoeFont server may be busy (HTTP {} / message: {message})", status_label(.status))]
    Generic { status: Option<i64>, message: String },
}

fn status_label(status: &Option<i64>) -> String {
    status.map_or_else(|| "unknown".to_string(), |s| s.to_string())
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("downloading the generated audio failed, the CoeFont server may be busy (HTTP {status})")]
    DownloadFailed { status: u16 },
    #[error("malformed response from the synthesis endpoint: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("writing audio failed: {0}")]
    Sink(#[source] std::io::Error),
}
