//! HTTP client for the CoeFont synthesis endpoint.
//!
//! [`CoeFontClient`] submits text, exchanges the returned `wav_key` for the
//! generated audio and writes it to a sink. Each call is attempted once.

use std::io::Write;

use bytes::Bytes;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER, USER_AGENT,
};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::envelope::Envelope;
use crate::error::{Rejection, SynthesisError};
use crate::Result;

/// Base URL of the public service.
pub const DEFAULT_BASE_URL: &str =
    "https://tgeedx93af.execute-api.ap-northeast-1.amazonaws.com/production";

/// CoeFont identifier of the Hiroyuki voice.
pub const DEFAULT_COEFONT: &str = "19d55439-312d-4a1d-a27b-28f0f31bedc5";

const SUBMIT_PATH: &str = "hiroyuki/text2speech";
const FETCH_PATH: &str = "chore/get_presigned_url";

// The upstream only answers requests that look like they come from its web page.
const SITE_ORIGIN: &str = "https://hiroyuki.coefont.cloud";
const SITE_REFERER: &str = "https://hiroyuki.coefont.cloud/";
const BROWSER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/104.0.0.0 Safari/537.36";

/// Stage of a synthesis run, reported before each remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Generating,
    Downloading,
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    coefont: &'a str,
    text: &'a str,
}

#[derive(Clone, Debug)]
pub struct CoeFontClient {
    base_url: String,
    coefont: String,
    client: Client,
}

impl CoeFontClient {
    /// Create a client for `base_url` speaking with the default voice.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_coefont(base_url, DEFAULT_COEFONT)
    }

    /// Create a client using a specific CoeFont voice identifier.
    pub fn with_coefont(base_url: impl Into<String>, coefont: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            coefont: coefont.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Submit `text` for synthesis and return the `wav_key` of the result.
    pub async fn submit(&self, text: &str) -> Result<String> {
        let url = self.endpoint(SUBMIT_PATH);
        info!(%url, chars = text.chars().count(), "submitting text");
        let res = self
            .client
            .post(&url)
            .json(&SubmitRequest {
                coefont: &self.coefont,
                text,
            })
            .send()
            .await?;
        let status = res.status();
        if status != StatusCode::OK {
            warn!(%status, "synthesis request failed");
            return Err(Rejection::ServerError {
                status: status.as_u16(),
            }
            .into());
        }
        let body = res.bytes().await?;
        let key = Envelope::from_slice(&body)?.into_wav_key().map_err(|e| {
            warn!(error = %e, "synthesis rejected");
            e
        })?;
        debug!(wav_key = %key, "synthesis accepted");
        Ok(key)
    }

    /// Download the audio identified by `wav_key`.
    pub async fn fetch(&self, wav_key: &str) -> Result<Bytes> {
        let url = self.endpoint(FETCH_PATH);
        info!(%url, %wav_key, "downloading audio");
        let res = self
            .client
            .get(&url)
            .query(&[("wav_key", wav_key)])
            .send()
            .await?;
        let status = res.status();
        if status != StatusCode::OK {
            warn!(%status, "audio download failed");
            return Err(SynthesisError::DownloadFailed {
                status: status.as_u16(),
            });
        }
        let audio = res.bytes().await?;
        debug!(bytes = audio.len(), "audio downloaded");
        Ok(audio)
    }

    /// Synthesize `text` and write the complete WAV payload to `sink`.
    ///
    /// Nothing is written unless both remote calls succeed.
    pub async fn synthesize<W: Write + ?Sized>(&self, text: &str, sink: &mut W) -> Result<()> {
        self.synthesize_with_progress(text, sink, |_| {}).await
    }

    /// Like [`synthesize`](Self::synthesize), calling `progress` before each
    /// remote call.
    pub async fn synthesize_with_progress<W, F>(
        &self,
        text: &str,
        sink: &mut W,
        mut progress: F,
    ) -> Result<()>
    where
        W: Write + ?Sized,
        F: FnMut(Stage),
    {
        progress(Stage::Generating);
        let key = self.submit(text).await?;
        progress(Stage::Downloading);
        let audio = self.fetch(&key).await?;
        sink.write_all(&audio).map_err(SynthesisError::Sink)?;
        sink.flush().map_err(SynthesisError::Sink)?;
        Ok(())
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("ja,ja-JP;q=0.9,und;q=0.8"),
    );
    headers.insert(ORIGIN, HeaderValue::from_static(SITE_ORIGIN));
    headers.insert(REFERER, HeaderValue::from_static(SITE_REFERER));
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_AGENT));
    headers
}
