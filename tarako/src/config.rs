use coefont::{CoeFontClient, SynthesisError, DEFAULT_BASE_URL, DEFAULT_COEFONT};

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "TARAKO_API_URL";

/// Runtime settings for the synthesis client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub coefont: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.into(),
            coefont: DEFAULT_COEFONT.into(),
        }
    }
}

impl Config {
    /// Default settings pointed at `api_url`.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Build the HTTP client for these settings.
    pub fn client(&self) -> Result<CoeFontClient, SynthesisError> {
        CoeFontClient::with_coefont(&self.api_url, &self.coefont)
    }
}
