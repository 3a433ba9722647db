use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable holding the Audion API key. Required.
pub const API_KEY_VAR: &str = "AUDION_API_KEY";

/// Environment variable overriding the API base URL. Optional.
pub const BASE_URL_VAR: &str = "AUDION_BASE_URL";

/// Environment variable overriding the per-call timeout in seconds. Optional.
pub const TIMEOUT_VAR: &str = "AUDION_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "https://audion.magovoice.com/go-framework/v1/go";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for the Audion API client.
///
/// This struct represents *library-level configuration*, not CLI flags or
/// environment variables directly. Frontends map their inputs onto this type
/// so that the client can be constructed programmatically in tests and other
/// embeddings. There is no built-in credential: an API key must always be
/// supplied by the caller.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token sent with every upstream request.
    pub api_key: String,

    /// Base URL of the Audion API, without a trailing slash.
    pub base_url: String,

    /// Per-call timeout ceiling applied uniformly to every upstream request.
    pub timeout: Duration,
}

impl Config {
    /// Create a configuration with the default base URL and timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::msg("api_key is required"));
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load configuration from the environment.
    ///
    /// `AUDION_API_KEY` must be set; `AUDION_BASE_URL` and
    /// `AUDION_TIMEOUT_SECS` override the defaults when present.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_VAR)
            .map_err(|_| Error::msg(format!("{API_KEY_VAR} is not set")))?;
        let mut config = Self::new(api_key)?;

        if let Ok(base_url) = env::var(BASE_URL_VAR) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url.trim_end_matches('/').to_owned();
            }
        }

        if let Ok(raw) = env::var(TIMEOUT_VAR) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| Error::msg(format!("{TIMEOUT_VAR} must be a whole number of seconds, got '{raw}'")))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Replace the base URL (trailing slashes are stripped).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Replace the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
