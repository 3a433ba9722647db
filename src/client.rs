//! Blocking HTTP client for the Audion `flow` endpoint.
//!
//! Every operation is a single synchronous POST: multipart form data for
//! local file sources, URL-encoded form fields for URL sources. There is no
//! retry, no caching, and no shared mutable state; the per-call timeout from
//! [`Config`] is the only ceiling applied.

use std::path::Path;

use reqwest::blocking::{Client, multipart};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::highlight;
use crate::output_format::{HighlightFormat, TranscriptFormat};
use crate::transcript;
use crate::transcription::TranscriptionResult;

/// Which upstream pipeline a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// `audion_vu`: transcription ("voice understanding").
    VoiceUnderstanding,

    /// `audion_vh`: keyword spotting ("voice highlighting").
    VoiceHighlighting,
}

impl Flow {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VoiceUnderstanding => "audion_vu",
            Self::VoiceHighlighting => "audion_vh",
        }
    }
}

/// How an input source is handed to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    File,
    Url,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Url => "url",
        }
    }

    /// Classify an input source. URL-ish prefixes (including the scheme-less
    /// YouTube spellings the service accepts) are sent by reference;
    /// everything else is treated as a local file path.
    pub fn of(source: &str) -> Self {
        const URL_PREFIXES: [&str; 4] = ["http://", "https://", "youtu.be", "www.youtube.com"];

        if URL_PREFIXES.iter().any(|prefix| source.starts_with(prefix)) {
            Self::Url
        } else {
            Self::File
        }
    }
}

/// Client for the Audion voice-processing API.
pub struct AudionClient {
    http: Client,
    config: Config,
}

impl AudionClient {
    /// Build a client from explicit configuration.
    ///
    /// The per-call timeout is fixed at construction and applies uniformly
    /// to every request this client makes.
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("audion-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Call the `flow` endpoint with the given pipeline and input source.
    ///
    /// Returns the raw response; formatting is the caller's concern.
    pub fn flow(&self, flow: Flow, source: &str) -> Result<TranscriptionResult> {
        let url = format!("{}/flow", self.config.base_url);
        let input_type = InputType::of(source);
        debug!(flow = flow.as_str(), input_type = input_type.as_str(), %url, "calling flow endpoint");

        let request = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key);

        let response = match input_type {
            InputType::File => {
                let path = Path::new(source);
                if !path.is_file() {
                    return Err(Error::unsupported_input(source, "no such file"));
                }

                let form = multipart::Form::new()
                    .text("flow", flow.as_str())
                    .text("input_type", input_type.as_str())
                    .text("input", source.to_owned())
                    .file("file", path)?;

                request.multipart(form).send()?
            }
            InputType::Url => {
                let fields = [
                    ("flow", flow.as_str()),
                    ("input_type", input_type.as_str()),
                    ("input", source),
                ];

                request.form(&fields).send()?
            }
        };

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw: Value = serde_json::from_str(&body)?;
        info!(flow = flow.as_str(), "flow call succeeded");
        Ok(TranscriptionResult::new(raw))
    }

    /// Transcribe an input source and render the result in `format`.
    ///
    /// The language hint is recorded for diagnostics; the flow endpoint's
    /// wire format has no language field.
    pub fn voice_understanding(
        &self,
        source: &str,
        language: Option<&str>,
        format: TranscriptFormat,
    ) -> Result<Value> {
        debug!(?language, %format, source, "voice understanding");
        let result = self.flow(Flow::VoiceUnderstanding, source)?;
        Ok(transcript::format_transcript(&result, format))
    }

    /// Run keyword highlighting over an input source and render the result.
    pub fn voice_highlighting(
        &self,
        source: &str,
        keywords: &[String],
        language: Option<&str>,
        format: HighlightFormat,
    ) -> Result<Value> {
        debug!(?language, %format, source, keyword_count = keywords.len(), "voice highlighting");
        let result = self.flow(Flow::VoiceHighlighting, source)?;
        Ok(highlight::format_highlights(&result, keywords, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_type_classifies_urls_and_files() {
        assert_eq!(InputType::of("https://example.com/a.mp4"), InputType::Url);
        assert_eq!(InputType::of("http://example.com/a.mp4"), InputType::Url);
        assert_eq!(InputType::of("youtu.be/dQw4w9WgXcQ"), InputType::Url);
        assert_eq!(InputType::of("www.youtube.com/watch?v=x"), InputType::Url);
        assert_eq!(InputType::of("./audio/meeting.wav"), InputType::File);
        assert_eq!(InputType::of("/tmp/a.mp3"), InputType::File);
    }

    #[test]
    fn flow_rejects_missing_local_file_before_any_network_io() -> anyhow::Result<()> {
        let config = Config::new("mk-test")?;
        let client = AudionClient::new(config)?;

        let err = client
            .flow(Flow::VoiceUnderstanding, "/definitely/not/here.wav")
            .unwrap_err();
        assert_eq!(err.kind(), "unsupported_input");
        Ok(())
    }

    #[test]
    fn flow_names_match_the_upstream_pipelines() {
        assert_eq!(Flow::VoiceUnderstanding.as_str(), "audion_vu");
        assert_eq!(Flow::VoiceHighlighting.as_str(), "audion_vh");
    }
}
