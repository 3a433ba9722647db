//! Subtitle file persistence.
//!
//! Resolves an output location from the input source (or an explicit path),
//! renders the transcription in the requested subtitle format, and writes it
//! as UTF-8 text. Writes are not atomic: a failed write may leave a partial
//! file behind.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::client::{AudionClient, Flow, InputType};
use crate::error::Result;
use crate::output_format::SubtitleFormat;
use crate::srt;
use crate::transcript;
use crate::transcription::TranscriptionResult;

/// Directory used when the caller gives no explicit output path.
pub const DEFAULT_OUTPUT_DIR: &str = "./subtitles";

/// Record of a successfully written subtitle file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedSubtitle {
    /// Absolute path of the written file.
    pub path: String,

    /// The format tag the content was rendered in.
    pub format: String,

    /// Number of bytes written.
    pub byte_size: u64,
}

/// Fetches transcriptions and persists them as subtitle files.
pub struct SubtitleWriter<'a> {
    client: &'a AudionClient,
}

impl<'a> SubtitleWriter<'a> {
    pub fn new(client: &'a AudionClient) -> Self {
        Self { client }
    }

    /// Transcribe `source` and write the result in `format`.
    ///
    /// The language hint is recorded for diagnostics only, as with the other
    /// operations.
    pub fn download(
        &self,
        source: &str,
        output_path: Option<&str>,
        language: Option<&str>,
        format: &SubtitleFormat,
    ) -> Result<SavedSubtitle> {
        info!(source, ?language, %format, "downloading subtitle");
        let result = self.client.flow(Flow::VoiceUnderstanding, source)?;
        write_subtitle(&result, source, output_path, format)
    }
}

/// Render `result` in `format` and write it to the resolved output path.
pub fn write_subtitle(
    result: &TranscriptionResult,
    source: &str,
    output_path: Option<&str>,
    format: &SubtitleFormat,
) -> Result<SavedSubtitle> {
    let path = resolve_output_path(source, output_path, format)?;
    let content = subtitle_content(result, format)?;

    fs::write(&path, content.as_bytes())?;
    let absolute = path.canonicalize()?;
    info!(path = %absolute.display(), bytes = content.len(), "subtitle written");

    Ok(SavedSubtitle {
        path: absolute.display().to_string(),
        format: format.extension().to_owned(),
        byte_size: content.len() as u64,
    })
}

/// Select the file content for a format.
///
/// Unknown formats fall back to the SRT rendering when the transcript has
/// utterances, else to the raw response JSON so the caller still gets
/// everything the API returned.
fn subtitle_content(result: &TranscriptionResult, format: &SubtitleFormat) -> Result<String> {
    let content = match format {
        SubtitleFormat::Srt => srt::render(result),
        SubtitleFormat::Vtt => srt::to_vtt(&srt::render(result)),
        SubtitleFormat::Txt => transcript::flatten_text(result),
        SubtitleFormat::Other(_) => {
            let rendered = srt::render(result);
            if rendered.is_empty() {
                serde_json::to_string_pretty(result.as_value())?
            } else {
                rendered
            }
        }
    };

    Ok(content)
}

fn resolve_output_path(
    source: &str,
    output_path: Option<&str>,
    format: &SubtitleFormat,
) -> Result<PathBuf> {
    if let Some(explicit) = output_path {
        let path = PathBuf::from(explicit);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        return Ok(path);
    }

    fs::create_dir_all(DEFAULT_OUTPUT_DIR)?;
    let name = format!("{}.{}", derive_base_name(source), format.extension());
    Ok(Path::new(DEFAULT_OUTPUT_DIR).join(name))
}

/// Derive a filename stem from the input source.
///
/// URL sources use the last path segment with query string, fragment, and
/// extension stripped; file sources use the file stem. An empty stem falls
/// back to a timestamped name.
pub fn derive_base_name(source: &str) -> String {
    let stem = match InputType::of(source) {
        InputType::Url => {
            let without_query = source.split(['?', '#']).next().unwrap_or(source);
            let last_segment = without_query.rsplit('/').next().unwrap_or("");
            file_stem_of(last_segment)
        }
        InputType::File => file_stem_of(source),
    };

    if stem.is_empty() {
        format!("subtitle_{}", Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        stem
    }
}

fn file_stem_of(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("")
        .to_owned()
}
