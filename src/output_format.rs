//! The supported output formats for each operation.
//!
//! Why this exists:
//! - We want a single, strongly-typed representation of output formats
//!   across the CLI, the facade, and library code.
//! - Unknown values coming over the tool surface must not abort a call:
//!   transcription and highlighting fall back to the JSON identity
//!   transform, and subtitle downloads carry the caller's tag through to
//!   the file extension while falling back to SRT content.
//!
//! Integration notes:
//! - `ValueEnum` (behind the `cli` feature) allows the closed enums to be
//!   used directly as CLI flags with `clap`.

use std::fmt;

/// Output representations for a transcription result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum TranscriptFormat {
    /// The raw upstream response, unchanged.
    #[default]
    Json,

    /// Flattened transcript text.
    Text,

    /// SRT subtitle text.
    Srt,
}

impl TranscriptFormat {
    /// Parse a caller-supplied format tag.
    ///
    /// Unknown values fall back to `Json`, which is the identity transform.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "srt" => Self::Srt,
            _ => Self::Json,
        }
    }
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Srt => "srt",
        };
        f.write_str(tag)
    }
}

/// Output representations for a highlighting result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum HighlightFormat {
    /// The raw upstream response, unchanged.
    #[default]
    Json,

    /// Flattened transcript text with `**` markers around keyword matches.
    Text,

    /// HTML markup with `<mark>` elements around keyword matches.
    Html,
}

impl HighlightFormat {
    /// Parse a caller-supplied format tag. Unknown values fall back to `Json`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "html" => Self::Html,
            _ => Self::Json,
        }
    }
}

impl fmt::Display for HighlightFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Html => "html",
        };
        f.write_str(tag)
    }
}

/// On-disk subtitle formats for the download operation.
///
/// Unlike the closed sets above, an unknown tag is carried through so the
/// written file keeps the extension the caller asked for, even though its
/// content falls back to SRT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleFormat {
    Srt,
    Vtt,
    Txt,
    Other(String),
}

impl SubtitleFormat {
    pub fn parse(raw: &str) -> Self {
        let tag = raw.trim().to_ascii_lowercase();
        match tag.as_str() {
            "srt" => Self::Srt,
            "vtt" => Self::Vtt,
            "txt" => Self::Txt,
            _ => Self::Other(tag),
        }
    }

    /// The file extension written for this format, without the leading dot.
    pub fn extension(&self) -> &str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Txt => "txt",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
