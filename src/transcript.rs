use serde_json::{Value, json};

use crate::output_format::TranscriptFormat;
use crate::srt;
use crate::transcription::TranscriptionResult;

/// Flatten a transcription result into plain transcript text.
///
/// Utterance texts are joined by single spaces and the result is trimmed of
/// leading and trailing whitespace. No utterances yields an empty string.
pub fn flatten_text(result: &TranscriptionResult) -> String {
    result
        .utterances()
        .iter()
        .map(|utterance| utterance.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_owned()
}

/// Render a transcription result in the requested representation.
///
/// `Json` is the identity transform; the other formats wrap their derived
/// text in a single-field object, mirroring the upstream tool contract.
pub fn format_transcript(result: &TranscriptionResult, format: TranscriptFormat) -> Value {
    match format {
        TranscriptFormat::Json => result.as_value().clone(),
        TranscriptFormat::Text => json!({ "transcript": flatten_text(result) }),
        TranscriptFormat::Srt => json!({ "srt_content": srt::render(result) }),
    }
}
