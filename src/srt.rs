use crate::transcription::TranscriptionResult;

/// Render a transcription result as SRT subtitle text.
///
/// Each utterance becomes one numbered block: a 1-based index line, a timing
/// line, and the utterance text, with blank lines between blocks. An empty
/// utterance sequence renders as an empty string.
pub fn render(result: &TranscriptionResult) -> String {
    let mut out = String::new();

    for (index, utterance) in result.utterances().iter().enumerate() {
        let start = seconds_to_timecode(utterance.start);
        let end = seconds_to_timecode(utterance.end);
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            start,
            end,
            utterance.text
        ));
    }

    out.trim().to_owned()
}

/// Convert non-negative seconds to an SRT timecode (`HH:MM:SS,mmm`).
///
/// Every field is truncated, not rounded: 0.9999s formats as `,999`, never
/// as the next second. Upstream timestamps are produced the same way, so the
/// two stay consistent.
pub fn seconds_to_timecode(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let millis = ((seconds % 1.0) * 1000.0).floor() as u64;

    format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}

/// Best-effort SRT to WebVTT rewrite.
///
/// Prepends the mandatory `WEBVTT` header and switches the millisecond
/// separator from `,` to `.` on timing lines. Commas inside cue text are
/// left alone. Cue numbering and ordering are carried over untouched; this
/// is not a validating VTT generator.
pub fn to_vtt(srt: &str) -> String {
    let body: Vec<String> = srt
        .lines()
        .map(|line| {
            if line.contains("-->") {
                line.replace(',', ".")
            } else {
                line.to_owned()
            }
        })
        .collect();

    format!("WEBVTT\n\n{}", body.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_with(utterances: serde_json::Value) -> TranscriptionResult {
        TranscriptionResult::new(json!({
            "content": { "output": { "utterances": utterances } }
        }))
    }

    #[test]
    fn timecode_formats_zero() {
        assert_eq!(seconds_to_timecode(0.0), "00:00:00,000");
    }

    #[test]
    fn timecode_decomposes_hours_minutes_seconds_millis() {
        assert_eq!(seconds_to_timecode(3661.5), "01:01:01,500");
        assert_eq!(seconds_to_timecode(59.25), "00:00:59,250");
        assert_eq!(seconds_to_timecode(7322.5), "02:02:02,500");
    }

    #[test]
    fn timecode_truncates_instead_of_rounding() {
        assert_eq!(seconds_to_timecode(0.9999), "00:00:00,999");
        assert_eq!(seconds_to_timecode(1.9995), "00:00:01,999");
    }

    #[test]
    fn render_numbers_blocks_from_one_in_order() {
        let result = result_with(json!([
            { "text": "hello", "start": 0.0, "end": 1.5 },
            { "text": "world", "start": 1.5, "end": 2.0 },
        ]));

        let srt = render(&result);
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:01,500\nhello\n\n2\n00:00:01,500 --> 00:00:02,000\nworld"
        );
    }

    #[test]
    fn render_of_empty_result_is_empty() {
        assert_eq!(render(&TranscriptionResult::new(json!({}))), "");
    }

    #[test]
    fn to_vtt_prepends_header_and_rewrites_timing_lines_only() {
        let srt = "1\n00:00:00,000 --> 00:00:01,500\nwell, hello\n\n2\n00:00:01,500 --> 00:00:02,000\nworld";
        let vtt = to_vtt(srt);

        assert!(vtt.starts_with("WEBVTT\n\n"));
        assert!(vtt.contains("00:00:00.000 --> 00:00:01.500"));
        // Commas in cue text survive.
        assert!(vtt.contains("well, hello"));
    }

    #[test]
    fn to_vtt_of_empty_srt_is_header_only() {
        assert_eq!(to_vtt(""), "WEBVTT\n\n");
    }
}
