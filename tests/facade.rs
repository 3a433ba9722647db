use std::time::Duration;

use serde_json::{Value, json};

use audion_mcp::output_format::{HighlightFormat, TranscriptFormat};
use audion_mcp::tools::{self, DOWNLOAD_SUBTITLE, TRANSCRIBE};
use audion_mcp::transcription::TranscriptionResult;
use audion_mcp::{AudionClient, Config, ToolFacade, highlight, transcript};

fn sample_result() -> TranscriptionResult {
    TranscriptionResult::new(json!({
        "content": { "output": { "utterances": [
            { "text": "the cat sat", "start": 0.0, "end": 1.5 },
            { "text": "on the mat", "start": 1.5, "end": 3.25 },
            { "text": "quietly", "start": 3.25, "end": 4.0 },
        ]}}
    }))
}

/// A facade pointed at a port nothing listens on.
fn unreachable_facade() -> ToolFacade {
    let config = Config::new("mk-test")
        .expect("config")
        .with_base_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_secs(2));
    ToolFacade::new(AudionClient::new(config).expect("client"))
}

#[test]
fn text_format_joins_utterances_with_single_spaces() {
    let payload = transcript::format_transcript(&sample_result(), TranscriptFormat::Text);
    assert_eq!(payload["transcript"], "the cat sat on the mat quietly");
}

#[test]
fn srt_format_emits_numbered_blocks_in_order() {
    let payload = transcript::format_transcript(&sample_result(), TranscriptFormat::Srt);
    let srt = payload["srt_content"].as_str().expect("srt text");

    let blocks: Vec<&str> = srt.split("\n\n").collect();
    assert_eq!(blocks.len(), 3);
    for (i, block) in blocks.iter().enumerate() {
        let mut lines = block.lines();
        assert_eq!(lines.next(), Some(format!("{}", i + 1).as_str()));
        assert!(lines.next().unwrap().contains(" --> "));
        assert!(lines.next().is_some());
    }
    assert!(srt.contains("00:00:01,500 --> 00:00:03,250"));
}

#[test]
fn json_format_round_trips_the_result() {
    let result = sample_result();
    let payload = transcript::format_transcript(&result, TranscriptFormat::Json);
    assert_eq!(&payload, result.as_value());
}

#[test]
fn highlighted_text_wraps_keyword_occurrences() {
    let keywords = vec!["cat".to_string()];
    let payload = highlight::format_highlights(&sample_result(), &keywords, HighlightFormat::Text);
    assert_eq!(
        payload["highlighted_text"],
        "the **cat** sat on the mat quietly"
    );
}

#[test]
fn highlighted_html_carries_start_times_and_mark_elements() {
    let keywords = vec!["cat".to_string()];
    let payload = highlight::format_highlights(&sample_result(), &keywords, HighlightFormat::Html);
    let html = payload["html_content"].as_str().expect("html text");

    assert!(html.starts_with("<div class='transcript'>"));
    assert!(html.contains("<p data-time='0'>the <mark class='highlight'>cat</mark> sat</p>"));
    assert!(html.contains("<p data-time='3.25'>quietly</p>"));
}

#[test]
fn empty_results_degrade_to_empty_output_everywhere() {
    let empty = TranscriptionResult::new(json!({}));

    let text = transcript::format_transcript(&empty, TranscriptFormat::Text);
    assert_eq!(text["transcript"], "");

    let srt = transcript::format_transcript(&empty, TranscriptFormat::Srt);
    assert_eq!(srt["srt_content"], "");

    let html = highlight::format_highlights(&empty, &[], HighlightFormat::Html);
    assert_eq!(html["html_content"], "<div class='transcript'></div>");
}

#[test]
fn transcribe_against_unreachable_endpoint_returns_error_payload() {
    let facade = unreachable_facade();
    let arguments = json!({ "input_source": "https://example.com/video123.mp4", "format": "srt" });

    let payload = facade.call(TRANSCRIBE, &arguments);
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["kind"], "http");
    assert_eq!(payload["request"], arguments);
}

#[test]
fn download_against_unreachable_endpoint_reports_error_without_a_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("video123.srt");

    let facade = unreachable_facade();
    let arguments = json!({
        "input_source": "https://example.com/video123.mp4",
        "output_path": target.to_str().unwrap(),
    });

    let payload = facade.call(DOWNLOAD_SUBTITLE, &arguments);
    assert_eq!(payload["status"], "error");
    // The upstream call failed before anything was rendered.
    assert!(!target.exists());
}

#[test]
fn rendered_payloads_are_valid_json_text() {
    let facade = unreachable_facade();
    let payload = facade.call("no-such-tool", &json!({}));

    let text = tools::render(&payload);
    let parsed: Value = serde_json::from_str(&text).expect("rendered payload parses");
    assert_eq!(parsed["kind"], "unknown_tool");
}
