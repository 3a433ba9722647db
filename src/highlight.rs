use serde_json::{Value, json};

use crate::output_format::HighlightFormat;
use crate::transcription::TranscriptionResult;

/// Wrap every case-insensitive occurrence of each keyword with a marker pair.
///
/// Keywords are applied as a fold, in the order given: each pass produces a
/// new string and later passes operate on the already-marked text of earlier
/// ones, so overlapping keywords compound. Matching is substring based, not
/// word-boundary based; a keyword inside a longer word still matches.
pub fn mark_keywords(text: &str, keywords: &[String], open: &str, close: &str) -> String {
    keywords.iter().fold(text.to_owned(), |acc, keyword| {
        wrap_occurrences(&acc, keyword, open, close)
    })
}

/// Flattened transcript text with `**` markers around keyword matches.
pub fn render_text(result: &TranscriptionResult, keywords: &[String]) -> String {
    result
        .utterances()
        .iter()
        .map(|utterance| mark_keywords(&utterance.text, keywords, "**", "**"))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_owned()
}

/// HTML markup: one paragraph per utterance, carrying its start time, with
/// keyword matches wrapped in highlight elements. Cue text is emitted
/// verbatim, as the upstream service already returns plain text.
pub fn render_html(result: &TranscriptionResult, keywords: &[String]) -> String {
    let mut html = String::from("<div class='transcript'>");

    for utterance in result.utterances() {
        let marked = mark_keywords(
            &utterance.text,
            keywords,
            "<mark class='highlight'>",
            "</mark>",
        );
        html.push_str(&format!(
            "<p data-time='{}'>{}</p>",
            utterance.start, marked
        ));
    }

    html.push_str("</div>");
    html
}

/// Render a highlighting result in the requested representation.
pub fn format_highlights(
    result: &TranscriptionResult,
    keywords: &[String],
    format: HighlightFormat,
) -> Value {
    match format {
        HighlightFormat::Json => result.as_value().clone(),
        HighlightFormat::Text => json!({ "highlighted_text": render_text(result, keywords) }),
        HighlightFormat::Html => json!({ "html_content": render_html(result, keywords) }),
    }
}

/// Wrap every occurrence of `keyword` in `text`, matching ASCII
/// case-insensitively and preserving the casing of the matched slice.
fn wrap_occurrences(text: &str, keyword: &str, open: &str, close: &str) -> String {
    if keyword.is_empty() {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(at) = find_ignore_ascii_case(rest, keyword) {
        let end = at + keyword.len();
        out.push_str(&rest[..at]);
        out.push_str(open);
        out.push_str(&rest[at..end]);
        out.push_str(close);
        rest = &rest[end..];
    }

    out.push_str(rest);
    out
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
///
/// Non-ASCII bytes must match exactly, which keeps the match length equal to
/// the needle length and offsets on char boundaries.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }

    (0..=haystack.len() - needle.len())
        .filter(|&i| haystack.is_char_boundary(i))
        .find(|&i| haystack.as_bytes()[i..i + needle.len()].eq_ignore_ascii_case(needle.as_bytes()))
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

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn marks_single_keyword_in_text() {
        let result = result_with(json!([{ "text": "the cat sat", "start": 0.0, "end": 1.0 }]));
        assert_eq!(render_text(&result, &keywords(&["cat"])), "the **cat** sat");
    }

    #[test]
    fn matching_is_case_insensitive_and_keeps_original_casing() {
        assert_eq!(
            mark_keywords("The Cat sat", &keywords(&["cat"]), "**", "**"),
            "The **Cat** sat"
        );
    }

    #[test]
    fn matching_is_substring_based() {
        assert_eq!(
            mark_keywords("concatenate", &keywords(&["cat"]), "**", "**"),
            "con**cat**enate"
        );
    }

    #[test]
    fn later_keywords_operate_on_marked_text() {
        // "a" matches inside the markers the "cat" pass produced.
        assert_eq!(
            mark_keywords("cat", &keywords(&["cat", "a"]), "**", "**"),
            "**c**a**t**"
        );
    }

    #[test]
    fn non_ascii_keywords_match_exactly() {
        assert_eq!(
            mark_keywords("오늘 교육 시간", &keywords(&["교육"]), "**", "**"),
            "오늘 **교육** 시간"
        );
    }

    #[test]
    fn empty_keywords_change_nothing() {
        assert_eq!(
            mark_keywords("the cat sat", &keywords(&[""]), "**", "**"),
            "the cat sat"
        );
        assert_eq!(mark_keywords("the cat sat", &[], "**", "**"), "the cat sat");
    }

    #[test]
    fn html_wraps_container_paragraphs_and_marks() {
        let result = result_with(json!([
            { "text": "the cat sat", "start": 0.0, "end": 1.0 },
            { "text": "no match here", "start": 2.5, "end": 3.0 },
        ]));

        let html = render_html(&result, &keywords(&["cat"]));
        assert!(html.starts_with("<div class='transcript'>"));
        assert!(html.ends_with("</div>"));
        assert!(html.contains("<p data-time='0'>the <mark class='highlight'>cat</mark> sat</p>"));
        assert!(html.contains("<p data-time='2.5'>no match here</p>"));
    }

    #[test]
    fn json_format_is_identity() {
        let raw = json!({ "content": { "output": { "utterances": [] } } });
        let result = TranscriptionResult::new(raw.clone());
        assert_eq!(
            format_highlights(&result, &keywords(&["cat"]), HighlightFormat::Json),
            raw
        );
    }

    #[test]
    fn unmatched_keywords_leave_text_unchanged() {
        let result = result_with(json!([{ "text": "hello world", "start": 0.0, "end": 1.0 }]));
        assert_eq!(
            format_highlights(&result, &keywords(&["cat"]), HighlightFormat::Text),
            json!({ "highlighted_text": "hello world" })
        );
    }
}
