//! Tool facade: the operations this server advertises to an MCP host.
//!
//! The facade is the "never raises" boundary. Whatever goes wrong inside a
//! call (bad arguments, upstream failure, filesystem failure), the host
//! receives a well-formed payload; errors travel in-band as
//! `status: "error"` records with the original request echoed back.
//!
//! The facade itself is transport-free. A host loop (stdio adapter, test
//! harness, anything that can hand over a tool name and JSON arguments)
//! drives it from outside.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use crate::client::AudionClient;
use crate::output_format::{HighlightFormat, SubtitleFormat, TranscriptFormat};
use crate::subtitle::SubtitleWriter;

/// Tool name: transcribe audio/video content.
pub const TRANSCRIBE: &str = "transcribe";

/// Tool name: highlight keywords in audio/video content.
pub const HIGHLIGHT: &str = "highlight";

/// Tool name: transcribe and persist a subtitle file.
pub const DOWNLOAD_SUBTITLE: &str = "download_subtitle";

/// A tool advertised to the host, with its JSON Schema input contract.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Deserialize)]
struct TranscribeRequest {
    input_source: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default = "default_json_format")]
    format: String,
}

#[derive(Debug, Deserialize)]
struct HighlightRequest {
    input_source: String,
    highlight_keywords: Vec<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default = "default_json_format")]
    format: String,
}

#[derive(Debug, Deserialize)]
struct DownloadSubtitleRequest {
    input_source: String,
    #[serde(default)]
    output_path: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default = "default_srt_format")]
    format: String,
}

fn default_json_format() -> String {
    "json".to_owned()
}

fn default_srt_format() -> String {
    "srt".to_owned()
}

/// Dispatches tool calls against an [`AudionClient`].
pub struct ToolFacade {
    client: AudionClient,
}

impl ToolFacade {
    pub fn new(client: AudionClient) -> Self {
        Self { client }
    }

    /// The tools this facade advertises.
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: TRANSCRIBE,
                description: "Transcribe audio/video content from a file path or URL",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "input_source": {
                            "type": "string",
                            "description": "File path or URL to audio/video content"
                        },
                        "language": {
                            "type": "string",
                            "description": "Language code (e.g. 'ko', 'en')"
                        },
                        "format": {
                            "type": "string",
                            "description": "Output format: json, text, srt",
                            "default": "json"
                        }
                    },
                    "required": ["input_source"]
                }),
            },
            ToolDefinition {
                name: HIGHLIGHT,
                description: "Find and highlight keywords in audio/video content",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "input_source": {
                            "type": "string",
                            "description": "File path or URL to audio/video content"
                        },
                        "highlight_keywords": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Keywords to highlight in the transcript"
                        },
                        "language": {
                            "type": "string",
                            "description": "Language code (e.g. 'ko', 'en')"
                        },
                        "format": {
                            "type": "string",
                            "description": "Output format: json, text, html",
                            "default": "json"
                        }
                    },
                    "required": ["input_source", "highlight_keywords"]
                }),
            },
            ToolDefinition {
                name: DOWNLOAD_SUBTITLE,
                description: "Transcribe audio/video content and save it as a subtitle file",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "input_source": {
                            "type": "string",
                            "description": "File path or URL to audio/video content"
                        },
                        "output_path": {
                            "type": "string",
                            "description": "Where to write the subtitle file (defaults to ./subtitles/)"
                        },
                        "language": {
                            "type": "string",
                            "description": "Language code (e.g. 'ko', 'en')"
                        },
                        "format": {
                            "type": "string",
                            "description": "Subtitle format: srt, vtt, txt",
                            "default": "srt"
                        }
                    },
                    "required": ["input_source"]
                }),
            },
        ]
    }

    /// Dispatch one tool call.
    ///
    /// Always returns a payload; unknown tools, invalid arguments, and
    /// operation failures all come back as `status: "error"` records.
    pub fn call(&self, name: &str, arguments: &Value) -> Value {
        match name {
            TRANSCRIBE => self.transcribe(arguments),
            HIGHLIGHT => self.highlight(arguments),
            DOWNLOAD_SUBTITLE => self.download_subtitle(arguments),
            other => {
                warn!(tool = other, "unknown tool requested");
                error_payload("unknown_tool", format!("unknown tool '{other}'"), arguments)
            }
        }
    }

    fn transcribe(&self, arguments: &Value) -> Value {
        let request: TranscribeRequest = match parse_arguments(arguments) {
            Ok(request) => request,
            Err(payload) => return payload,
        };

        let format = TranscriptFormat::parse(&request.format);
        self.client
            .voice_understanding(&request.input_source, request.language.as_deref(), format)
            .unwrap_or_else(|err| error_payload(err.kind(), err.to_string(), arguments))
    }

    fn highlight(&self, arguments: &Value) -> Value {
        let request: HighlightRequest = match parse_arguments(arguments) {
            Ok(request) => request,
            Err(payload) => return payload,
        };

        let format = HighlightFormat::parse(&request.format);
        self.client
            .voice_highlighting(
                &request.input_source,
                &request.highlight_keywords,
                request.language.as_deref(),
                format,
            )
            .unwrap_or_else(|err| error_payload(err.kind(), err.to_string(), arguments))
    }

    fn download_subtitle(&self, arguments: &Value) -> Value {
        let request: DownloadSubtitleRequest = match parse_arguments(arguments) {
            Ok(request) => request,
            Err(payload) => return payload,
        };

        let format = SubtitleFormat::parse(&request.format);
        let writer = SubtitleWriter::new(&self.client);
        match writer.download(
            &request.input_source,
            request.output_path.as_deref(),
            request.language.as_deref(),
            &format,
        ) {
            Ok(saved) => json!({
                "status": "success",
                "path": saved.path,
                "format": saved.format,
                "byte_size": saved.byte_size,
            }),
            Err(err) => error_payload(err.kind(), err.to_string(), arguments),
        }
    }
}

/// Serialize a tool payload for the host's text content block.
pub fn render(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}

fn parse_arguments<T: for<'de> Deserialize<'de>>(
    arguments: &Value,
) -> std::result::Result<T, Value> {
    serde_json::from_value(arguments.clone())
        .map_err(|err| error_payload("invalid_arguments", err.to_string(), arguments))
}

fn error_payload(kind: &str, message: impl Into<String>, request: &Value) -> Value {
    json!({
        "status": "error",
        "kind": kind,
        "message": message.into(),
        "request": request,
    })
}
