// Stdio host adapter for the Audion tool facade.
//
// Speaks line-delimited JSON-RPC 2.0 on stdin/stdout: enough for an MCP
// host to initialize, list tools, and call them. Deliberately thin; the
// facade owns all tool behavior, and logs stay on stderr so stdout carries
// only protocol frames.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use audion_mcp::tools;
use audion_mcp::{AudionClient, Config, ToolFacade};

const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;

#[derive(Parser, Debug)]
#[command(name = "audion-mcp-server")]
#[command(about = "MCP stdio server for the Audion voice-transcription API")]
struct Params {
    /// Override the Audion API base URL (default: AUDION_BASE_URL or the
    /// built-in endpoint).
    #[arg(long = "base-url")]
    base_url: Option<String>,

    /// Override the per-call timeout in seconds.
    #[arg(long = "timeout-secs")]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

fn main() {
    audion_mcp::logging::init();

    if let Err(err) = run() {
        error!(error = ?err, "audion-mcp-server failed");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let params = Params::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(base_url) = params.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(secs) = params.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let client = AudionClient::new(config).context("failed to build Audion client")?;
    let facade = ToolFacade::new(client);

    info!("listening on stdio");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        if let Some(response) = handle_line(&facade, &line) {
            writeln!(out, "{response}")?;
            out.flush()?;
        }
    }

    Ok(())
}

/// Handle one protocol frame. Returns `None` for notifications.
fn handle_line(facade: &ToolFacade, line: &str) -> Option<String> {
    let response = match serde_json::from_str::<Request>(line) {
        Ok(request) => handle_request(facade, request)?,
        Err(err) => rpc_error(Value::Null, PARSE_ERROR, format!("invalid request: {err}")),
    };

    Some(response.to_string())
}

fn handle_request(facade: &ToolFacade, request: Request) -> Option<Value> {
    // Frames without an id are notifications; they get no response.
    let id = request.id?;

    let result = match request.method.as_str() {
        "initialize" => json!({
            "protocolVersion": "2024-11-05",
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": "audion-mcp-server",
                "version": env!("CARGO_PKG_VERSION"),
            },
        }),
        "ping" => json!({}),
        "tools/list" => json!({ "tools": ToolFacade::definitions() }),
        "tools/call" => {
            let name = request
                .params
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default();
            let arguments = request
                .params
                .get("arguments")
                .cloned()
                .unwrap_or_else(|| json!({}));

            let payload = facade.call(name, &arguments);
            let is_error = payload.get("status").and_then(Value::as_str) == Some("error");

            json!({
                "content": [{ "type": "text", "text": tools::render(&payload) }],
                "isError": is_error,
            })
        }
        other => {
            return Some(rpc_error(
                id,
                METHOD_NOT_FOUND,
                format!("method not found: {other}"),
            ));
        }
    };

    Some(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
}

fn rpc_error(id: Value, code: i64, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message.into() },
    })
}
