//! `audion-mcp` — MCP tools for the Audion voice-transcription API.
//!
//! This crate provides:
//! - A blocking HTTP client for the Audion `flow` endpoint
//! - Pure formatters turning transcription results into text, SRT, and HTML
//! - A subtitle writer that resolves output paths and persists rendered cues
//! - A tool facade that advertises the operations to an MCP host and never
//!   surfaces a hard fault for a well-formed request
//!
//! The library is designed to be used by both the stdio host adapter and the
//! CLI, with an emphasis on explicit configuration and predictable failure
//! payloads.

// High-level API (most consumers should start here).
pub mod client;
pub mod tools;

// Configuration and errors.
pub mod config;
pub mod error;

// Upstream response data model.
pub mod transcription;

// Output selection and formatters.
pub mod highlight;
pub mod output_format;
pub mod srt;
pub mod transcript;

// Subtitle file persistence.
pub mod subtitle;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

pub use client::AudionClient;
pub use config::Config;
pub use error::{Error, Result};
pub use tools::ToolFacade;
