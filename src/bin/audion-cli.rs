// Terminal driver for the Audion tools: the same operations the MCP facade
// exposes, invoked directly against the library.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::time::Duration;

use audion_mcp::output_format::{HighlightFormat, SubtitleFormat, TranscriptFormat};
use audion_mcp::subtitle::SubtitleWriter;
use audion_mcp::tools;
use audion_mcp::{AudionClient, Config};

#[derive(Parser, Debug)]
#[command(name = "audion-cli")]
#[command(about = "Call the Audion voice-transcription API from the terminal")]
struct Cli {
    /// Override the Audion API base URL.
    #[arg(long = "base-url", global = true)]
    base_url: Option<String>,

    /// Override the per-call timeout in seconds.
    #[arg(long = "timeout-secs", global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transcribe audio/video content from a file path or URL.
    Transcribe {
        /// File path or URL to audio/video content.
        input_source: String,

        /// Language code hint (e.g. 'ko', 'en').
        #[arg(short = 'l', long = "language")]
        language: Option<String>,

        #[arg(short = 'f', long = "format", value_enum, default_value_t = TranscriptFormat::Json)]
        format: TranscriptFormat,
    },

    /// Find and highlight keywords in audio/video content.
    Highlight {
        /// File path or URL to audio/video content.
        input_source: String,

        /// Keyword to highlight; repeat the flag for more than one.
        #[arg(short = 'k', long = "keyword", required = true)]
        keywords: Vec<String>,

        /// Language code hint (e.g. 'ko', 'en').
        #[arg(short = 'l', long = "language")]
        language: Option<String>,

        #[arg(short = 'f', long = "format", value_enum, default_value_t = HighlightFormat::Json)]
        format: HighlightFormat,
    },

    /// Transcribe audio/video content and save it as a subtitle file.
    Download {
        /// File path or URL to audio/video content.
        input_source: String,

        /// Where to write the subtitle file (defaults to ./subtitles/).
        #[arg(short = 'o', long = "output")]
        output_path: Option<String>,

        /// Language code hint (e.g. 'ko', 'en').
        #[arg(short = 'l', long = "language")]
        language: Option<String>,

        /// Subtitle format: srt, vtt, txt.
        #[arg(short = 'f', long = "format", default_value = "srt")]
        format: String,
    },
}

fn main() -> Result<()> {
    audion_mcp::logging::init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let client = AudionClient::new(config).context("failed to build Audion client")?;

    match cli.command {
        Command::Transcribe {
            input_source,
            language,
            format,
        } => {
            let payload = client.voice_understanding(&input_source, language.as_deref(), format)?;
            println!("{}", tools::render(&payload));
        }
        Command::Highlight {
            input_source,
            keywords,
            language,
            format,
        } => {
            let payload =
                client.voice_highlighting(&input_source, &keywords, language.as_deref(), format)?;
            println!("{}", tools::render(&payload));
        }
        Command::Download {
            input_source,
            output_path,
            language,
            format,
        } => {
            let format = SubtitleFormat::parse(&format);
            let saved = SubtitleWriter::new(&client).download(
                &input_source,
                output_path.as_deref(),
                language.as_deref(),
                &format,
            )?;
            println!("saved {} ({} bytes)", saved.path, saved.byte_size);
        }
    }

    Ok(())
}
