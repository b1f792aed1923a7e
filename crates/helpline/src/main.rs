//! helpline: multilingual voice helpline CLI
//!
//! Runs one pipeline pass over an input audio file and writes the
//! synthesized reply audio to disk.
//!
//! Usage:
//!   helpline input.wav                 - Process with auto-detected language
//!   helpline input.wav -o reply.mp3    - Choose the output path
//!   helpline input.wav --source-lang hi
//!   helpline --help                    - Show help

use std::path::PathBuf;
use std::sync::Arc;

use helpline_core::language;
use helpline_core::{Config, LlmClient, LlmConfig};
use helpline_pipeline::{AudioInput, HelplinePipeline};
use helpline_translate::{TranslateClient, TranslateConfig};
use helpline_voice::{SpeechClient, SpeechConfig};
use tracing_subscriber::EnvFilter;

/// Parsed command line
#[derive(Debug, PartialEq)]
struct Args {
    input: PathBuf,
    output: PathBuf,
    source_lang: Option<String>,
    target_lang: Option<String>,
    verbose: bool,
}

/// Run mode
#[derive(Debug, PartialEq)]
enum Command {
    Run(Args),
    Help,
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            print_help();
            std::process::exit(2);
        }
    };

    let args = match command {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Version => {
            println!("helpline {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::Run(args) => args,
    };

    // Load .env first so a RUST_LOG set there reaches the filter
    dotenvy::dotenv().ok();

    // Initialize logging; -v raises the default level to debug
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.parse()?))
        .init();

    if !args.input.exists() {
        tracing::error!("input audio file not found: {}", args.input.display());
        std::process::exit(1);
    }

    let config = Config::load().map_err(|e| anyhow::anyhow!("config error: {e}"))?;

    let source_lang = args
        .source_lang
        .unwrap_or_else(|| config.default_source_lang.clone());
    let target_lang = args
        .target_lang
        .unwrap_or_else(|| config.default_target_lang.clone());

    let pipeline = build_pipeline(&config)?;

    tracing::info!("helpline pipeline started");
    tracing::info!("input file: {}", args.input.display());

    let audio = std::fs::read(&args.input)?;
    let filename = args
        .input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("audio.wav");
    let input = AudioInput {
        bytes: &audio,
        filename,
    };
    let result = pipeline.run(input, &source_lang, &target_lang).await?;

    std::fs::write(&args.output, &result.output_audio)?;

    tracing::info!(
        "response language: {} ({})",
        result.input_language,
        language::display_name(&result.input_language).unwrap_or("undetermined")
    );
    tracing::info!(
        "audio file created: {} ({} bytes)",
        args.output.display(),
        result.output_audio.len()
    );

    Ok(())
}

/// Build the pipeline from loaded configuration.
fn build_pipeline(config: &Config) -> anyhow::Result<HelplinePipeline> {
    let speech = SpeechClient::new(
        SpeechConfig::new(&config.elevenlabs_api_key)
            .with_base_url(&config.endpoints.elevenlabs_base_url)
            .with_stt_model(&config.models.stt_model)
            .with_tts_model(&config.models.tts_model)
            .with_voice_id(&config.models.tts_voice_id)
            .with_min_confidence(config.quality.min_stt_confidence)
            .with_rate_limits(
                config.rate_limits.stt_per_minute,
                config.rate_limits.tts_per_minute,
            ),
    )
    .map_err(|e| anyhow::anyhow!("failed to create speech client: {e}"))?;

    let translator = TranslateClient::new(
        TranslateConfig::new(&config.sarvam_api_key)
            .with_base_url(&config.endpoints.sarvam_base_url)
            .with_min_quality(config.quality.min_translation_quality)
            .with_rate_limit(config.rate_limits.translation_per_minute),
    )
    .map_err(|e| anyhow::anyhow!("failed to create translation client: {e}"))?;

    let model = LlmClient::new(
        LlmConfig::new(&config.groq_api_key)
            .with_base_url(&config.endpoints.groq_base_url)
            .with_model(&config.models.groq_model)
            .with_rate_limit(config.rate_limits.llm_per_minute),
    )
    .map_err(|e| anyhow::anyhow!("failed to create LLM client: {e}"))?;

    Ok(HelplinePipeline::new(
        Arc::new(speech),
        Arc::new(translator),
        Arc::new(model),
    ))
}

/// Parse command line arguments.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let mut input: Option<PathBuf> = None;
    let mut output = PathBuf::from("response.mp3");
    let mut source_lang = None;
    let mut target_lang = None;
    let mut verbose = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--verbose" | "-v" => verbose = true,
            "--output" | "-o" => {
                output = PathBuf::from(required_value(&arg, args.next())?);
            }
            "--source-lang" => {
                source_lang = Some(required_value(&arg, args.next())?);
            }
            "--target-lang" => {
                target_lang = Some(required_value(&arg, args.next())?);
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {other}"));
            }
            _ => {
                if input.is_some() {
                    return Err(format!("unexpected argument: {arg}"));
                }
                input = Some(PathBuf::from(arg));
            }
        }
    }

    let Some(input) = input else {
        return Err("missing input audio file".to_string());
    };

    Ok(Command::Run(Args {
        input,
        output,
        source_lang,
        target_lang,
        verbose,
    }))
}

fn required_value(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("{flag} requires a value"))
}

/// Print help message
fn print_help() {
    println!("helpline - multilingual voice helpline pipeline");
    println!();
    println!("Usage:");
    println!("  helpline <input-audio> [options]");
    println!();
    println!("Options:");
    println!("  -o, --output PATH      Output audio file (default: response.mp3)");
    println!("      --source-lang CODE Declared source language (default: auto)");
    println!("      --target-lang CODE Declared target language (default: en)");
    println!("  -v, --verbose          Enable verbose logging");
    println!("  -h, --help             Show this help message");
    println!("  -V, --version          Show version");
    println!();
    println!("Environment Variables:");
    println!("  ELEVENLABS_API_KEY     Speech API key (required)");
    println!("  SARVAM_API_KEY         Translation API key (required)");
    println!("  GROQ_API_KEY           LLM API key (required)");
    println!("  GROQ_MODEL_NAME        Chat model name");
    println!("  MIN_STT_CONFIDENCE     Transcription confidence threshold (default: 0.7)");
    println!("  MIN_TRANSLATION_QUALITY Translation quality threshold (default: 0.6)");
    println!("  RATE_LIMIT_STT / _TTS / _TRANSLATION / _LLM  Calls per minute");
}
