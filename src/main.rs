//! tts-save CLI entry point.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tts_save::backend::create_backend;
use tts_save::cli::Args;
use tts_save::engine::{SpeechJob, TTSEngine};
use tts_save::output::AudioStore;

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the result summary
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("debug,reqwest=info,hyper_util=info")
        } else {
            EnvFilter::new("warn,tts_save=info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    args.validate().context("Invalid arguments")?;
    let text = args.resolve_text().context("Invalid arguments")?;

    info!(provider = args.provider.as_str(), voice = %args.voice, "starting");
    debug!(?args, "parsed arguments");

    let backend = create_backend(args.provider, &args.tld)
        .with_context(|| format!("Failed to set up {}", args.provider.name()))?;
    let store = AudioStore::with_dir(args.output_dir.clone());
    let engine = TTSEngine::new(backend, store);

    println!("Generating speech...");
    println!("  Provider: {}", args.provider.name());
    println!("  Voice: {}", args.voice);

    let job = SpeechJob {
        text: &text,
        voice: &args.voice,
        filename: &args.filename,
        slow: args.slow,
        max_age: args.max_age.map(Duration::from_secs),
    };

    let report = engine.run(&job).with_context(|| {
        format!(
            "Failed to convert text to {}",
            args.output_dir.join(&args.filename).display()
        )
    })?;

    if !report.pruned.is_empty() {
        println!("Removed {} old file(s)", report.pruned.len());
    }
    println!("Audio saved to: {}", report.saved.path.display());
    println!("  Size: {} bytes", report.saved.size);

    Ok(())
}
