use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use streambest_core::command::{build_command, render_command, Placeholder};
use streambest_core::config::{load_config, DEFAULT_CONFIG_FILE};
use streambest_core::{select_streams, LanguageCode};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "streambest")]
#[command(about = "Restream a media source with its best video and audio tracks", long_about = None)]
#[command(version)]
struct Args {
    /// The URL to the media you want to stream
    #[arg(short, long, value_name = "URL")]
    source: String,

    /// Path to configuration file (.json or .toml)
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Preferred audio language, overrides pref_language from the config
    #[arg(short, long, value_name = "CODE")]
    language: Option<String>,

    /// Treat the first audio track without a language as a match
    #[arg(long)]
    force_untagged: bool,

    /// Print the command instead of running it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();

    if args.source.is_empty() {
        error!("No media specified");
        anyhow::bail!("no media specified");
    }

    info!("Loading configuration from {:?}", args.config);
    let mut config = match load_config(Some(&args.config)) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    if let Some(language) = args.language {
        if LanguageCode::parse(&language).is_none() {
            anyhow::bail!("--language {:?} is not a valid language code", language);
        }
        config.pref_language = language;
    }
    if args.force_untagged {
        config.force_untagged_audio = true;
    }

    let policy = config.selection_policy()?;
    info!(
        "Preferred language: {} (backup {}), force untagged audio: {}",
        policy.preferred_language, policy.fallback_language, policy.force_first_audio_without_language
    );

    match streambest_core::startup::check_ffprobe_version() {
        Ok((major, minor, patch)) => info!("ffprobe version: {}.{}.{}", major, minor, patch),
        Err(e) => warn!("Could not determine ffprobe version: {}", e),
    }

    let streams = streambest_core::probe::probe_source(&args.source).await?;
    let selection = select_streams(&streams, &policy);

    match selection.video {
        Some(index) => info!("Selected video stream {}", index),
        None if config.command.references(Placeholder::Video) => {
            warn!("No video stream found, $video falls back to stream 0")
        }
        None => info!("No video stream found"),
    }
    match selection.audio {
        Some(pick) => info!("Selected audio stream {} ({:?})", pick.index, pick.tier),
        None if config.command.references(Placeholder::Audio) => {
            warn!("No audio stream found, $audio falls back to stream 0")
        }
        None => info!("No audio stream found"),
    }

    let argv = build_command(
        &config.command,
        &selection,
        &args.source,
        &config.ingest,
        &config.key,
    );

    if args.dry_run {
        println!("{}", render_command(&argv));
        return Ok(());
    }

    let status = streambest_core::launch::launch(&argv).await?;
    if !status.success() {
        error!("Stream command failed: {}", status);
        anyhow::bail!("stream command exited with {}", status);
    }

    Ok(())
}
