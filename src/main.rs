//! Binary entrypoint for the slideshow.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use rust_slideshow::config::Configuration;
use rust_slideshow::events::Event;
use rust_slideshow::tasks::host::Host;
use rust_slideshow::tasks::input::{self, HELP, Input};

#[derive(Debug, Parser)]
#[command(
    name = "slideshow",
    version,
    about = "Randomized image and video slideshow for a folder"
)]
struct Cli {
    /// Folder to show (overrides `start-folder`)
    #[arg(value_name = "FOLDER")]
    folder: Option<PathBuf>,

    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the per-image display duration (e.g. `5s`, `1500ms`)
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    display_duration: Option<Duration>,

    /// Deterministic RNG seed for shuffling and random picks
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Write each presented frame to this PNG file
    #[arg(long, value_name = "FILE")]
    frame_output: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"))
        .add_directive(
            format!("rust_slideshow={level}")
                .parse()
                .context("invalid log directive")?,
        );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut cfg = match &cli.config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(folder) = cli.folder {
        cfg.start_folder = Some(folder);
    }
    if let Some(duration) = cli.display_duration {
        cfg.display_duration = duration;
    }
    if cli.seed.is_some() {
        cfg.shuffle_seed = cli.seed;
    }
    if cli.frame_output.is_some() {
        cfg.frame_output = cli.frame_output;
    }
    let cfg = cfg.validated().context("invalid configuration values")?;
    tracing::debug!("configuration: {cfg:#?}");

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    let (input_tx, input_rx) = mpsc::channel::<Input>(16); // Terminal -> Host
    input::spawn_stdin_reader(input_tx, cancel.clone());
    eprintln!("{HELP}");

    let mut host = Host::new(&cfg)?;
    match &cfg.start_folder {
        Some(folder) => host.dispatch(Event::FolderSelected(folder.clone())),
        None => eprintln!("type `o <folder>` or `drop <folder>` to start"),
    }

    host.run(input_rx, cancel).await.context("slideshow failed")
}
