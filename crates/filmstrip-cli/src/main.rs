use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filmstrip_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "filmstrip")]
#[command(version, about = "A scrolling image strip for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to an alternate config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the strip in the terminal (default)
    Run(StripArgs),
    /// Build the scene headlessly and print its layout
    Inspect {
        #[command(flatten)]
        strip: StripArgs,
        /// Viewport height in pixels used for scaling
        #[arg(long, default_value_t = 80)]
        height: u32,
        /// Number of scene entries to print
        #[arg(long, default_value_t = 20)]
        scene_prefix: usize,
    },
}

#[derive(Args)]
struct StripArgs {
    /// Image files in strip order; overrides the configured list
    images: Vec<String>,

    /// Scroll speed in pixels per second (negative reverses direction)
    #[arg(long)]
    speed: Option<f64>,

    /// Length of the precomputed scene
    #[arg(long)]
    scene_length: Option<usize>,

    /// Walk images in order instead of at random
    #[arg(long)]
    contiguous: bool,

    /// Start frozen instead of scrolling immediately
    #[arg(long)]
    paused: bool,

    /// Seed for reproducible scene generation
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated duplication weights, parallel to the image list
    #[arg(long, value_delimiter = ',')]
    weights: Vec<u32>,
}

impl StripArgs {
    /// Fold command-line flags over the loaded configuration.
    fn apply(&self, config: &mut AppConfig) {
        if !self.images.is_empty() {
            config.strip.images = self.images.clone();
            // Stale weights from the config do not apply to a new list
            config.strip.weights = self.weights.clone();
        } else if !self.weights.is_empty() {
            config.strip.weights = self.weights.clone();
        }
        if let Some(speed) = self.speed {
            config.strip.speed = speed;
        }
        if let Some(scene_length) = self.scene_length {
            config.strip.scene_length = scene_length;
        }
        if self.contiguous {
            config.strip.contiguous = true;
        }
        if self.paused {
            config.strip.start_immediately = false;
        }
        if let Some(seed) = self.seed {
            config.strip.seed = Some(seed);
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Some(Commands::Run(args)) => {
            args.apply(&mut config);
            commands::run::run(config)
        }
        None => commands::run::run(config),
        Some(Commands::Inspect {
            strip,
            height,
            scene_prefix,
        }) => {
            strip.apply(&mut config);
            commands::inspect::run(config, height, scene_prefix)
        }
    }
}
