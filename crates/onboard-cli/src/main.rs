use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use onboard_core::{AnimationStyle, AppConfig, IndicatorShape};

mod commands;

#[derive(Parser)]
#[command(name = "onboard")]
#[command(author, version, about = "Preview and inspect an onboarding carousel page indicator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/onboard/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive terminal preview
    Preview(PreviewArgs),
    /// Print the space the indicator row needs
    Measure {
        /// Number of pages
        #[arg(short = 'n', long, default_value_t = 4)]
        pages: usize,
        /// Animation style (defaults to the configured one)
        #[arg(long)]
        style: Option<AnimationStyle>,
    },
    /// Feed pager events and print the resulting draw commands as JSON
    Frame {
        /// Number of pages
        #[arg(short = 'n', long)]
        pages: usize,
        /// Settled page
        #[arg(short = 'p', long, default_value_t = 0)]
        page: i64,
        /// Drag in progress, as BASE:OFFSET (e.g. 1:0.25)
        #[arg(long, value_parser = commands::frame::parse_scroll)]
        scroll: Option<(i64, f32)>,
        /// Milliseconds into the settle animation (runs to completion when omitted)
        #[arg(long)]
        elapsed: Option<u64>,
        /// Layout width (defaults to the measured width)
        #[arg(long)]
        width: Option<f32>,
        /// Layout height (defaults to the measured height)
        #[arg(long)]
        height: Option<f32>,
        /// Animation style (defaults to the configured one)
        #[arg(long)]
        style: Option<AnimationStyle>,
    },
    /// List the built-in indicator presets
    Presets,
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Default)]
struct PreviewArgs {
    /// Indicator preset (default, minimal, modern, dark)
    #[arg(long)]
    preset: Option<String>,
    /// Animation style
    #[arg(long)]
    style: Option<AnimationStyle>,
    /// Indicator shape
    #[arg(long)]
    shape: Option<IndicatorShape>,
    /// Number of pages to show
    #[arg(short = 'n', long)]
    pages: Option<usize>,
    /// Write logs to this file while the preview runs
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    // The preview owns the terminal; its logs go to a file or nowhere
    let command = cli.command.unwrap_or(Commands::Preview(PreviewArgs::default()));
    match &command {
        Commands::Preview(args) => init_tracing(&config.general.log_level, args.log_file.as_deref(), false)?,
        _ => init_tracing(&config.general.log_level, None, true)?,
    }

    match command {
        Commands::Preview(args) => commands::preview::run(
            config,
            commands::preview::Overrides {
                preset: args.preset,
                style: args.style,
                shape: args.shape,
                pages: args.pages,
            },
        ),
        Commands::Measure { pages, style } => commands::measure::run(&config, pages, style),
        Commands::Frame {
            pages,
            page,
            scroll,
            elapsed,
            width,
            height,
            style,
        } => commands::frame::run(
            &config,
            commands::frame::FrameRequest {
                pages,
                page,
                scroll,
                elapsed,
                width,
                height,
                style,
            },
        ),
        Commands::Presets => commands::presets::run(),
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
            ConfigAction::Show => commands::config::show(&config),
        },
    }
}

/// Install the global subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(level: &str, log_file: Option<&Path>, to_stderr: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else if to_stderr {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry.init();
    }

    Ok(())
}
