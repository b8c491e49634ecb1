//! Command-line interface for a11y-keys.
//!
//! This module handles CLI argument parsing and dispatches to the
//! subcommand implementations in the [`commands`] submodule.

pub mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufReader};
use std::path::PathBuf;

/// a11y-keys - Keyboard combination matching for accessible key bindings
#[derive(Parser)]
#[command(name = "a11y-keys")]
#[command(author, version = crate::VERSION, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a config and build every element's binding table
    Check {
        /// Config file (defaults to ~/.config/a11y-keys/config.yaml)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Replay JSON-lines keyboard events against an element's bindings
    Dispatch {
        /// Element whose bindings receive the events
        #[arg(long, value_name = "NAME")]
        element: String,

        /// Config file (defaults to ~/.config/a11y-keys/config.yaml)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// File with one JSON keyboard event per line (defaults to stdin)
        #[arg(long, value_name = "PATH")]
        events: Option<PathBuf>,
    },

    /// Check a single keyboard event against a key list
    Match {
        /// Whitespace-separated key combinations, e.g. "space enter"
        keys: String,

        /// Keyboard event as JSON, e.g. '{"type":"keydown","key":"Enter"}'
        #[arg(long, value_name = "JSON")]
        event: String,
    },
}

/// Parse CLI arguments, install logging and run the chosen subcommand.
pub fn process_cli() -> Result<()> {
    let cli = Cli::parse();

    // CLI --log-level takes highest precedence, then RUST_LOG, then config
    crate::debug::init_log_bridge(cli.log_level.map(LogLevelArg::to_level_filter));
    log::info!("a11y-keys {}", crate::VERSION);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Check { config } => {
            let config = commands::load_config(config.as_deref())?;
            commands::run_check(&config, &mut out)
        }
        Commands::Dispatch {
            element,
            config,
            events,
        } => {
            let config = commands::load_config(config.as_deref())?;
            match events {
                Some(path) => {
                    let file = std::fs::File::open(&path).with_context(|| {
                        format!("Failed to open events file {}", path.display())
                    })?;
                    commands::run_dispatch(&config, &element, BufReader::new(file), &mut out)?;
                }
                None => {
                    commands::run_dispatch(&config, &element, io::stdin().lock(), &mut out)?;
                }
            }
            Ok(())
        }
        Commands::Match { keys, event } => {
            commands::run_match(&keys, &event, &mut out)?;
            Ok(())
        }
    }
}
