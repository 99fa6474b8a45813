//! Bigtop - command-line host for cart-pole episode logs.
//!
//! Usage:
//!   bigtop parse run.csv
//!   bigtop chapters run.csv
//!   bigtop --config bigtop.toml summary run.csv

mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::{ConfigManager, ConfigSection};
use logging::LogLevel;

#[derive(Parser)]
#[command(name = "bigtop", version)]
#[command(about = "Parse cart-pole episode logs into keyframes and chapters", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(long, global = true, default_value = "bigtop.toml")]
    config: PathBuf,

    /// Require the canonical header line
    #[arg(long, global = true)]
    strict_header: bool,

    /// Print compact JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print keyframes and chapter boundaries as JSON
    Parse {
        /// Log file path
        input: PathBuf,
    },

    /// Print chapter boundaries
    Chapters {
        /// Log file path
        input: PathBuf,
    },

    /// Print frame, chapter, reward and action counts
    Summary {
        /// Log file path
        input: PathBuf,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Create the config file with defaults (or fill in missing keys)
    Init,
    /// Print the effective settings
    Show,
    /// Change settings in the config file, one section at a time
    Set {
        /// Default log level
        #[arg(long, value_enum)]
        level: Option<LogLevel>,
        /// Require the canonical header line
        #[arg(long)]
        strict: Option<bool>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: Option<bool>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut manager = ConfigManager::new(&cli.config);
    match cli.command {
        Commands::Config {
            action: ConfigAction::Init | ConfigAction::Set { .. },
        } => manager.load_or_create(),
        _ => manager.load_or_default(),
    }
    .with_context(|| format!("Failed to load config '{}'", cli.config.display()))?;

    let mut settings = manager.settings().clone();
    if cli.strict_header {
        settings.parser.strict_header = true;
    }
    if cli.compact {
        settings.output.pretty = false;
    }

    logging::init_tracing(settings.logging.level);
    tracing::debug!("Using config {}", manager.path().display());

    match cli.command {
        Commands::Parse { input } => commands::parse(&input, &settings),
        Commands::Chapters { input } => commands::chapters(&input, &settings),
        Commands::Summary { input } => commands::summary(&input, &settings),
        Commands::Config { action } => match action {
            ConfigAction::Init => {
                println!("{}", manager.path().display());
                Ok(())
            }
            ConfigAction::Show => {
                let toml =
                    toml::to_string_pretty(&settings).context("Failed to serialize settings")?;
                print!("{}", toml);
                Ok(())
            }
            ConfigAction::Set {
                level,
                strict,
                pretty,
            } => set_config(&mut manager, level, strict, pretty),
        },
    }
}

/// Apply `config set` changes, writing only the touched sections.
fn set_config(
    manager: &mut ConfigManager,
    level: Option<LogLevel>,
    strict: Option<bool>,
    pretty: Option<bool>,
) -> Result<()> {
    let mut changed = Vec::new();

    if let Some(level) = level {
        manager.settings_mut().logging.level = level;
        changed.push(ConfigSection::Logging);
    }
    if let Some(strict) = strict {
        manager.settings_mut().parser.strict_header = strict;
        changed.push(ConfigSection::Parser);
    }
    if let Some(pretty) = pretty {
        manager.settings_mut().output.pretty = pretty;
        changed.push(ConfigSection::Output);
    }

    for section in changed {
        manager
            .update_section(section)
            .with_context(|| format!("Failed to update [{}]", section.table_name()))?;
        tracing::info!("Updated [{}] in {}", section.table_name(), manager.path().display());
    }

    Ok(())
}
