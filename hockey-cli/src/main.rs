//! HockeyApp CLI - command-line access to apps, versions, crashes, and crash groups.
//!
//! Useful for scripting release uploads and for pulling crash data without
//! the web dashboard.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use hockey_core::config::AppConfig;
use hockey_core::constants;
use hockey_core::error::HockeyResult;
use hockey_core::logging;
use hockey_core::platform::Platform;

/// HockeyApp - manage apps and inspect crash reports.
#[derive(Parser)]
#[command(
    name = "hockeyapp",
    version,
    about = "HockeyApp command-line client",
    long_about = "A command-line client for the HockeyApp API.\n\
                  Lists apps and versions, uploads builds, and fetches crash reports."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API token (overrides config and the HOCKEYAPP_API_TOKEN variable).
    #[arg(short, long, global = true)]
    token: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List, create, and remove apps.
    Apps {
        #[command(subcommand)]
        action: commands::apps::AppsAction,
    },
    /// List and upload versions.
    Versions {
        #[command(subcommand)]
        action: commands::versions::VersionsAction,
    },
    /// List crashes and fetch crash logs.
    Crashes {
        #[command(subcommand)]
        action: commands::crashes::CrashesAction,
    },
    /// List crash groups.
    Groups {
        #[command(subcommand)]
        action: commands::groups::GroupsAction,
    },
}

#[tokio::main]
async fn main() -> HockeyResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match cli.config.as_deref() {
        Some(path) => {
            let mut config = AppConfig::load_from_file(path)?;
            config.apply_token_override(std::env::var(constants::TOKEN_ENV_VAR).ok());
            config
        }
        None => AppConfig::load_default()?,
    };
    config.apply_token_override(cli.token.clone());

    // Initialize logging
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let log_dir = config
        .effective_log_dir()
        .unwrap_or_else(|_| PathBuf::from("logs"));
    let _guard = match logging::init_logging(&log_level, &log_dir, config.logging.json_output) {
        Ok(guard) => Some(guard),
        Err(e) => {
            logging::init_console_logging(&log_level);
            warn!("File logging unavailable: {e}");
            None
        }
    };

    info!(
        "HockeyApp CLI v{} on {}",
        constants::APP_VERSION,
        Platform::current().name()
    );

    let client = commands::create_client(&config)?;

    match cli.command {
        Commands::Apps { action } => commands::apps::run(&client, action, cli.format).await,
        Commands::Versions { action } => {
            commands::versions::run(&client, action, cli.format).await
        }
        Commands::Crashes { action } => {
            commands::crashes::run(&client, action, cli.format).await
        }
        Commands::Groups { action } => commands::groups::run(&client, action, cli.format).await,
    }
}
