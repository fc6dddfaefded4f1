//! Shared components for CLI commands
//!
//! Logging and configuration setup used by every subcommand.

use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::Result;
use std::path::Path;
use tracing::debug;

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fridgetag_parser={}", log_level)));

    if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> env)
///
/// Without `--config`, the user config file is used only if it exists.
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file: Option<&Path> = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_deref()
            .filter(|path| path.exists()),
    };

    Config::load_layered(config_file)
}

/// Apply the command-line log level over the configured one
pub fn apply_log_level(config: &mut Config, cli_level: Option<&str>) {
    if let Some(level) = cli_level {
        config.logging.level = level.to_string();
    }
}
